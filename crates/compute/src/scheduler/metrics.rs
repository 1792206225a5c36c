use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use srtf_core::{InternalInconsistencyError, Process, ProcessId, Time};

use super::state::ProcessRuntimeState;
use super::types::{ProcessMetrics, Timeline};

/// Absolute slack allowed when comparing accumulated float times.
const TOLERANCE: Time = 1e-9;

pub(crate) fn tolerance_for(magnitude: Time) -> Time {
    TOLERANCE * magnitude.abs().max(1.0)
}

/// Order two accumulated times, treating values within tolerance as equal.
pub(crate) fn approx_cmp(a: Time, b: Time) -> Ordering {
    if (a - b).abs() <= tolerance_for(a.abs().max(b.abs())) {
        Ordering::Equal
    } else {
        a.total_cmp(&b)
    }
}

/// Turn final runtime states into per-process metrics, checking that every
/// derived quantity is non-negative.
pub(crate) fn derive_metrics(
    processes: &[Process],
    states: &[ProcessRuntimeState],
) -> Result<IndexMap<ProcessId, ProcessMetrics>, InternalInconsistencyError> {
    let mut metrics = IndexMap::with_capacity(processes.len());

    for (process, state) in processes.iter().zip(states) {
        let (Some(start_time), Some(completion_time)) = (state.start_time, state.completion_time)
        else {
            return Err(InternalInconsistencyError::new(
                process.arrival_time,
                format!("process {} never completed", process.id),
            ));
        };

        let turnaround_time = completion_time - process.arrival_time;
        let waiting_time = non_negative(
            turnaround_time - process.burst_time,
            completion_time,
            &process.id,
            "waiting time",
        )?;
        let response_time = non_negative(
            start_time - process.arrival_time,
            start_time,
            &process.id,
            "response time",
        )?;

        metrics.insert(
            process.id.clone(),
            ProcessMetrics {
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                start_time,
                completion_time,
                turnaround_time,
                waiting_time,
                response_time,
            },
        );
    }

    Ok(metrics)
}

/// Clamp float noise around zero; anything clearly negative is an engine bug.
fn non_negative(
    value: Time,
    at: Time,
    id: &str,
    what: &str,
) -> Result<Time, InternalInconsistencyError> {
    if value >= 0.0 {
        Ok(value)
    } else if value >= -tolerance_for(at) {
        Ok(0.0)
    } else {
        Err(InternalInconsistencyError::new(
            at,
            format!("negative {what} {value} for process {id}"),
        ))
    }
}

/// Post-run checks: contiguous segments from 0 and burst conservation.
pub(crate) fn verify_timeline(timeline: &Timeline) -> Result<(), InternalInconsistencyError> {
    let mut cursor = 0.0;
    for segment in &timeline.segments {
        if segment.start_time != cursor {
            return Err(InternalInconsistencyError::new(
                segment.start_time,
                format!("segment starts at {} but previous ended at {cursor}", segment.start_time),
            ));
        }
        if segment.end_time <= segment.start_time {
            return Err(InternalInconsistencyError::new(
                segment.start_time,
                "empty or reversed segment",
            ));
        }
        cursor = segment.end_time;
    }

    for process in &timeline.processes {
        let executed: Time = timeline.segments_for(&process.id).map(|s| s.duration()).sum();
        if (executed - process.burst_time).abs() > tolerance_for(timeline.makespan()) {
            return Err(InternalInconsistencyError::new(
                timeline.makespan(),
                format!(
                    "process {} ran for {executed} but its burst is {}",
                    process.id, process.burst_time
                ),
            ));
        }
    }

    Ok(())
}

/// Aggregate figures for a whole run, as shown under a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub makespan: Time,
    pub busy_time: Time,
    pub idle_time: Time,
    /// busy / makespan (0.0 - 1.0).
    pub cpu_utilization: f64,
    pub average_turnaround_time: Time,
    pub average_waiting_time: Time,
    pub average_response_time: Time,
    pub preemptions: usize,
    /// Dispatches after the first one.
    pub context_switches: usize,
}

impl Timeline {
    pub fn summary(&self) -> TimelineSummary {
        let makespan = self.makespan();
        let busy_time: Time = self.busy_segments().map(|s| s.duration()).sum();
        let idle_time: Time = self
            .segments
            .iter()
            .filter(|s| s.is_idle())
            .map(|s| s.duration())
            .sum();

        let n = self.metrics.len().max(1) as f64;
        let mean = |f: fn(&ProcessMetrics) -> Time| self.metrics.values().map(f).sum::<Time>() / n;

        TimelineSummary {
            makespan,
            busy_time,
            idle_time,
            cpu_utilization: if makespan > 0.0 { busy_time / makespan } else { 0.0 },
            average_turnaround_time: mean(|m| m.turnaround_time),
            average_waiting_time: mean(|m| m.waiting_time),
            average_response_time: mean(|m| m.response_time),
            preemptions: self.events.iter().filter(|e| e.preempted.is_some()).count(),
            context_switches: self.busy_segments().count().saturating_sub(1),
        }
    }
}
