use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use srtf_core::{ProcessId, Time};

use super::types::Timeline;

/// Scheduler view at an arbitrary instant, reconstructed from the segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantState {
    pub time: Time,
    pub running: Option<ProcessId>,
    pub ready_queue: Vec<ProcessId>,
    /// Completed by `time`, in completion order.
    pub completed: Vec<ProcessId>,
    pub remaining: IndexMap<ProcessId, Time>,
}

impl Timeline {
    /// Reconstruct ready queue, running process and remaining times at `time`.
    ///
    /// A segment owns `[start, end)`, so at a boundary the incoming process is
    /// the running one and the outgoing one has already completed or queued.
    pub fn state_at(&self, time: Time) -> InstantState {
        let running = self
            .segments
            .iter()
            .find(|s| s.covers(time))
            .and_then(|s| s.process_id.clone());

        let mut completed: Vec<(&ProcessId, Time)> = self
            .metrics
            .iter()
            .filter(|(_, m)| m.completion_time <= time)
            .map(|(id, m)| (id, m.completion_time))
            .collect();
        completed.sort_by(|a, b| a.1.total_cmp(&b.1));

        let remaining: IndexMap<ProcessId, Time> = self
            .processes
            .iter()
            .map(|p| {
                let executed: Time = self
                    .segments_for(&p.id)
                    .filter(|s| s.start_time < time)
                    .map(|s| s.end_time.min(time) - s.start_time)
                    .sum();
                (p.id.clone(), (p.burst_time - executed).max(0.0))
            })
            .collect();

        let mut ready: Vec<(usize, &ProcessId, Time)> = self
            .processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.arrival_time <= time)
            .filter(|(_, p)| Some(&p.id) != running.as_ref())
            .filter(|(_, p)| {
                self.metrics
                    .get(&p.id)
                    .map_or(true, |m| m.completion_time > time)
            })
            .map(|(i, p)| (i, &p.id, p.arrival_time))
            .collect();
        ready.sort_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.cmp(&b.0)));

        InstantState {
            time,
            running,
            ready_queue: ready.into_iter().map(|(_, id, _)| id.clone()).collect(),
            completed: completed.into_iter().map(|(id, _)| id.clone()).collect(),
            remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compute_timeline;
    use srtf_core::{sample_processes, Process};

    #[test]
    fn mid_segment_snapshot_of_sample_workload() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        let s = timeline.state_at(6.0);
        assert_eq!(s.running.as_deref(), Some("P2"));
        assert_eq!(s.ready_queue, vec!["P1", "P4"]);
        assert_eq!(s.completed, vec!["P3"]);
        assert_eq!(s.remaining["P1"], 5.0);
        assert_eq!(s.remaining["P2"], 1.0);
        assert_eq!(s.remaining["P3"], 0.0);
        assert_eq!(s.remaining["P4"], 4.0);
    }

    #[test]
    fn boundary_belongs_to_incoming_process() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        let s = timeline.state_at(4.0);
        assert_eq!(s.running.as_deref(), Some("P3"));
        assert_eq!(s.ready_queue, vec!["P1", "P2"]);
        assert_eq!(s.remaining["P2"], 2.0);
    }

    #[test]
    fn before_start_and_after_end() {
        let timeline = compute_timeline(&[Process::new("A", 2.0, 3.0)]).unwrap();

        let s = timeline.state_at(1.0);
        assert_eq!(s.running, None);
        assert!(s.ready_queue.is_empty());
        assert_eq!(s.remaining["A"], 3.0);

        let s = timeline.state_at(100.0);
        assert_eq!(s.running, None);
        assert_eq!(s.completed, vec!["A"]);
        assert_eq!(s.remaining["A"], 0.0);
    }

    #[test]
    fn snapshots_agree_with_events() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        for event in &timeline.events {
            let s = timeline.state_at(event.time);
            assert_eq!(s.running, event.running, "running at t={}", event.time);
            assert_eq!(s.ready_queue, event.ready_queue, "ready at t={}", event.time);
            assert_eq!(s.completed, event.completed, "completed at t={}", event.time);
            assert_eq!(s.remaining, event.remaining, "remaining at t={}", event.time);
        }
    }
}
