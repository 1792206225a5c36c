use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use srtf_core::{Process, ProcessId, Time};

/// One contiguous interval of CPU ownership. `process_id == None` is idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSegment {
    pub process_id: Option<ProcessId>,
    pub start_time: Time,
    pub end_time: Time,
}

impl ExecutionSegment {
    pub fn duration(&self) -> Time {
        self.end_time - self.start_time
    }

    pub fn is_idle(&self) -> bool {
        self.process_id.is_none()
    }

    /// Whether `time` falls inside `[start, end)`.
    pub fn covers(&self, time: Time) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

/// Why the dispatcher emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventReason {
    /// The CPU was idle (or the run just started) and a process was dispatched.
    Dispatch,
    /// A newly arrived process took the CPU from the running one.
    Preemption,
    /// The running process finished and another one was dispatched.
    Completion,
    /// Nothing is ready to run.
    Idle,
    /// A process arrived but the running process kept the CPU.
    Arrival,
    /// The last process finished.
    Finished,
}

impl std::fmt::Display for EventReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventReason::Dispatch => write!(f, "Dispatch"),
            EventReason::Preemption => write!(f, "Preemption"),
            EventReason::Completion => write!(f, "Completion"),
            EventReason::Idle => write!(f, "Idle"),
            EventReason::Arrival => write!(f, "Arrival"),
            EventReason::Finished => write!(f, "Finished"),
        }
    }
}

/// Scheduler view at one decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub time: Time,
    #[serde(rename = "runningProcessId")]
    pub running: Option<ProcessId>,
    /// Ready processes (excluding the running one), by arrival then input order.
    pub ready_queue: Vec<ProcessId>,
    /// Completed processes in completion order.
    pub completed: Vec<ProcessId>,
    /// Remaining time of every process, in input order.
    #[serde(rename = "perProcessRemaining")]
    pub remaining: IndexMap<ProcessId, Time>,
    pub reason: EventReason,
    /// Processes that arrived at exactly this instant.
    pub arrivals: Vec<ProcessId>,
    pub completed_now: Option<ProcessId>,
    pub preempted: Option<ProcessId>,
}

/// Per-process results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    pub arrival_time: Time,
    pub burst_time: Time,
    /// First dispatch.
    pub start_time: Time,
    pub completion_time: Time,
    pub turnaround_time: Time,
    pub waiting_time: Time,
    pub response_time: Time,
}

/// Full engine output. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// The validated input, in input order.
    pub processes: Vec<Process>,
    /// Gantt chart, contiguous from time 0.
    pub segments: Vec<ExecutionSegment>,
    pub events: Vec<TimelineEvent>,
    /// Keyed by process id, in input order.
    pub metrics: IndexMap<ProcessId, ProcessMetrics>,
}

impl Timeline {
    /// End of the last segment (the largest completion time).
    pub fn makespan(&self) -> Time {
        self.segments.last().map(|s| s.end_time).unwrap_or(0.0)
    }

    /// Segments belonging to one process, in time order.
    pub fn segments_for<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a ExecutionSegment> + 'a {
        self.segments
            .iter()
            .filter(move |s| s.process_id.as_deref() == Some(id))
    }

    /// Non-idle segments only, i.e. the rows of a per-process Gantt chart.
    pub fn busy_segments(&self) -> impl Iterator<Item = &ExecutionSegment> {
        self.segments.iter().filter(|s| !s.is_idle())
    }

    pub fn process(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }
}
