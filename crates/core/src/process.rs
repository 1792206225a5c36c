use serde::{Deserialize, Serialize};

/// Process identifier as given in the workload (e.g. "P1").
pub type ProcessId = String;

/// Simulated time. Real-valued so fractional workloads are supported.
pub type Time = f64;

/// A process descriptor. Immutable input to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Time,
    pub burst_time: Time,
}

impl Process {
    pub fn new(id: impl Into<ProcessId>, arrival_time: Time, burst_time: Time) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
        }
    }
}

impl std::fmt::Display for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (arrival {}, burst {})",
            self.id, self.arrival_time, self.burst_time
        )
    }
}

/// Lifecycle of a process inside one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessState {
    NotArrived,
    Ready,
    Running,
    Completed,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::NotArrived => write!(f, "NotArrived"),
            ProcessState::Ready => write!(f, "Ready"),
            ProcessState::Running => write!(f, "Running"),
            ProcessState::Completed => write!(f, "Completed"),
        }
    }
}

/// The four-process workload used by the classic SRTF walkthrough.
pub fn sample_processes() -> Vec<Process> {
    vec![
        Process::new("P1", 0.0, 7.0),
        Process::new("P2", 2.0, 4.0),
        Process::new("P3", 4.0, 1.0),
        Process::new("P4", 5.0, 4.0),
    ]
}
