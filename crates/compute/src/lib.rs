pub mod narration;
pub mod scheduler;

use srtf_core::{EngineConfig, Process, SrtfError};

pub use scheduler::{
    EventReason, ExecutionSegment, InstantState, ProcessMetrics, Scheduler, Timeline,
    TimelineEvent, TimelineSummary,
};

/// Simulate `processes` under SRTF with the default configuration.
pub fn compute_timeline(processes: &[Process]) -> Result<Timeline, SrtfError> {
    Scheduler::default().compute(processes)
}

/// Simulate `processes` under SRTF with an explicit configuration.
pub fn compute_timeline_with(
    processes: &[Process],
    config: &EngineConfig,
) -> Result<Timeline, SrtfError> {
    Scheduler::new(*config).compute(processes)
}
