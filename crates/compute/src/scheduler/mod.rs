//! Preemptive Shortest Remaining Time First scheduler engine.
//!
//! The engine is a pure function over an immutable workload: [`Scheduler`]
//! validates the input, runs a discrete-event simulation that jumps between
//! arrivals and completions, and returns a [`Timeline`] holding the Gantt
//! segments, the per-decision-point events and per-process metrics.

pub mod metrics;
pub mod runner;
pub mod snapshot;
pub mod state;
pub mod types;
pub mod validate;

pub use metrics::TimelineSummary;
pub use runner::Scheduler;
pub use snapshot::InstantState;
pub use state::ProcessRuntimeState;
pub use types::{EventReason, ExecutionSegment, ProcessMetrics, Timeline, TimelineEvent};
pub use validate::validate_processes;
