use srtf_core::{EngineConfig, Process, SrtfError, Time};
use tracing::debug;

use crate::scheduler::state::{ProcessRuntimeState, ReadySet};
use crate::scheduler::types::{ExecutionSegment, Timeline, TimelineEvent};
use crate::scheduler::validate::validate_processes;

/// The SRTF scheduler. Holds only configuration, so one instance can be
/// shared across threads and reused for any number of workloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    config: EngineConfig,
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate `processes` and simulate them to completion.
    ///
    /// All-or-nothing: on error no partial timeline is returned.
    pub fn compute(&self, processes: &[Process]) -> Result<Timeline, SrtfError> {
        validate_processes(processes)?;
        debug!(
            processes = processes.len(),
            tie_break = %self.config.tie_break,
            event_mode = %self.config.event_mode,
            "Starting SRTF simulation"
        );
        Simulation::new(processes, self.config).run()
    }
}

/// State of one in-flight simulation. Built from validated input only.
pub(crate) struct Simulation<'a> {
    pub(super) processes: &'a [Process],
    pub(super) config: EngineConfig,
    /// Indexed like `processes`.
    pub(super) states: Vec<ProcessRuntimeState>,
    /// Input indices sorted by arrival time, then input order.
    pub(super) arrival_order: Vec<usize>,
    /// Cursor into `arrival_order`: everything before it has arrived.
    pub(super) next_arrival: usize,
    pub(super) ready: ReadySet,
    pub(super) running: Option<usize>,
    pub(super) now: Time,
    /// Owner of the segment currently open (`None` = idle). A busy segment
    /// starts at the owner's `last_resume_time`.
    pub(super) segment_owner: Option<usize>,
    /// Start of the open segment while the CPU is idle.
    pub(super) idle_since: Time,
    pub(super) completion_order: Vec<usize>,
    pub(super) segments: Vec<ExecutionSegment>,
    pub(super) events: Vec<TimelineEvent>,
}

impl<'a> Simulation<'a> {
    pub(crate) fn new(processes: &'a [Process], config: EngineConfig) -> Self {
        let states = processes.iter().map(ProcessRuntimeState::new).collect();

        let mut arrival_order: Vec<usize> = (0..processes.len()).collect();
        // Stable sort keeps input order among equal arrivals.
        arrival_order.sort_by(|&a, &b| {
            processes[a]
                .arrival_time
                .total_cmp(&processes[b].arrival_time)
        });

        Self {
            processes,
            config,
            states,
            arrival_order,
            next_arrival: 0,
            ready: ReadySet::new(config.tie_break),
            running: None,
            now: 0.0,
            segment_owner: None,
            idle_since: 0.0,
            completion_order: Vec::with_capacity(processes.len()),
            segments: Vec::new(),
            events: Vec::new(),
        }
    }

    pub(super) fn all_completed(&self) -> bool {
        self.completion_order.len() == self.processes.len()
    }

    pub(super) fn id(&self, index: usize) -> &'a str {
        let processes: &'a [Process] = self.processes;
        processes[index].id.as_str()
    }
}
