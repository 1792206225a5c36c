use indexmap::IndexMap;
use srtf_core::{EventMode, InternalInconsistencyError, ProcessState, SrtfError, Time};
use tracing::debug;

use crate::scheduler::metrics::{derive_metrics, tolerance_for, verify_timeline};
use crate::scheduler::types::{EventReason, ExecutionSegment, Timeline, TimelineEvent};

use super::core::Simulation;

impl Simulation<'_> {
    /// Discrete-event loop: jump from one decision point (arrival or
    /// completion) to the next until every process has completed.
    pub(crate) fn run(mut self) -> Result<Timeline, SrtfError> {
        let mut completed_now: Option<usize> = None;
        let mut first = true;

        loop {
            let arrivals = self.admit_arrivals();
            let preempted = self.dispatch()?;

            let changed = first || self.running != self.segment_owner;
            if changed {
                self.switch_segment()?;
            }

            let finished = self.all_completed();
            let emit = changed
                || finished
                || self.config.event_mode == EventMode::AllDecisionPoints;
            if emit {
                let reason = self.reason(finished, changed, completed_now, preempted);
                self.record_event(reason, &arrivals, completed_now, preempted);
            }

            if finished {
                break;
            }

            let next = self.next_decision_time().ok_or_else(|| {
                InternalInconsistencyError::new(
                    self.now,
                    "no further decision point but processes remain unfinished",
                )
            })?;
            completed_now = self.advance_to(next)?;
            first = false;
        }

        debug!(
            makespan = self.now,
            segments = self.segments.len(),
            events = self.events.len(),
            "SRTF simulation complete"
        );
        self.into_timeline()
    }

    /// Run the current process (if any) until `next`. Returns the process
    /// that completed at `next`, if one did. Remaining time within tolerance
    /// of zero counts as complete, so float drift never leaves a sliver of
    /// work behind.
    fn advance_to(&mut self, next: Time) -> Result<Option<usize>, InternalInconsistencyError> {
        if next < self.now {
            return Err(InternalInconsistencyError::new(
                self.now,
                format!("time would move backwards to {next}"),
            ));
        }
        let elapsed = next - self.now;
        let mut completed = None;

        if let Some(index) = self.running {
            let state = &mut self.states[index];
            let finish_at = self.now + state.remaining_time;
            let remaining = state.remaining_time - elapsed;

            if next >= finish_at || remaining <= tolerance_for(next) {
                if state.completion_time.is_some() {
                    return Err(InternalInconsistencyError::new(
                        next,
                        format!("process {} completed twice", self.processes[index].id),
                    ));
                }
                state.remaining_time = 0.0;
                state.completion_time = Some(next);
                state.state = ProcessState::Completed;
                self.running = None;
                self.completion_order.push(index);
                completed = Some(index);
                debug!(time = next, process = self.id(index), "Completion");
            } else {
                state.remaining_time = remaining;
            }
        }

        self.now = next;
        Ok(completed)
    }

    /// Close the open segment at `now` and open one for the running process.
    /// A busy segment starts at its owner's last dispatch.
    fn switch_segment(&mut self) -> Result<(), InternalInconsistencyError> {
        let start = match self.segment_owner {
            Some(owner) => self.states[owner].last_resume_time.ok_or_else(|| {
                InternalInconsistencyError::new(
                    self.now,
                    format!("process {} owns a segment but was never dispatched", self.id(owner)),
                )
            })?,
            None => self.idle_since,
        };
        if self.now > start {
            self.segments.push(ExecutionSegment {
                process_id: self.segment_owner.map(|i| self.processes[i].id.clone()),
                start_time: start,
                end_time: self.now,
            });
        }
        self.segment_owner = self.running;
        if self.running.is_none() {
            self.idle_since = self.now;
        }
        Ok(())
    }

    fn reason(
        &self,
        finished: bool,
        changed: bool,
        completed_now: Option<usize>,
        preempted: Option<usize>,
    ) -> EventReason {
        if finished {
            EventReason::Finished
        } else if self.running.is_none() {
            EventReason::Idle
        } else if completed_now.is_some() {
            EventReason::Completion
        } else if preempted.is_some() {
            EventReason::Preemption
        } else if changed {
            EventReason::Dispatch
        } else {
            EventReason::Arrival
        }
    }

    fn record_event(
        &mut self,
        reason: EventReason,
        arrivals: &[usize],
        completed_now: Option<usize>,
        preempted: Option<usize>,
    ) {
        let ready_queue = self.arrival_order[..self.next_arrival]
            .iter()
            .filter(|&&i| self.states[i].state == ProcessState::Ready)
            .map(|&i| self.processes[i].id.clone())
            .collect();

        let remaining: IndexMap<_, _> = self
            .processes
            .iter()
            .zip(&self.states)
            .map(|(p, s)| (p.id.clone(), s.remaining_time))
            .collect();

        let event = TimelineEvent {
            time: self.now,
            running: self.running.map(|i| self.processes[i].id.clone()),
            ready_queue,
            completed: self
                .completion_order
                .iter()
                .map(|&i| self.processes[i].id.clone())
                .collect(),
            remaining,
            reason,
            arrivals: arrivals.iter().map(|&i| self.processes[i].id.clone()).collect(),
            completed_now: completed_now.map(|i| self.processes[i].id.clone()),
            preempted: preempted.map(|i| self.processes[i].id.clone()),
        };
        debug!(time = event.time, reason = %reason, running = ?event.running, "Timeline event");
        self.events.push(event);
    }

    fn into_timeline(self) -> Result<Timeline, SrtfError> {
        let metrics = derive_metrics(self.processes, &self.states)?;
        let timeline = Timeline {
            processes: self.processes.to_vec(),
            segments: self.segments,
            events: self.events,
            metrics,
        };
        verify_timeline(&timeline)?;
        Ok(timeline)
    }
}
