use std::cmp::Ordering;

use srtf_core::{InternalInconsistencyError, ProcessState, Time};
use tracing::{debug, trace};

use crate::scheduler::metrics::approx_cmp;

use super::core::Simulation;

impl Simulation<'_> {
    /// Move every process whose arrival time has been reached into the ready
    /// set. Returns the admitted indices in arrival order.
    pub(super) fn admit_arrivals(&mut self) -> Vec<usize> {
        let mut admitted = Vec::new();
        while let Some(&index) = self.arrival_order.get(self.next_arrival) {
            let process = &self.processes[index];
            if process.arrival_time > self.now {
                break;
            }
            self.next_arrival += 1;

            let state = &mut self.states[index];
            state.state = ProcessState::Ready;
            let entry = self.ready.entry_for(index, state.remaining_time, process);
            self.ready.push(entry);
            trace!(time = self.now, process = %process.id, burst = process.burst_time, "Arrival");
            admitted.push(index);
        }
        admitted
    }

    /// Pick the process that should hold the CPU from now on.
    ///
    /// The running process competes with the same key as the ready ones, so
    /// an equal-remaining newcomer only wins when the tie-break favors it.
    /// Returns the preempted process, if any.
    pub(super) fn dispatch(&mut self) -> Result<Option<usize>, InternalInconsistencyError> {
        let Some(candidate) = self.ready.peek().copied() else {
            return Ok(None);
        };

        let Some(current) = self.running else {
            self.ready.pop();
            self.start(candidate.index)?;
            return Ok(None);
        };

        let current_entry = self.ready.entry_for(
            current,
            self.states[current].remaining_time,
            &self.processes[current],
        );
        if candidate.dispatch_order(&current_entry) != Ordering::Less {
            return Ok(None);
        }

        self.ready.pop();
        self.states[current].state = ProcessState::Ready;
        self.ready.push(current_entry);
        debug!(
            time = self.now,
            preempted = self.id(current),
            by = self.id(candidate.index),
            remaining = current_entry.remaining,
            challenger = candidate.remaining,
            "Preemption"
        );
        self.start(candidate.index)?;
        Ok(Some(current))
    }

    fn start(&mut self, index: usize) -> Result<(), InternalInconsistencyError> {
        let now = self.now;
        let state = &mut self.states[index];
        if state.state != ProcessState::Ready {
            return Err(InternalInconsistencyError::new(
                now,
                format!(
                    "dispatched process {} while it was {}",
                    self.processes[index].id, state.state
                ),
            ));
        }
        state.state = ProcessState::Running;
        state.start_time.get_or_insert(now);
        state.last_resume_time = Some(now);
        self.running = Some(index);
        debug!(
            time = now,
            process = self.id(index),
            remaining = self.states[index].remaining_time,
            waiting = self.ready.len(),
            "Dispatch"
        );
        Ok(())
    }

    /// The next arrival or the running process's completion, whichever is
    /// sooner. A completion within tolerance of the arrival lands on the
    /// arrival instant. `None` once nothing is running and nothing is left
    /// to arrive.
    pub(super) fn next_decision_time(&self) -> Option<Time> {
        let arrival = self
            .arrival_order
            .get(self.next_arrival)
            .map(|&i| self.processes[i].arrival_time);
        let completion = self
            .running
            .map(|i| self.now + self.states[i].remaining_time);

        match (arrival, completion) {
            (Some(a), Some(c)) if approx_cmp(c, a) == Ordering::Less => Some(c),
            (Some(a), Some(_)) => Some(a),
            (a, c) => a.or(c),
        }
    }
}
