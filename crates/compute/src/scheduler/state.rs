use std::cmp::Ordering;
use std::collections::BinaryHeap;

use srtf_core::{Process, ProcessState, TieBreak, Time};

use super::metrics::approx_cmp;

/// Mutable per-process bookkeeping owned by one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRuntimeState {
    pub remaining_time: Time,
    pub start_time: Option<Time>,
    pub completion_time: Option<Time>,
    /// Most recent dispatch; start of the process's open segment.
    pub last_resume_time: Option<Time>,
    pub state: ProcessState,
}

impl ProcessRuntimeState {
    pub fn new(process: &Process) -> Self {
        Self {
            remaining_time: process.burst_time,
            start_time: None,
            completion_time: None,
            last_resume_time: None,
            state: ProcessState::NotArrived,
        }
    }
}

/// A ready-set entry. Ordering is reversed so `BinaryHeap` (a max-heap)
/// pops the entry that should be dispatched first.
#[derive(Debug, Clone, Copy)]
pub struct ReadyEntry {
    pub remaining: Time,
    /// Secondary key: arrival time, or 0 when the policy ignores arrivals.
    pub tie: Time,
    /// Position in the input, the final tie-break.
    pub index: usize,
}

impl ReadyEntry {
    pub fn new(index: usize, remaining: Time, process: &Process, tie_break: TieBreak) -> Self {
        let tie = match tie_break {
            TieBreak::ArrivalThenInput => process.arrival_time,
            TieBreak::InputOrder => 0.0,
        };
        Self {
            remaining,
            tie,
            index,
        }
    }

    /// `Less` means `self` is dispatched before `other`. Remaining times
    /// within float tolerance count as equal and fall through to the
    /// tie-break.
    pub fn dispatch_order(&self, other: &Self) -> Ordering {
        approx_cmp(self.remaining, other.remaining)
            .then_with(|| self.tie.total_cmp(&other.tie))
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialEq for ReadyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dispatch_order(other) == Ordering::Equal
    }
}

impl Eq for ReadyEntry {}

impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.dispatch_order(self)
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Arrived, not completed, not running processes.
///
/// Entries never go stale: only the running process loses remaining time,
/// and it is outside the heap while it runs.
#[derive(Debug)]
pub struct ReadySet {
    heap: BinaryHeap<ReadyEntry>,
    tie_break: TieBreak,
}

impl ReadySet {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
        }
    }

    /// Build the key `process` would have with `remaining` time left.
    pub fn entry_for(&self, index: usize, remaining: Time, process: &Process) -> ReadyEntry {
        ReadyEntry::new(index, remaining, process, self.tie_break)
    }

    pub fn push(&mut self, entry: ReadyEntry) {
        self.heap.push(entry);
    }

    pub fn peek(&self) -> Option<&ReadyEntry> {
        self.heap.peek()
    }

    pub fn pop(&mut self) -> Option<ReadyEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut set: ReadySet) -> Vec<usize> {
        let mut order = Vec::new();
        while let Some(e) = set.pop() {
            order.push(e.index);
        }
        order
    }

    #[test]
    fn runtime_state_starts_unarrived_with_full_burst() {
        let state = ProcessRuntimeState::new(&Process::new("P1", 0.0, 7.0));
        assert_eq!(state.remaining_time, 7.0);
        assert_eq!(state.state, ProcessState::NotArrived);
        assert!(state.start_time.is_none());
        assert!(state.last_resume_time.is_none());
        assert!(state.completion_time.is_none());
    }

    #[test]
    fn pops_shortest_remaining_first() {
        let procs = [
            Process::new("A", 0.0, 5.0),
            Process::new("B", 0.0, 2.0),
            Process::new("C", 0.0, 3.0),
        ];
        let mut set = ReadySet::new(TieBreak::ArrivalThenInput);
        for (i, p) in procs.iter().enumerate() {
            set.push(set.entry_for(i, p.burst_time, p));
        }
        assert_eq!(set.len(), 3);
        assert_eq!(drain(set), vec![1, 2, 0]);
    }

    #[test]
    fn arrival_then_input_breaks_ties() {
        let procs = [
            Process::new("late", 3.0, 4.0),
            Process::new("early", 1.0, 4.0),
            Process::new("early2", 1.0, 4.0),
        ];
        let mut set = ReadySet::new(TieBreak::ArrivalThenInput);
        for (i, p) in procs.iter().enumerate() {
            set.push(set.entry_for(i, 4.0, p));
        }
        assert_eq!(drain(set), vec![1, 2, 0]);
    }

    #[test]
    fn input_order_ignores_arrival() {
        let procs = [Process::new("late", 3.0, 4.0), Process::new("early", 1.0, 4.0)];
        let mut set = ReadySet::new(TieBreak::InputOrder);
        for (i, p) in procs.iter().enumerate() {
            set.push(set.entry_for(i, 4.0, p));
        }
        assert_eq!(drain(set), vec![0, 1]);
    }

    #[test]
    fn fractional_remaining_times_compare_exactly() {
        let p = Process::new("x", 0.0, 1.0);
        let a = ReadyEntry::new(0, 0.25, &p, TieBreak::ArrivalThenInput);
        let b = ReadyEntry::new(1, 0.5, &p, TieBreak::ArrivalThenInput);
        assert_eq!(a.dispatch_order(&b), Ordering::Less);
        assert!(a > b, "heap order is reversed");
    }

    #[test]
    fn drifted_remaining_times_tie_by_arrival() {
        let early = Process::new("A", 1.8, 0.6);
        let late = Process::new("B", 2.3, 0.1);
        let a = ReadyEntry::new(0, 0.6 - (2.3 - 1.8), &early, TieBreak::ArrivalThenInput);
        let b = ReadyEntry::new(1, 0.1, &late, TieBreak::ArrivalThenInput);
        assert!(a.remaining > b.remaining);
        assert_eq!(a.dispatch_order(&b), Ordering::Less);
    }
}
