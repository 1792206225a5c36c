//! Plain-language descriptions of timeline events, one sentence group per
//! step, e.g. "Process P2 arrives at time 2 with burst time 4. P2 has shorter
//! remaining time than P1 (4 < 5), so P1 is preempted."

use srtf_core::Time;

use crate::scheduler::{EventReason, Timeline, TimelineEvent};

impl Timeline {
    /// One description per event, in event order.
    pub fn narrate(&self) -> Vec<String> {
        (0..self.events.len()).map(|i| describe(self, i)).collect()
    }
}

/// Describe `timeline.events[index]`. Out-of-range indices yield an empty string.
pub fn describe(timeline: &Timeline, index: usize) -> String {
    let Some(event) = timeline.events.get(index) else {
        return String::new();
    };

    let mut parts = Vec::new();

    if let Some(done) = &event.completed_now {
        parts.push(format!("Process {done} completes execution."));
    }
    for id in &event.arrivals {
        let burst = timeline.process(id).map(|p| p.burst_time).unwrap_or_default();
        parts.push(format!(
            "Process {id} arrives at time {} with burst time {burst}.",
            event.time
        ));
    }

    match event.reason {
        EventReason::Finished => parts.push("All processes have finished.".to_string()),
        EventReason::Idle => parts.push(match next_arrival_after(timeline, event.time) {
            Some(t) => format!("No process is ready, so the CPU is idle until time {t}."),
            None => "No process is ready, so the CPU is idle.".to_string(),
        }),
        EventReason::Preemption => {
            if let (Some(run), Some(pre)) = (&event.running, &event.preempted) {
                parts.push(format!(
                    "{run} has shorter remaining time than {pre} ({} < {}), so {pre} is preempted.",
                    remaining(event, run),
                    remaining(event, pre)
                ));
            }
        }
        EventReason::Dispatch | EventReason::Completion => {
            if let Some(run) = &event.running {
                parts.push(dispatch_sentence(timeline, event, run));
            }
        }
        EventReason::Arrival => {
            if let Some(run) = &event.running {
                let challenger = event
                    .arrivals
                    .iter()
                    .map(|id| remaining(event, id))
                    .min_by(|a, b| a.total_cmp(b));
                parts.push(match challenger {
                    Some(c) => format!(
                        "{run} keeps running ({} {} {c}).",
                        remaining(event, run),
                        relation(remaining(event, run), c)
                    ),
                    None => format!("{run} keeps running."),
                });
            }
        }
    }

    parts.join(" ")
}

fn dispatch_sentence(timeline: &Timeline, event: &TimelineEvent, run: &str) -> String {
    let run_remaining = remaining(event, run);
    let ran_before = timeline
        .process(run)
        .is_some_and(|p| run_remaining < p.burst_time);
    let verb = if ran_before { "resumes" } else { "starts" };

    let shortest_other = event
        .ready_queue
        .iter()
        .map(|id| remaining(event, id))
        .min_by(|a, b| a.total_cmp(b));

    match shortest_other {
        Some(other) => format!(
            "{run} has shortest remaining time ({run_remaining} {} {other}), so it {verb} execution.",
            relation(run_remaining, other)
        ),
        None if event.reason == EventReason::Completion => {
            format!("{run} is the only remaining process, so it {verb} execution.")
        }
        None => format!("{run} {verb} execution."),
    }
}

fn remaining(event: &TimelineEvent, id: &str) -> Time {
    event.remaining.get(id).copied().unwrap_or_default()
}

fn relation(a: Time, b: Time) -> &'static str {
    if a < b {
        "<"
    } else if a == b {
        "="
    } else {
        ">"
    }
}

fn next_arrival_after(timeline: &Timeline, time: Time) -> Option<Time> {
    timeline
        .processes
        .iter()
        .map(|p| p.arrival_time)
        .filter(|&t| t > time)
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_timeline, compute_timeline_with};
    use srtf_core::{sample_processes, EngineConfig, EventMode, Process};

    #[test]
    fn narrates_sample_walkthrough() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        let steps = timeline.narrate();
        assert_eq!(
            steps,
            vec![
                "Process P1 arrives at time 0 with burst time 7. P1 starts execution.",
                "Process P2 arrives at time 2 with burst time 4. P2 has shorter remaining time than P1 (4 < 5), so P1 is preempted.",
                "Process P3 arrives at time 4 with burst time 1. P3 has shorter remaining time than P2 (1 < 2), so P2 is preempted.",
                "Process P3 completes execution. Process P4 arrives at time 5 with burst time 4. P2 has shortest remaining time (2 < 4), so it resumes execution.",
                "Process P2 completes execution. P4 has shortest remaining time (4 < 5), so it starts execution.",
                "Process P4 completes execution. P1 is the only remaining process, so it resumes execution.",
                "Process P1 completes execution. All processes have finished.",
            ]
        );
    }

    #[test]
    fn narrates_idle_gap() {
        let timeline =
            compute_timeline(&[Process::new("A", 0.0, 1.0), Process::new("B", 3.0, 1.0)]).unwrap();
        let steps = timeline.narrate();
        assert_eq!(
            steps[1],
            "Process A completes execution. No process is ready, so the CPU is idle until time 3."
        );
        assert_eq!(steps[2], "Process B arrives at time 3 with burst time 1. B starts execution.");
    }

    #[test]
    fn narrates_arrival_without_preemption() {
        let config = EngineConfig::default().with_event_mode(EventMode::AllDecisionPoints);
        let timeline =
            compute_timeline_with(&[Process::new("A", 0.0, 3.0), Process::new("B", 1.0, 5.0)], &config)
                .unwrap();
        assert_eq!(
            describe(&timeline, 1),
            "Process B arrives at time 1 with burst time 5. A keeps running (2 < 5)."
        );
    }

    #[test]
    fn out_of_range_index_is_empty() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        assert_eq!(describe(&timeline, 99), "");
    }
}
