use std::fmt::Write;

use serde::Serialize;
use srtf_compute::{InstantState, Timeline, TimelineSummary};

/// JSON document: the timeline plus its summary.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    timeline: &'a Timeline,
    summary: TimelineSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<&'a InstantState>,
}

pub fn render_json(timeline: &Timeline, snapshot: Option<&InstantState>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Report {
        timeline,
        summary: timeline.summary(),
        snapshot,
    })
}

/// Gantt listing, metrics table, summary and narrated steps.
pub fn render_text(timeline: &Timeline, snapshot: Option<&InstantState>) -> String {
    let mut out = String::new();

    out.push_str("Gantt chart\n");
    for segment in &timeline.segments {
        let _ = writeln!(
            out,
            "  [{:>7} - {:>7}]  {}",
            segment.start_time,
            segment.end_time,
            segment.process_id.as_deref().unwrap_or("(idle)")
        );
    }

    out.push_str("\nProcesses\n");
    let _ = writeln!(
        out,
        "  {:<10} {:>8} {:>8} {:>11} {:>11} {:>8} {:>9}",
        "id", "arrival", "burst", "completion", "turnaround", "waiting", "response"
    );
    for (id, m) in &timeline.metrics {
        let _ = writeln!(
            out,
            "  {:<10} {:>8} {:>8} {:>11} {:>11} {:>8} {:>9}",
            id,
            m.arrival_time,
            m.burst_time,
            m.completion_time,
            m.turnaround_time,
            m.waiting_time,
            m.response_time
        );
    }

    let s = timeline.summary();
    let _ = writeln!(
        out,
        "\nmakespan {}  |  cpu utilization {:.1}%  |  avg turnaround {:.2}  |  avg waiting {:.2}  |  avg response {:.2}  |  preemptions {}",
        s.makespan,
        s.cpu_utilization * 100.0,
        s.average_turnaround_time,
        s.average_waiting_time,
        s.average_response_time,
        s.preemptions
    );

    out.push_str("\nSteps\n");
    for (event, text) in timeline.events.iter().zip(timeline.narrate()) {
        let _ = writeln!(out, "  t={:<6} {}", event.time, text);
    }

    if let Some(state) = snapshot {
        let _ = writeln!(out, "\nState at t={}", state.time);
        let _ = writeln!(
            out,
            "  running:   {}",
            state.running.as_deref().unwrap_or("(idle)")
        );
        let _ = writeln!(out, "  ready:     [{}]", state.ready_queue.join(", "));
        let _ = writeln!(out, "  completed: [{}]", state.completed.join(", "));
        let remaining: Vec<String> = state
            .remaining
            .iter()
            .map(|(id, r)| format!("{id}={r}"))
            .collect();
        let _ = writeln!(out, "  remaining: {}", remaining.join(" "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use srtf_compute::compute_timeline;
    use srtf_core::sample_processes;

    #[test]
    fn text_contains_every_section() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        let snapshot = timeline.state_at(6.0);
        let text = render_text(&timeline, Some(&snapshot));

        assert!(text.contains("Gantt chart"));
        assert_eq!(text.matches("]  P").count(), 6);
        assert!(text.contains("makespan 16"));
        assert!(text.contains("preemptions 2"));
        assert!(text.contains("All processes have finished."));
        assert!(text.contains("ready:     [P1, P4]"));
    }

    #[test]
    fn idle_segments_are_labelled() {
        let timeline = compute_timeline(&[srtf_core::Process::new("A", 1.0, 1.0)]).unwrap();
        assert!(render_text(&timeline, None).contains("(idle)"));
    }

    #[test]
    fn json_has_timeline_and_summary() {
        let timeline = compute_timeline(&sample_processes()).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&timeline, None).unwrap()).unwrap();
        assert_eq!(json["segments"].as_array().unwrap().len(), 6);
        assert_eq!(json["summary"]["makespan"], 16.0);
        assert_eq!(json["summary"]["averageWaitingTime"], 3.0);
        assert!(json.get("snapshot").is_none());
    }
}
