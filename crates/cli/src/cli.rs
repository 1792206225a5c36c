use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use srtf_core::{EventMode, TieBreak};

/// Preemptive Shortest Remaining Time First simulator.
///
/// Computes the full SRTF schedule for a workload and prints the Gantt
/// chart, per-process metrics and a narrated step list (or JSON).
#[derive(Parser, Debug)]
#[command(name = "srtf", about = "Shortest Remaining Time First scheduling simulator")]
pub struct CliArgs {
    /// Workload file (.json or .toml). Uses the built-in four-process sample if omitted.
    #[arg(long, short)]
    pub input: Option<String>,

    /// Tie-break for equal remaining times: arrival-then-input or input-order.
    /// Overrides SRTF_TIE_BREAK and the config file.
    #[arg(long)]
    pub tie_break: Option<TieBreak>,

    /// Event granularity: dispatch-changes or all-decision-points.
    /// Overrides SRTF_EVENT_MODE and the config file.
    #[arg(long)]
    pub events: Option<EventMode>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<String>,

    /// Also print the scheduler state at this instant
    #[arg(long)]
    pub at: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
