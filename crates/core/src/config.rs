use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Parse an env var into `T`, falling back to `default` (with a warning) when
/// the value is present but unparseable.
fn env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr<Err = String>,
{
    match env_opt(key) {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid env value");
            default
        }),
        None => default,
    }
}

// ── Tie-break policy ──────────────────────────────────────────

/// How to order ready processes whose remaining times are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Earliest arrival time wins, then earliest position in the input.
    #[default]
    ArrivalThenInput,
    /// Earliest position in the input wins, arrival time is ignored.
    InputOrder,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::ArrivalThenInput => write!(f, "arrival-then-input"),
            TieBreak::InputOrder => write!(f, "input-order"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrival-then-input" | "arrival" => Ok(TieBreak::ArrivalThenInput),
            "input-order" | "input" => Ok(TieBreak::InputOrder),
            other => Err(format!(
                "unknown tie-break policy '{other}' (expected arrival-then-input or input-order)"
            )),
        }
    }
}

// ── Event granularity ─────────────────────────────────────────

/// Which decision points produce a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventMode {
    /// Only when the running process changes (plus the first and last instant).
    #[default]
    DispatchChanges,
    /// Every arrival and completion, even when the running process is kept.
    AllDecisionPoints,
}

impl std::fmt::Display for EventMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventMode::DispatchChanges => write!(f, "dispatch-changes"),
            EventMode::AllDecisionPoints => write!(f, "all-decision-points"),
        }
    }
}

impl FromStr for EventMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dispatch-changes" | "dispatch" => Ok(EventMode::DispatchChanges),
            "all-decision-points" | "all" => Ok(EventMode::AllDecisionPoints),
            other => Err(format!(
                "unknown event mode '{other}' (expected dispatch-changes or all-decision-points)"
            )),
        }
    }
}

// ── Engine config ─────────────────────────────────────────────

/// Engine configuration, typically parsed from TOML or built from env.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub tie_break: TieBreak,
    #[serde(default)]
    pub event_mode: EventMode,
}

pub const TIE_BREAK_ENV: &str = "SRTF_TIE_BREAK";
pub const EVENT_MODE_ENV: &str = "SRTF_EVENT_MODE";

impl EngineConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Unset keys keep their defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `SRTF_*` env overrides on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        Self {
            tie_break: env_parsed(TIE_BREAK_ENV, self.tie_break),
            event_mode: env_parsed(EVENT_MODE_ENV, self.event_mode),
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_event_mode(mut self, event_mode: EventMode) -> Self {
        self.event_mode = event_mode;
        self
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Engine config:");
        tracing::info!("  tie_break:   {}", self.tie_break);
        tracing::info!("  event_mode:  {}", self.event_mode);
    }
}
