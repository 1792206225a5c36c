use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use srtf_core::EngineConfig;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::{CliArgs, OutputFormat};

/// CLI configuration loaded from a TOML file.
///
/// ```toml
/// format = "json"
///
/// [engine]
/// tie_break = "input-order"
/// event_mode = "all-decision-points"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Output format when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,

    /// Engine settings (tie-break, event granularity)
    #[serde(default)]
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Load config from the given path, or defaults when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let config_path = PathBuf::from(path);
        debug!(?config_path, "Loading config");
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
        Ok(config)
    }

    /// Final engine settings.
    /// Priority: CLI flag > SRTF_* env var > config file > defaults.
    pub fn resolve_engine(&self, args: &CliArgs) -> EngineConfig {
        let mut engine = self.engine.with_env_overrides();
        if let Some(tie_break) = args.tie_break {
            engine.tie_break = tie_break;
        }
        if let Some(event_mode) = args.events {
            engine.event_mode = event_mode;
        }
        engine
    }

    /// Priority: CLI flag > config file > text.
    pub fn resolve_format(&self, args: &CliArgs) -> OutputFormat {
        args.format.unwrap_or(self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use srtf_core::{EventMode, TieBreak};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "format = \"json\"\n\n[engine]\ntie_break = \"input-order\"\nevent_mode = \"all-decision-points\""
        )
        .unwrap();

        let config = CliConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.engine.tie_break, TieBreak::InputOrder);
        assert_eq!(config.engine.event_mode, EventMode::AllDecisionPoints);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nevent_mode = \"all-decision-points\"").unwrap();

        let config = CliConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.engine.tie_break, TieBreak::ArrivalThenInput);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = CliConfig::load(path.to_str()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read config"));
    }

    #[test]
    fn test_flags_override_file() {
        let config = CliConfig {
            format: OutputFormat::Json,
            engine: EngineConfig::default().with_event_mode(EventMode::AllDecisionPoints),
        };
        let args = CliArgs::try_parse_from(["srtf", "--format", "text", "--events", "dispatch"]).unwrap();
        assert_eq!(config.resolve_format(&args), OutputFormat::Text);
        assert_eq!(config.resolve_engine(&args).event_mode, EventMode::DispatchChanges);

        let args = CliArgs::try_parse_from(["srtf"]).unwrap();
        assert_eq!(config.resolve_format(&args), OutputFormat::Json);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CliConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
