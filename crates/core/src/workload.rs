//! Workload files: a list of processes stored as JSON or TOML.
//!
//! Loading only decodes. Validation (unique ids, positive bursts, ...) is the
//! engine's job so that every entry point rejects bad input the same way.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::SrtfError;
use crate::process::Process;

/// `{ "processes": [...] }` / `[[processes]]` wrapper.
#[derive(Debug, Deserialize)]
struct WorkloadFile {
    processes: Vec<Process>,
}

/// JSON accepts either a bare array or the wrapped form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonWorkload {
    Bare(Vec<Process>),
    Wrapped(WorkloadFile),
}

/// Load a workload from disk, picking the decoder from the file extension.
pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<Process>, SrtfError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    // Reject the format before touching the filesystem.
    if extension != "json" && extension != "toml" {
        return Err(SrtfError::UnsupportedFormat(path.display().to_string()));
    }

    debug!(path = %path.display(), "Loading workload");
    let content = std::fs::read_to_string(path)?;
    let processes = if extension == "json" {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };
    debug!(count = processes.len(), "Workload loaded");
    Ok(processes)
}

pub fn parse_json(content: &str) -> Result<Vec<Process>, SrtfError> {
    let workload: JsonWorkload =
        serde_json::from_str(content).map_err(|e| SrtfError::Parse(e.to_string()))?;
    Ok(match workload {
        JsonWorkload::Bare(processes) => processes,
        JsonWorkload::Wrapped(file) => file.processes,
    })
}

pub fn parse_toml(content: &str) -> Result<Vec<Process>, SrtfError> {
    let file: WorkloadFile = toml::from_str(content).map_err(|e| SrtfError::Parse(e.to_string()))?;
    Ok(file.processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_bare_json_array() {
        let file = write_temp(
            ".json",
            r#"[{"id":"A","arrivalTime":0,"burstTime":3},{"id":"B","arrivalTime":1.5,"burstTime":2}]"#,
        );
        let processes = load_processes(file.path()).unwrap();
        assert_eq!(
            processes,
            vec![Process::new("A", 0.0, 3.0), Process::new("B", 1.5, 2.0)]
        );
    }

    #[test]
    fn load_wrapped_json() {
        let file = write_temp(
            ".JSON",
            r#"{"processes":[{"id":"A","arrivalTime":0,"burstTime":3}]}"#,
        );
        let processes = load_processes(file.path()).unwrap();
        assert_eq!(processes, vec![Process::new("A", 0.0, 3.0)]);
    }

    #[test]
    fn load_toml_tables() {
        let file = write_temp(
            ".toml",
            r#"
[[processes]]
id = "P1"
arrivalTime = 0
burstTime = 7

[[processes]]
id = "P2"
arrivalTime = 2.0
burstTime = 4.0
"#,
        );
        let processes = load_processes(file.path()).unwrap();
        assert_eq!(
            processes,
            vec![Process::new("P1", 0.0, 7.0), Process::new("P2", 2.0, 4.0)]
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_processes("workload.yaml").unwrap_err();
        assert!(matches!(err, SrtfError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_processes(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SrtfError::Io(_)));
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let err = parse_json(r#"[{"id":"A","arrivalTime":"soon"}]"#).unwrap_err();
        assert!(matches!(err, SrtfError::Parse(_)));
        let err = parse_toml("processes = 3").unwrap_err();
        assert!(matches!(err, SrtfError::Parse(_)));
    }
}
