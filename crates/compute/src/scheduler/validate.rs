use std::collections::HashSet;

use srtf_core::{InvalidInputError, Process};

/// Reject malformed workloads before any simulation state is built.
///
/// Checks run per process in input order, so the first offending process is
/// the one reported.
pub fn validate_processes(processes: &[Process]) -> Result<(), InvalidInputError> {
    if processes.is_empty() {
        return Err(InvalidInputError::Empty);
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(processes.len());
    for (index, p) in processes.iter().enumerate() {
        if p.id.trim().is_empty() {
            return Err(InvalidInputError::EmptyId { index });
        }
        if !seen.insert(p.id.as_str()) {
            return Err(InvalidInputError::DuplicateId(p.id.clone()));
        }
        if !p.arrival_time.is_finite() {
            return Err(InvalidInputError::NonFiniteTime {
                id: p.id.clone(),
                field: "arrival time",
            });
        }
        if !p.burst_time.is_finite() {
            return Err(InvalidInputError::NonFiniteTime {
                id: p.id.clone(),
                field: "burst time",
            });
        }
        if p.arrival_time < 0.0 {
            return Err(InvalidInputError::NegativeArrival {
                id: p.id.clone(),
                arrival_time: p.arrival_time,
            });
        }
        if p.burst_time <= 0.0 {
            return Err(InvalidInputError::NonPositiveBurst {
                id: p.id.clone(),
                burst_time: p.burst_time,
            });
        }
    }

    Ok(())
}
