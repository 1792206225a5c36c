//! SRTF simulation runner.
//!
//! Split into focused submodules:
//! - `core`: Scheduler entry point and the per-run `Simulation` state
//! - `execution`: the discrete-event loop, segment and event recording
//! - `scheduling`: arrival admission, dispatch and preemption decisions

mod core;
mod execution;
mod scheduling;

pub use self::core::Scheduler;
