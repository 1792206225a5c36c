pub mod config;
pub mod error;
pub mod process;
pub mod workload;

pub use config::{EngineConfig, EventMode, TieBreak};
pub use error::*;
pub use process::*;
