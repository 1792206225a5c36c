mod cli;
mod config;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use srtf_compute::Scheduler;
use srtf_core::{config::load_dotenv, sample_processes, workload};

use crate::cli::{CliArgs, OutputFormat};
use crate::config::CliConfig;

fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    let engine = config.resolve_engine(&args);
    let format = config.resolve_format(&args);
    engine.log_summary();

    let processes = match args.input.as_deref() {
        Some(path) => workload::load_processes(path)
            .with_context(|| format!("failed to load workload '{}'", path))?,
        None => {
            info!("No --input given, using the built-in sample workload");
            sample_processes()
        }
    };
    info!(count = processes.len(), "Workload ready");

    let timeline = Scheduler::new(engine)
        .compute(&processes)
        .context("scheduling failed")?;
    let snapshot = args.at.map(|t| timeline.state_at(t));

    match format {
        OutputFormat::Text => print!("{}", render::render_text(&timeline, snapshot.as_ref())),
        OutputFormat::Json => println!(
            "{}",
            render::render_json(&timeline, snapshot.as_ref())
                .context("failed to serialize timeline")?
        ),
    }

    Ok(())
}
