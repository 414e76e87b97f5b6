//! # Chunkbench - Main Entry Point
//!
//! The binary wires the pieces together in a straight line:
//!
//! 1. **Initialize logging**: colorized tracing output, level from the CLI
//! 2. **Parse arguments**: sweep parameters and executable paths
//! 3. **Pre-flight check**: both executables under test must exist on disk
//! 4. **Load settings**: `num_repetitions` from the settings file
//! 5. **Run the sweep**: sequential trials per chunk size
//! 6. **Persist results**: CSV table consumed by the plot script
//! 7. **Invoke the renderer**: external `plot.py` unless `--skip-plot`
//!
//! The pre-flight check is the only fatal failure mode: without the
//! executables no trial can possibly succeed, so the harness prints a
//! diagnostic and exits before running anything. Everything after that
//! degrades per-trial rather than aborting.

use anyhow::Result;
use chunkbench::{
    cli::Args, config::FileConfig, logging, results::ResultsWriter, sweep::SweepConfig,
    sweep::SweepController,
};
use clap::Parser;
use std::path::Path;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    info!("Starting chunk-size sweep benchmark");

    // Pre-flight: missing executables make every trial pointless. The exit
    // is deliberately a soft no-op (status 0), matching how this harness
    // has always behaved under automation.
    if !args.server.exists() || !args.client.exists() {
        error!(
            "Executables not found ({} / {}). Please run 'make build' first.",
            args.server.display(),
            args.client.display()
        );
        return Ok(());
    }

    let file_config = FileConfig::load(&args.config)?;
    let config = SweepConfig::from_args(&args, &file_config);
    info!(
        "Sweeping k over {:?} with {} repetitions each",
        config.k_values, config.repetitions
    );

    let table = SweepController::new(config).run().await;

    ResultsWriter::new(&args.output_file).write(&table)?;

    if args.skip_plot {
        info!("Skipping plot generation");
    } else {
        render_plot(&args.plot_script).await;
    }

    info!("Sweep completed");
    Ok(())
}

/// Invoke the external plot script over the freshly written results.
///
/// Rendering is a collaborator, not part of the harness, so a failing or
/// absent script is only a warning.
async fn render_plot(script: &Path) {
    info!("Generating plot...");

    match tokio::process::Command::new("python3")
        .arg(script)
        .status()
        .await
    {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("Plot script {} exited with {}", script.display(), status),
        Err(e) => warn!("Failed to invoke plot script {}: {}", script.display(), e),
    }
}
