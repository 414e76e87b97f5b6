//! Sweep orchestration across chunk sizes and repetitions.
//!
//! The [`SweepController`] drives the full experiment: for each configured
//! chunk size it runs the trial executor a fixed number of times, collects
//! the successful durations, and folds them into one result row. Trials are
//! strictly sequential; the next trial's server is not started until the
//! previous one has been confirmed terminated, because consecutive servers
//! bind the same port.
//!
//! Failure isolation is the controller's main job: a failed trial simply
//! contributes no sample, and a chunk size that loses every repetition is
//! dropped from the result table with a warning instead of aborting the
//! sweep.

use crate::{
    cli::Args,
    config::FileConfig,
    stats::{aggregate, AggregateResult},
    trial::{TrialExecutor, TrialOutcome},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for one full sweep.
///
/// Built once in `main` from the CLI arguments and the settings file, then
/// handed to the controller by value. There is deliberately no process-wide
/// configuration state.
#[derive(Clone, Debug)]
pub struct SweepConfig {
    /// Ordered chunk sizes to test, each visited exactly once.
    pub k_values: Vec<u32>,

    /// Number of trials per chunk size. Failed trials are not re-run.
    pub repetitions: usize,

    /// Path to the server executable under test.
    pub server_path: PathBuf,

    /// Path to the client executable under test.
    pub client_path: PathBuf,

    /// Delay between starting the server and launching the client.
    pub startup_delay: Duration,

    /// Hard upper bound on a single client run.
    pub client_timeout: Duration,
}

impl SweepConfig {
    /// Build the sweep configuration from CLI arguments and the settings
    /// file. A `--repetitions` flag takes precedence over the file value.
    pub fn from_args(args: &Args, file_config: &FileConfig) -> Self {
        Self {
            k_values: args.k_values.clone(),
            repetitions: args
                .repetitions
                .map(|r| r as usize)
                .unwrap_or(file_config.num_repetitions),
            server_path: args.server.clone(),
            client_path: args.client.clone(),
            startup_delay: args.startup_delay,
            client_timeout: args.client_timeout,
        }
    }
}

/// Drives the experiment and assembles the result table.
pub struct SweepController {
    config: SweepConfig,
}

impl SweepController {
    /// Create a controller for the given configuration.
    pub fn new(config: SweepConfig) -> Self {
        Self { config }
    }

    /// Run the full sweep and return the result table in sweep order.
    ///
    /// One row per chunk size with at least one successful trial; chunk
    /// sizes with zero successes are omitted. This method never fails: all
    /// per-trial trouble is absorbed by the trial executor.
    pub async fn run(&self) -> Vec<AggregateResult> {
        let executor = TrialExecutor::new(
            &self.config.server_path,
            &self.config.client_path,
            self.config.startup_delay,
            self.config.client_timeout,
        );

        let repetitions = self.config.repetitions;
        let mut table = Vec::with_capacity(self.config.k_values.len());

        for &k in &self.config.k_values {
            info!("--- Testing with k = {k} ---");
            let mut samples = Vec::with_capacity(repetitions);

            for rep in 1..=repetitions {
                // The executor returns only after its server has been
                // reaped, which keeps consecutive trials off each other's
                // port.
                match executor.run(k).await {
                    TrialOutcome::Success(duration_ms) => {
                        info!("  Run {rep}/{repetitions}: {duration_ms:.2} ms");
                        samples.push(duration_ms);
                    }
                    TrialOutcome::Timeout => {
                        warn!("  Run {rep}/{repetitions}: client timed out");
                    }
                    TrialOutcome::ExtractionFailure => {
                        warn!("  Run {rep}/{repetitions}: failed to get completion time");
                    }
                    TrialOutcome::ProcessFailure => {
                        warn!("  Run {rep}/{repetitions}: process failure");
                    }
                }
            }

            match aggregate(k, &samples) {
                Some(row) => table.push(row),
                None => warn!("No successful runs for k = {k}; omitting row"),
            }
        }

        table
    }
}
