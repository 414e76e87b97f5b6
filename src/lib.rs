//! # Chunkbench Library
//!
//! A benchmark harness that measures how the chunk size `k` of a
//! client-server file-transfer protocol affects end-to-end completion time.
//! For each chunk size in an ordered sweep, the harness repeatedly starts a
//! fresh server process, runs the client against it, extracts the reported
//! completion time from the client's output, and reduces the repeated
//! measurements into a mean with a 95% confidence half-width. The resulting
//! table is persisted as CSV for an external plotting script.
//!
//! ## Architecture Overview
//!
//! The library is organized into several small modules, leaves first:
//!
//! - `extract`: locates the reported completion time in raw client output
//! - `trial`: runs one server+client lifecycle and classifies the outcome
//! - `stats`: reduces a sample set into a mean and confidence half-width
//! - `sweep`: drives the full experiment across chunk sizes and repetitions
//! - `results`: persists the final result table as CSV
//! - `config`: settings-file loading (`num_repetitions`)
//! - `cli`: command-line interface parsing
//! - `logging`: colorized tracing output
//!
//! ## Failure Model
//!
//! Per-trial failures (timeout, unparseable output, a process that will not
//! start) are values, not errors: they cost one sample and nothing else. A
//! chunk size that loses every repetition produces no result row. The only
//! fatal condition is the pre-flight check for the executables under test.
//!
//! ## Concurrency Model
//!
//! The sweep is intentionally sequential. Every trial's server binds the
//! same listening port, so the harness never starts a trial before the
//! previous trial's server has been confirmed terminated. Async is used for
//! process supervision (timeouts, child reaping), not for parallelism.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use chunkbench::{ResultsWriter, SweepConfig, SweepController};
//! use std::path::Path;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SweepConfig {
//!         k_values: vec![1, 5, 10],
//!         repetitions: 5,
//!         server_path: "./server".into(),
//!         client_path: "./client".into(),
//!         startup_delay: Duration::from_millis(500),
//!         client_timeout: Duration::from_secs(30),
//!     };
//!
//!     let table = SweepController::new(config).run().await;
//!     ResultsWriter::new(Path::new("results.csv")).write(&table)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod results;
pub mod stats;
pub mod sweep;
pub mod trial;

// Re-export the types that make up the main execution path so the binary
// and integration tests read naturally.
pub use cli::Args;
pub use config::FileConfig;
pub use results::ResultsWriter;
pub use stats::{aggregate, AggregateResult};
pub use sweep::{SweepConfig, SweepController};
pub use trial::{TrialExecutor, TrialOutcome};

/// Default configuration values
///
/// A bare `chunkbench` invocation uses these and reproduces the canonical
/// sweep.
pub mod defaults {
    /// Chunk sizes visited by the sweep, in order.
    pub const K_VALUES: [u32; 7] = [1, 5, 10, 20, 50, 100, 200];

    /// Trials per chunk size when neither the settings file nor the CLI
    /// says otherwise.
    pub const REPETITIONS: usize = 5;

    /// Default server executable path.
    pub const SERVER_EXE: &str = "./server";

    /// Default client executable path.
    pub const CLIENT_EXE: &str = "./client";

    /// Default settings file.
    pub const CONFIG_FILE: &str = "config.json";

    /// Default results file.
    pub const OUTPUT_FILE: &str = "results.csv";

    /// Default plot script handed to `python3` after the sweep.
    pub const PLOT_SCRIPT: &str = "plot.py";
}
