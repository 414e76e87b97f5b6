//! Settings-file loading.
//!
//! The harness reads a flat JSON settings file (`config.json` by default)
//! once at startup. The only recognized key is `num_repetitions`; a missing
//! file falls back to the defaults so a bare checkout runs without any
//! setup. The parsed value is folded into the explicit [`SweepConfig`]
//! rather than living in process-wide state.
//!
//! [`SweepConfig`]: crate::sweep::SweepConfig

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Flat key-value settings read from the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    /// Number of trials per chunk size.
    #[serde(default = "default_repetitions")]
    pub num_repetitions: usize,
}

fn default_repetitions() -> usize {
    crate::defaults::REPETITIONS
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            num_repetitions: default_repetitions(),
        }
    }
}

impl FileConfig {
    /// Load settings from `path`.
    ///
    /// A missing file is not an error: the defaults apply. A file that
    /// exists but does not parse, or that sets `num_repetitions` to zero,
    /// is a startup failure.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(
                "Config file {} not found; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if config.num_repetitions == 0 {
            anyhow::bail!(
                "num_repetitions in {} must be a positive integer",
                path.display()
            );
        }

        Ok(config)
    }
}
