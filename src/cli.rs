use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Chunkbench - measures how chunk size affects client-server transfer time
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
pub struct Args {
    /// Path to the server executable under test
    #[clap(long, default_value = crate::defaults::SERVER_EXE)]
    pub server: PathBuf,

    /// Path to the client executable under test
    #[clap(long, default_value = crate::defaults::CLIENT_EXE)]
    pub client: PathBuf,

    /// Chunk sizes to sweep, in order (space-separated)
    #[clap(
        short = 'k',
        long = "k-values",
        default_values_t = crate::defaults::K_VALUES,
        num_args = 1..,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub k_values: Vec<u32>,

    /// Settings file with the repetition count
    #[clap(short = 'c', long, default_value = crate::defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Number of trials per chunk size (overrides the settings file)
    #[clap(short = 'r', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub repetitions: Option<u64>,

    /// Output file for the result table (CSV format)
    #[clap(short = 'o', long, default_value = crate::defaults::OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Hard upper bound on a single client run (e.g. "30s", "500ms")
    #[clap(long, default_value = "30s", value_parser = parse_duration)]
    pub client_timeout: Duration,

    /// Delay between starting the server and launching the client
    #[clap(long, default_value = "500ms", value_parser = parse_duration)]
    pub startup_delay: Duration,

    /// Plot script invoked after the results are written
    #[clap(long, default_value = crate::defaults::PLOT_SCRIPT)]
    pub plot_script: PathBuf,

    /// Skip invoking the plot script
    #[clap(long, default_value_t = false)]
    pub skip_plot: bool,

    /// Verbose output
    #[clap(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

/// Parse duration from string (e.g. "10s", "5m", "500ms")
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Duration cannot be empty".to_string());
    }

    let (num_str, unit) = if let Some(stripped) = s.strip_suffix("ms") {
        (stripped, "ms")
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, "s")
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, "m")
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, "h")
    } else {
        (s, "s") // Default to seconds
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number in duration: {}", num_str))?;

    let duration = match unit {
        "ms" => Duration::from_millis(num as u64),
        "s" => Duration::from_secs(num as u64),
        "m" => Duration::from_secs((num * 60.0) as u64),
        "h" => Duration::from_secs((num * 3600.0) as u64),
        _ => return Err(format!("Invalid duration unit: {}", unit)),
    };

    Ok(duration)
}
