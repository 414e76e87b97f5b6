//! Trial execution: one server+client lifecycle per measurement.
//!
//! This is the only module that touches OS process lifecycle. Each trial
//! starts a fresh server, gives it a fixed delay to come up, runs the client
//! with the chunk size under test, and converts whatever happens into a
//! [`TrialOutcome`]. Nothing in here returns an error to the caller: a broken
//! trial is a value, not an exception, so one bad run can never abort the
//! sweep.
//!
//! ## Resource guarantees
//!
//! The server owns an exclusive listening port, so trials must be strictly
//! serialized. [`TrialExecutor::run`] upholds that by terminating the server
//! and waiting for it to be reaped on every exit path, including the client
//! timeout path. The client process is spawned with `kill_on_drop`, so a
//! timed-out client is killed when its wait future is dropped.
//!
//! ## Readiness caveat
//!
//! The server exposes no ready signal, so the startup delay is best-effort
//! synchronization. A server that takes longer than the delay to bind its
//! port will surface as a failed or timed-out client run, not as a distinct
//! error.

use crate::extract::extract_completion_time;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Grace period between SIGTERM and a forced kill of the server process.
const SERVER_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The result of running a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialOutcome {
    /// The client completed and reported a completion time, in milliseconds.
    Success(f64),

    /// The client did not finish within the configured bound.
    Timeout,

    /// The client finished but its output contained no usable completion time.
    ExtractionFailure,

    /// The server or client process could not be spawned or awaited.
    ProcessFailure,
}

/// Runs one (server, client) pairing and reports a [`TrialOutcome`].
pub struct TrialExecutor {
    server_path: PathBuf,
    client_path: PathBuf,
    startup_delay: Duration,
    client_timeout: Duration,
}

impl TrialExecutor {
    /// Create an executor for the given pair of executables.
    ///
    /// `startup_delay` is how long to wait after spawning the server before
    /// launching the client; `client_timeout` is the hard upper bound on one
    /// client run.
    pub fn new(
        server_path: impl Into<PathBuf>,
        client_path: impl Into<PathBuf>,
        startup_delay: Duration,
        client_timeout: Duration,
    ) -> Self {
        Self {
            server_path: server_path.into(),
            client_path: client_path.into(),
            startup_delay,
            client_timeout,
        }
    }

    /// Run exactly one trial for chunk size `k`.
    ///
    /// Returns only after the server process for this trial has exited,
    /// whatever the outcome, so the caller may immediately start the next
    /// trial without racing on the server's port.
    pub async fn run(&self, k: u32) -> TrialOutcome {
        let mut server = match self.spawn_server() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start server process: {e:#}");
                return TrialOutcome::ProcessFailure;
            }
        };

        // Best-effort readiness wait; the server signals nothing.
        sleep(self.startup_delay).await;

        let outcome = self.run_client(k).await;

        self.shutdown_server(&mut server).await;
        outcome
    }

    fn spawn_server(&self) -> anyhow::Result<Child> {
        debug!("Spawning server binary: {}", self.server_path.display());

        // Server output is captured so it cannot scribble on the harness
        // terminal; it is never parsed.
        let child = Command::new(&self.server_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        Ok(child)
    }

    /// Run the client to completion under the configured timeout and extract
    /// its reported completion time.
    async fn run_client(&self, k: u32) -> TrialOutcome {
        debug!(
            "Spawning client binary: {} {}",
            self.client_path.display(),
            k
        );

        let child = Command::new(&self.client_path)
            .arg(k.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to start client process: {e:#}");
                return TrialOutcome::ProcessFailure;
            }
        };

        // Dropping the wait future on timeout kills the client via
        // kill_on_drop; the tokio runtime reaps it in the background.
        let output = match timeout(self.client_timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!("Failed to collect client output: {e:#}");
                return TrialOutcome::ProcessFailure;
            }
            Err(_) => return TrialOutcome::Timeout,
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        match extract_completion_time(&stdout) {
            Ok(duration_ms) => TrialOutcome::Success(duration_ms),
            Err(e) => {
                debug!("Extraction failed: {e}");
                debug!("Client stdout: {stdout}");
                debug!(
                    "Client stderr: {}",
                    String::from_utf8_lossy(&output.stderr)
                );
                TrialOutcome::ExtractionFailure
            }
        }
    }

    /// Terminate the server and wait for it to be reaped.
    ///
    /// SIGTERM first so the server can release its port cleanly; a server
    /// that ignores the signal for longer than the grace period gets killed.
    async fn shutdown_server(&self, server: &mut Child) {
        #[cfg(unix)]
        if let Some(pid) = server.id() {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                debug!("SIGTERM to server pid {pid} failed: {e}");
            }
        }
        #[cfg(not(unix))]
        {
            let _ = server.start_kill();
        }

        match timeout(SERVER_SHUTDOWN_GRACE, server.wait()).await {
            Ok(Ok(status)) => debug!("Server exited with {status}"),
            Ok(Err(e)) => warn!("Failed to reap server process: {e:#}"),
            Err(_) => {
                warn!("Server ignored termination signal; killing it");
                if let Err(e) = server.kill().await {
                    warn!("Failed to kill server process: {e:#}");
                }
            }
        }
    }
}
