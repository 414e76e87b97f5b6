//! End-to-end sweep tests with instrumented fake executables.

#![cfg(unix)]

use chunkbench::results::ResultsWriter;
use chunkbench::stats::CONFIDENCE_Z;
use chunkbench::sweep::{SweepConfig, SweepController};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");

    let mut perms = fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

fn sweep_config(server: PathBuf, client: PathBuf, k_values: Vec<u32>) -> SweepConfig {
    SweepConfig {
        k_values,
        repetitions: 3,
        server_path: server,
        client_path: client,
        startup_delay: Duration::from_millis(20),
        client_timeout: Duration::from_secs(5),
    }
}

/// Sweep [1, 5] with 3 repetitions: k=1 yields [10, 12, 11], k=5 always
/// fails. Exactly one result row must come out.
#[tokio::test]
async fn sweep_tolerates_a_fully_failed_k_value() {
    let dir = TempDir::new().unwrap();
    let counter = dir.path().join("counter");

    let server = write_script(dir.path(), "server", "exec sleep 600");
    let client = write_script(
        dir.path(),
        "client",
        &format!(
            r#"if [ "$1" = "5" ]; then
  echo "transfer failed"
  exit 1
fi
n=$(cat {counter} 2>/dev/null || echo 0)
n=$((n + 1))
echo "$n" > {counter}
case "$n" in
  1) t="10.0" ;;
  2) t="12.0" ;;
  *) t="11.0" ;;
esac
echo "Completion Time: $t ms""#,
            counter = counter.display()
        ),
    );

    let config = sweep_config(server, client, vec![1, 5]);
    let table = SweepController::new(config).run().await;

    assert_eq!(table.len(), 1, "k=5 must not produce a row");

    let row = &table[0];
    assert_eq!(row.k, 1);
    assert!((row.avg_time - 11.0).abs() < 1e-9);

    // Population variance of [10, 12, 11] is 2/3.
    let expected_ci = CONFIDENCE_Z * (2.0f64 / 3.0).sqrt() / 3.0f64.sqrt();
    assert!((row.ci - expected_ci).abs() < 1e-9);

    // And the persisted table matches, header included.
    let csv_path = dir.path().join("results.csv");
    ResultsWriter::new(&csv_path).write(&table).unwrap();
    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "k,avg_time,ci");
    assert!(lines[1].starts_with("1,11,"));
}

/// Serialization property: no trial's server may start while the previous
/// trial's server is still alive. The fake server records any overlap it
/// observes through a lock file that it removes on SIGTERM.
#[tokio::test]
async fn servers_never_overlap_across_trials() {
    let dir = TempDir::new().unwrap();
    let lock = dir.path().join("server.lock");
    let violations = dir.path().join("violations");

    let server = write_script(
        dir.path(),
        "server",
        &format!(
            r#"if [ -e {lock} ]; then
  echo overlap >> {violations}
fi
touch {lock}
trap 'rm -f {lock}; exit 0' TERM
while :; do sleep 0.05; done"#,
            lock = lock.display(),
            violations = violations.display()
        ),
    );
    let client = write_script(dir.path(), "client", "echo \"Completion Time: 1.0 ms\"");

    let config = sweep_config(server, client, vec![1, 2]);
    let table = SweepController::new(config).run().await;

    assert_eq!(table.len(), 2);
    assert!(
        !violations.exists(),
        "a server observed its predecessor still running"
    );
    assert!(!lock.exists(), "last server did not shut down cleanly");
}

/// A sweep where everything fails still completes and yields an empty table.
#[tokio::test]
async fn all_failures_yield_empty_table_without_aborting() {
    let dir = TempDir::new().unwrap();
    let server = write_script(dir.path(), "server", "exec sleep 600");
    let client = write_script(dir.path(), "client", "exit 1");

    let config = sweep_config(server, client, vec![1, 2, 3]);
    let table = SweepController::new(config).run().await;

    assert!(table.is_empty());
}
