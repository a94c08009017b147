//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "tests"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "End-to-end scenarios from sensor CSV to exported reports."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::fs;
use std::path::Path;

use smartq_common::{NegativeDeltaPolicy, OutputConfig};
use smartq_sim::{load_readings, run_pipeline, AdvisoryKind, SmartQError};
use tempfile::tempdir;

fn write_sensor_csv(dir: &Path, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.join("sensor.csv");
    let mut contents = String::from("time,c1,c2,c3,c4\n");
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn two_arrivals_on_one_sensor_spread_over_two_counters() {
    let dir = tempdir().unwrap();
    let input = write_sensor_csv(dir.path(), &["0.0,0,0,0,0", "1.0,2,0,0,0"]);

    let readings = load_readings(&input).unwrap();
    let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();

    let ids: Vec<u64> = summary.customers.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    let counters: Vec<usize> = summary
        .outcome
        .results
        .iter()
        .map(|r| r.counter.number())
        .collect();
    assert_eq!(counters, vec![1, 2]);
    assert!(summary.outcome.advisories.is_empty());
}

#[test]
fn saturated_counters_produce_paired_advisory_files() {
    let dir = tempdir().unwrap();
    let input = write_sensor_csv(dir.path(), &["0.0,0,0,0,0", "1.0,6,5,5,5"]);
    let output = OutputConfig {
        directory: dir.path().join("out"),
        ..OutputConfig::default()
    };

    let readings = load_readings(&input).unwrap();
    let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();
    assert_eq!(summary.customers.len(), 21);

    let last = summary.outcome.results.last().unwrap();
    assert_eq!(last.counter.number(), 4);
    assert_eq!(last.queue_after_join, 6);
    assert!(matches!(
        summary.outcome.advisories.last().map(|a| a.kind),
        Some(AdvisoryKind::AllCountersFull { .. })
    ));

    let reports = summary.exporter().export_all(&output).unwrap();

    let suggestions = fs::read_to_string(&reports.suggestions).unwrap();
    assert_eq!(
        suggestions,
        "Customer 19 redirected → Counter 2\n\
         Customer 20 redirected → Counter 3\n\
         ALL counters FULL! Customer 21 must wait.\n"
    );
    let screens = fs::read_to_string(&reports.screen_messages).unwrap();
    assert_eq!(screens.lines().count(), suggestions.lines().count());
    assert_eq!(screens.lines().last(), Some("ALL counters FULL! Customer 21 must wait."));

    let results = fs::read_to_string(&reports.results).unwrap();
    assert_eq!(results.lines().count(), 22);
    assert_eq!(results.lines().last(), Some("21,1.0,16.0,19.0,15.0,4,6,15.0"));
    assert_eq!(results.matches("\r\n").count(), 22);

    let stats = summary.statistics.unwrap();
    assert_eq!(stats.count, 21);
    assert_eq!(stats.min, 0.0);
}

#[test]
fn malformed_rows_do_not_disturb_reconstruction() {
    let dir = tempdir().unwrap();
    let input = write_sensor_csv(
        dir.path(),
        &["0.0,0,0,0,0", "0.5,bad,0,0,0", "1.0,1,1", "2.0,1,1,0,0"],
    );
    let readings = load_readings(&input).unwrap();
    assert_eq!(readings.len(), 2);

    let summary = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap();
    assert_eq!(summary.customers.len(), 2);
    assert!(summary.customers.iter().all(|c| c.arrival == 2.0));
}

#[test]
fn counter_reset_is_rejected_by_default_and_tolerated_on_request() {
    let dir = tempdir().unwrap();
    let input = write_sensor_csv(dir.path(), &["1.0,4,0,0,0", "2.0,0,1,0,0", "3.0,2,1,0,0"]);
    let readings = load_readings(&input).unwrap();

    let err = run_pipeline(&readings, NegativeDeltaPolicy::Reject).unwrap_err();
    assert!(matches!(err, SmartQError::Arrival(_)));
    assert!(err.to_string().contains("sensor 1"));

    let summary = run_pipeline(&readings, NegativeDeltaPolicy::Ignore).unwrap();
    assert_eq!(summary.customers.len(), 7);
}
