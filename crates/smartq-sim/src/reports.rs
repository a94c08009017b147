//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Flat-file export of routing results and advisory streams."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use smartq_common::OutputConfig;
use tracing::info;

use crate::errors::ReportError;
use crate::routing::{RoutingResult, SimulationOutcome};

const RESULTS_HEADER: [&str; 8] = [
    "ID",
    "Arrival",
    "Start",
    "End",
    "Wait",
    "Counter",
    "QueueAfterJoin",
    "PredictedWait",
];

/// Paths of the files written by [`ReportExporter::export_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReports {
    pub results: PathBuf,
    pub suggestions: PathBuf,
    pub screen_messages: PathBuf,
}

#[derive(Debug)]
pub struct ReportExporter<'a> {
    outcome: &'a SimulationOutcome,
}

impl<'a> ReportExporter<'a> {
    pub fn new(outcome: &'a SimulationOutcome) -> Self {
        Self { outcome }
    }

    pub fn export_all(&self, output: &OutputConfig) -> Result<ExportedReports, ReportError> {
        fs::create_dir_all(&output.directory)?;

        let reports = ExportedReports {
            results: output.results_path(),
            suggestions: output.suggestions_path(),
            screen_messages: output.screen_path(),
        };

        self.write_results(&reports.results)?;
        write_lines(&reports.suggestions, self.outcome.suggestions())?;
        write_lines(&reports.screen_messages, self.outcome.screen_messages())?;

        info!(
            results = %reports.results.display(),
            suggestions = %reports.suggestions.display(),
            screen_messages = %reports.screen_messages.display(),
            "reports exported"
        );
        Ok(reports)
    }

    /// Write the header plus one CRLF-terminated CSV row per routed customer.
    pub fn write_results(&self, path: &Path) -> Result<(), ReportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_path(path)?;
        writer.write_record(RESULTS_HEADER)?;
        for result in &self.outcome.results {
            writer.serialize(ResultRow::from(result))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Field order matches `RESULTS_HEADER`.
#[derive(Debug, Serialize)]
struct ResultRow {
    id: u64,
    arrival: f64,
    start: f64,
    end: f64,
    wait: f64,
    counter: usize,
    queue_after_join: usize,
    predicted_wait: f64,
}

impl From<&RoutingResult> for ResultRow {
    fn from(result: &RoutingResult) -> Self {
        Self {
            id: result.customer_id,
            arrival: result.arrival,
            start: result.start,
            end: result.end,
            wait: result.wait,
            counter: result.counter.number(),
            queue_after_join: result.queue_after_join,
            predicted_wait: result.predicted_wait,
        }
    }
}

fn write_lines(path: &Path, lines: impl Iterator<Item = String>) -> Result<(), ReportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readings::Customer;
    use crate::routing::simulate;

    #[test]
    fn results_csv_has_expected_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = simulate(&[
            Customer { id: 1, arrival: 1.0 },
            Customer { id: 2, arrival: 1.0 },
        ]);
        let path = dir.path().join("queue_smart.csv");
        ReportExporter::new(&outcome).write_results(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ID,Arrival,Start,End,Wait,Counter,QueueAfterJoin,PredictedWait",
                "1,1.0,1.0,4.5,0.0,1,1,0.0",
                "2,1.0,1.0,6.0,0.0,2,1,0.0",
            ]
        );
    }

    #[test]
    fn empty_outcome_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue_smart.csv");
        let outcome = SimulationOutcome::default();
        ReportExporter::new(&outcome).write_results(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "ID,Arrival,Start,End,Wait,Counter,QueueAfterJoin,PredictedWait\r\n"
        );
    }

    #[test]
    fn export_all_creates_directory_and_empty_message_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputConfig {
            directory: dir.path().join("nested/out"),
            ..OutputConfig::default()
        };
        let outcome = simulate(&[Customer { id: 1, arrival: 0.0 }]);
        let reports = ReportExporter::new(&outcome).export_all(&output).unwrap();

        assert!(reports.results.is_file());
        assert_eq!(fs::read_to_string(&reports.suggestions).unwrap(), "");
        assert_eq!(fs::read_to_string(&reports.screen_messages).unwrap(), "");
    }

    #[test]
    fn export_all_fails_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let output = OutputConfig {
            directory: blocker,
            ..OutputConfig::default()
        };
        let outcome = simulate(&[Customer { id: 1, arrival: 0.0 }]);
        let err = ReportExporter::new(&outcome).export_all(&output).unwrap_err();
        assert!(matches!(err, ReportError::Io(_)), "unexpected error: {err:?}");
    }
}
