//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Error taxonomy for ingestion, reconstruction and report export."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SmartQError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("sensor input {0} not found")]
    MissingInput(PathBuf),
    #[error("sensor input {0} contains no readings")]
    EmptyInput(PathBuf),
    #[error("unable to read sensor input {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl IngestError {
    /// Missing and empty inputs short-circuit the pipeline instead of failing it.
    pub fn is_no_input(&self) -> bool {
        matches!(self, IngestError::MissingInput(_) | IngestError::EmptyInput(_))
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ArrivalError {
    #[error(
        "sensor {sensor} count dropped from {previous} to {current} at t={timestamp}; \
         cumulative counters must not decrease"
    )]
    NegativeDelta {
        sensor: usize,
        timestamp: f64,
        previous: u64,
        current: u64,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum SmartQError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Arrival(#[from] ArrivalError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
