//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Sensor readings and reconstructed customer arrivals."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

/// Number of people-counter sensors feeding the system.
pub const SENSOR_COUNT: usize = 4;

/// Cumulative per-sensor totals sampled at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: f64,
    pub counts: [u64; SENSOR_COUNT],
}

impl SensorReading {
    pub fn new(timestamp: f64, counts: [u64; SENSOR_COUNT]) -> Self {
        Self { timestamp, counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// A single arrival derived from a positive count delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub arrival: f64,
}
