//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Turns cumulative sensor counts into discrete customer arrivals."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use smartq_common::NegativeDeltaPolicy;
use tracing::{debug, info, warn};

use crate::errors::ArrivalError;
use crate::readings::{Customer, SensorReading, SENSOR_COUNT};

/// Incremental reconstructor holding the previous cumulative counts and the next id.
///
/// Every unit of positive delta on a sensor becomes one [`Customer`] stamped with the
/// reading's timestamp. Within a reading sensors are visited in index order, so ids
/// follow reading order first and sensor order second.
#[derive(Debug, Clone)]
pub struct ArrivalReconstructor {
    policy: NegativeDeltaPolicy,
    previous: [u64; SENSOR_COUNT],
    last_timestamp: Option<f64>,
    next_id: u64,
}

impl ArrivalReconstructor {
    pub fn new(policy: NegativeDeltaPolicy) -> Self {
        Self {
            policy,
            previous: [0; SENSOR_COUNT],
            last_timestamp: None,
            next_id: 1,
        }
    }

    /// Total customers emitted so far.
    pub fn emitted(&self) -> u64 {
        self.next_id - 1
    }

    /// Consume one reading, appending its arrivals to `out`.
    ///
    /// Under [`NegativeDeltaPolicy::Reject`] a decreasing count fails the reading before
    /// anything is emitted and leaves the reconstructor untouched.
    pub fn push(
        &mut self,
        reading: &SensorReading,
        out: &mut Vec<Customer>,
    ) -> Result<u64, ArrivalError> {
        if let Some(last) = self.last_timestamp {
            if reading.timestamp < last {
                warn!(
                    previous = last,
                    timestamp = reading.timestamp,
                    "sensor reading timestamp went backwards"
                );
            }
        }

        for (sensor, (&current, &previous)) in
            reading.counts.iter().zip(self.previous.iter()).enumerate()
        {
            if current < previous {
                match self.policy {
                    NegativeDeltaPolicy::Reject => {
                        return Err(ArrivalError::NegativeDelta {
                            sensor: sensor + 1,
                            timestamp: reading.timestamp,
                            previous,
                            current,
                        });
                    }
                    NegativeDeltaPolicy::Ignore => warn!(
                        sensor = sensor + 1,
                        timestamp = reading.timestamp,
                        previous,
                        current,
                        "sensor count decreased, ignoring delta"
                    ),
                }
            }
        }

        let mut created = 0;
        for (&current, &previous) in reading.counts.iter().zip(self.previous.iter()) {
            for _ in 0..current.saturating_sub(previous) {
                out.push(Customer {
                    id: self.next_id,
                    arrival: reading.timestamp,
                });
                debug!(customer = self.next_id, arrival = reading.timestamp, "customer created");
                self.next_id += 1;
                created += 1;
            }
        }

        debug!(
            timestamp = reading.timestamp,
            counts = ?reading.counts,
            created,
            "processed sensor reading"
        );
        self.previous = reading.counts;
        self.last_timestamp = Some(reading.timestamp);
        Ok(created)
    }
}

/// Reconstruct the full arrival sequence for a batch of readings.
pub fn reconstruct_arrivals(
    readings: &[SensorReading],
    policy: NegativeDeltaPolicy,
) -> Result<Vec<Customer>, ArrivalError> {
    let mut reconstructor = ArrivalReconstructor::new(policy);
    let mut customers = Vec::new();
    for reading in readings {
        reconstructor.push(reading, &mut customers)?;
    }
    info!(customers = customers.len(), "customer reconstruction finished");
    Ok(customers)
}
