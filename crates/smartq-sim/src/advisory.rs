//! ---
//! sq_section: "11-simulation"
//! sq_subsection: "module"
//! sq_type: "source"
//! sq_scope: "code"
//! sq_description: "Capacity advisories raised while routing customers."
//! sq_version: "v0.1.0"
//! sq_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use crate::counter::CounterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AdvisoryKind {
    /// The preferred counter was full and another one had space.
    Redirected { from: CounterId, to: CounterId },
    /// Every counter was full; the customer stays on the preferred one.
    AllCountersFull { counter: CounterId },
}

/// One capacity event. Carries both the operator suggestion and the screen text, so the
/// two message streams cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub customer_id: u64,
    pub kind: AdvisoryKind,
}

impl Advisory {
    pub fn redirected(customer_id: u64, from: CounterId, to: CounterId) -> Self {
        Self {
            customer_id,
            kind: AdvisoryKind::Redirected { from, to },
        }
    }

    pub fn all_full(customer_id: u64, counter: CounterId) -> Self {
        Self {
            customer_id,
            kind: AdvisoryKind::AllCountersFull { counter },
        }
    }

    /// Operator-facing line for the suggestions log.
    pub fn suggestion(&self) -> String {
        match self.kind {
            AdvisoryKind::Redirected { to, .. } => {
                format!("Customer {} redirected → Counter {}", self.customer_id, to)
            }
            AdvisoryKind::AllCountersFull { .. } => self.all_full_warning(),
        }
    }

    /// Customer-facing line for the display screen.
    pub fn screen_message(&self) -> String {
        match self.kind {
            AdvisoryKind::Redirected { to, .. } => {
                format!("Counter {} has space, please move.", to)
            }
            AdvisoryKind::AllCountersFull { .. } => self.all_full_warning(),
        }
    }

    fn all_full_warning(&self) -> String {
        format!("ALL counters FULL! Customer {} must wait.", self.customer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> CounterId {
        CounterId::from_index(index).unwrap()
    }

    #[test]
    fn redirect_messages_name_the_new_counter() {
        let advisory = Advisory::redirected(19, id(3), id(1));
        assert_eq!(advisory.suggestion(), "Customer 19 redirected → Counter 2");
        assert_eq!(advisory.screen_message(), "Counter 2 has space, please move.");
    }

    #[test]
    fn all_full_messages_are_identical_on_both_streams() {
        let advisory = Advisory::all_full(21, id(3));
        assert_eq!(advisory.suggestion(), "ALL counters FULL! Customer 21 must wait.");
        assert_eq!(advisory.suggestion(), advisory.screen_message());
    }
}
