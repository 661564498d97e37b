use serde::{Deserialize, Serialize};
use std::fmt;

/// The operating state of an asset as recorded in the equipment register.
///
/// Only `Active` counts towards utilization and OEE. Any label the register
/// uses that is not listed here deserializes to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationalStatus {
    Active,
    Inactive,
    Maintenance,
    #[serde(other)]
    Unknown,
}

impl OperationalStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, OperationalStatus::Active)
    }
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationalStatus::Active => "Active",
            OperationalStatus::Inactive => "Inactive",
            OperationalStatus::Maintenance => "Maintenance",
            OperationalStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}
