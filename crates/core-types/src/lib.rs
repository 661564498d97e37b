//! # Core Types
//!
//! The input tables shared by every other crate in the workspace: the asset
//! register, the failure log and the maintenance cost ledger.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::OperationalStatus;
pub use error::CoreError;
pub use structs::{Asset, FailureEvent, MaintenanceCost, MaintenanceDataset};
