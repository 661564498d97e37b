//! # RCM Analytics Engine
//!
//! This crate derives reliability and cost KPIs (MTBF, MTTR, OEE, maintenance
//! spend, utilization, failure rate, criticality mix) from the asset register,
//! the failure log and the maintenance cost ledger.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where the
//!   tables come from. It depends only on `core-types` and `configuration`.
//! - **Stateless Calculation:** The `KpiCalculator` holds nothing but its settings. It
//!   takes the three tables as input and produces a `KpiReport` as output. Empty
//!   tables and missing columns degrade to zeroed metrics instead of errors.
//!
//! ## Public API
//!
//! - `KpiCalculator`: The main struct that contains the calculation logic.
//! - `KpiReport`: The flat record of all fourteen KPI fields.
//! - `validate_dataset` / `summarize_dataset`: Pre-flight checks on the input tables.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod reliability;
pub mod report;
pub mod summary;
pub mod validation;

// Re-export the key components to create a clean, public-facing API.
pub use engine::KpiCalculator;
pub use error::AnalyticsError;
pub use report::{
    CostResult, CriticalityDistribution, FailureRateResult, KpiReport, MtbfResult, MttrResult,
    OeeResult, UtilizationResult,
};
pub use summary::{DatasetSummary, TableSummary, summarize_dataset};
pub use validation::{ValidationReport, validate_dataset};
