use core_types::MaintenanceDataset;
use serde::Serialize;
use std::collections::HashSet;

/// Outcome of checking a dataset before reporting on it.
///
/// Errors describe rows the metrics would misread; warnings describe gaps
/// that only degrade individual KPIs to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Checks referential integrity and column coverage of the three tables.
/// Never blocks a KPI calculation.
pub fn validate_dataset(data: &MaintenanceDataset) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let blank_ids = data
        .assets
        .iter()
        .filter(|a| a.asset_id.trim().is_empty())
        .count();
    if blank_ids > 0 {
        errors.push(format!("Assets with an empty AssetID: {} records", blank_ids));
    }

    for failure in &data.failures {
        if let Some(hours) = failure.downtime_hours {
            if !hours.is_finite() || hours < 0.0 {
                errors.push(format!(
                    "Failure of {} at {} has invalid DowntimeHours {}",
                    failure.asset_id, failure.failure_date, hours
                ));
            }
        }
    }

    let mut asset_ids = HashSet::new();
    let mut duplicates = HashSet::new();
    for asset in &data.assets {
        if !asset_ids.insert(asset.asset_id.as_str()) {
            duplicates.insert(asset.asset_id.as_str());
        }
    }
    if !duplicates.is_empty() {
        warnings.push(format!("Duplicate AssetIDs: {} ids", duplicates.len()));
    }

    let orphaned: HashSet<&str> = data
        .failures
        .iter()
        .map(|f| f.asset_id.as_str())
        .filter(|id| !asset_ids.contains(id))
        .collect();
    if !orphaned.is_empty() {
        warnings.push(format!(
            "Failures reference non-existent assets: {} records",
            orphaned.len()
        ));
    }

    if !data.failures.is_empty() && data.failures.iter().all(|f| f.downtime_hours.is_none()) {
        warnings.push("Missing column in failures: DowntimeHours".to_string());
    }
    if !data.maintenance_costs.is_empty()
        && data.maintenance_costs.iter().all(|c| c.amount.is_none())
    {
        warnings.push("Missing column in maintenance_costs: Amount".to_string());
    }

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_types::{Asset, FailureEvent, MaintenanceCost, OperationalStatus};
    use rust_decimal_macros::dec;

    fn asset(id: &str) -> Asset {
        Asset::new(id, OperationalStatus::Active, "High").unwrap()
    }

    fn failure(id: &str, downtime: Option<f64>) -> FailureEvent {
        FailureEvent::new(id, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(), downtime)
            .unwrap()
    }

    #[test]
    fn test_clean_dataset_is_valid() {
        let data = MaintenanceDataset::new(
            vec![asset("A"), asset("B")],
            vec![failure("A", Some(2.0))],
            vec![MaintenanceCost::new(Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap(), dec!(10))],
        );
        let report = validate_dataset(&data);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_dataset_is_valid() {
        assert!(validate_dataset(&MaintenanceDataset::default()).valid);
    }

    #[test]
    fn test_orphaned_and_duplicate_ids_warn() {
        let data = MaintenanceDataset::new(
            vec![asset("A"), asset("A")],
            vec![failure("X", Some(1.0)), failure("Y", Some(1.0)), failure("X", Some(1.0))],
            vec![],
        );
        let report = validate_dataset(&data);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings.iter().any(|w| w.contains("non-existent assets: 2")));
        assert!(report.warnings.iter().any(|w| w.contains("Duplicate AssetIDs: 1")));
    }

    #[test]
    fn test_negative_downtime_is_an_error() {
        let mut bad = failure("A", Some(1.0));
        bad.downtime_hours = Some(-3.0);
        let data = MaintenanceDataset::new(vec![asset("A")], vec![bad], vec![]);

        let report = validate_dataset(&data);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn test_missing_columns_warn() {
        let mut cost =
            MaintenanceCost::new(Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap(), dec!(10));
        cost.amount = None;
        let data = MaintenanceDataset::new(vec![asset("A")], vec![failure("A", None)], vec![cost]);

        let report = validate_dataset(&data);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.ends_with("DowntimeHours")));
        assert!(report.warnings.iter().any(|w| w.ends_with("Amount")));
    }
}
