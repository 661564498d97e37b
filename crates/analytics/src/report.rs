use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Percentage share of the asset register per criticality label.
pub type CriticalityDistribution = BTreeMap<String, f64>;

/// Mean time between failures, in days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MtbfResult {
    pub mtbf: f64,
    /// Positive when the recent window saw fewer failures than the one before.
    pub mtbf_change: f64,
}

/// Mean time to repair, in hours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MttrResult {
    pub mttr: f64,
    /// Positive when recent repairs took longer than in the previous window.
    pub mttr_change: f64,
}

/// Overall equipment effectiveness, as a percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OeeResult {
    pub oee: f64,
    pub oee_change: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub total_cost: Decimal,
    /// Current calendar month against the previous one, in percent.
    pub cost_change: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationResult {
    pub utilization: f64,
    pub active_assets: usize,
    pub total_assets: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FailureRateResult {
    /// Failures per day over the trailing window.
    pub failure_rate: f64,
    pub total_failures: usize,
}

/// The flat record produced by `KpiCalculator::calculate_all_kpis`.
///
/// Serializes to a mapping keyed by metric name, which is what dashboards
/// consume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiReport {
    // I. Reliability
    pub mtbf: f64,
    pub mtbf_change: f64,
    pub mttr: f64,
    pub mttr_change: f64,
    pub oee: f64,
    pub oee_change: f64,

    // II. Cost
    pub total_cost: Decimal,
    pub cost_change: Decimal,

    // III. Asset register
    pub utilization: f64,
    pub active_assets: usize,
    pub total_assets: usize,
    pub failure_rate: f64,
    pub total_failures: usize,
    pub criticality_distribution: CriticalityDistribution,
}

impl KpiReport {
    /// Creates a new, zeroed-out KpiReport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the individual metric results into one report.
    pub fn from_parts(
        mtbf: MtbfResult,
        mttr: MttrResult,
        oee: OeeResult,
        cost: CostResult,
        utilization: UtilizationResult,
        failure_rate: FailureRateResult,
        criticality_distribution: CriticalityDistribution,
    ) -> Self {
        Self {
            mtbf: mtbf.mtbf,
            mtbf_change: mtbf.mtbf_change,
            mttr: mttr.mttr,
            mttr_change: mttr.mttr_change,
            oee: oee.oee,
            oee_change: oee.oee_change,
            total_cost: cost.total_cost,
            cost_change: cost.cost_change,
            utilization: utilization.utilization,
            active_assets: utilization.active_assets,
            total_assets: utilization.total_assets,
            failure_rate: failure_rate.failure_rate,
            total_failures: failure_rate.total_failures,
            criticality_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_flat_metric_keys() {
        let value = serde_json::to_value(KpiReport::new()).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        for expected in [
            "mtbf",
            "mtbf_change",
            "mttr",
            "mttr_change",
            "oee",
            "oee_change",
            "total_cost",
            "cost_change",
            "utilization",
            "active_assets",
            "total_assets",
            "failure_rate",
            "total_failures",
            "criticality_distribution",
        ] {
            assert!(keys.contains(&expected), "missing key {}", expected);
        }
        assert_eq!(keys.len(), 14);
    }
}
