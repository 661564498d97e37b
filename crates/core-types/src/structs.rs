use crate::enums::OperationalStatus;
use crate::error::CoreError;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The criticality label the register uses for the highest priority tier.
pub const CRITICAL_LEVEL: &str = "Critical";

/// A single row of the asset register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "OperationalStatus")]
    pub operational_status: OperationalStatus,
    /// Free-form priority tier, e.g. "Critical", "High", "Medium", "Low".
    #[serde(rename = "CriticalityLevel")]
    pub criticality_level: String,

    #[serde(rename = "AssetName", default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(rename = "AssetType", default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Asset {
    pub fn new(
        asset_id: impl Into<String>,
        operational_status: OperationalStatus,
        criticality_level: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let asset_id = asset_id.into();
        if asset_id.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "AssetID".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            asset_id,
            operational_status,
            criticality_level: criticality_level.into(),
            asset_name: None,
            asset_type: None,
            location: None,
        })
    }
}

/// A single row of the failure log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureEvent {
    #[serde(rename = "AssetID")]
    pub asset_id: String,
    #[serde(rename = "FailureDate")]
    pub failure_date: DateTime<Utc>,
    /// `None` when the source table did not record downtime for this failure.
    #[serde(rename = "DowntimeHours", default)]
    pub downtime_hours: Option<f64>,

    #[serde(rename = "FailureMode", default, skip_serializing_if = "Option::is_none")]
    pub failure_mode: Option<String>,
}

impl FailureEvent {
    pub fn new(
        asset_id: impl Into<String>,
        failure_date: DateTime<Utc>,
        downtime_hours: Option<f64>,
    ) -> Result<Self, CoreError> {
        if let Some(hours) = downtime_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(CoreError::InvalidInput(
                    "DowntimeHours".to_string(),
                    format!("expected a non-negative number of hours, got {}", hours),
                ));
            }
        }

        Ok(Self {
            asset_id: asset_id.into(),
            failure_date,
            downtime_hours,
            failure_mode: None,
        })
    }
}

/// A single movement in the maintenance cost ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceCost {
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    /// `None` when the source table did not record an amount.
    #[serde(rename = "Amount", default)]
    pub amount: Option<Decimal>,

    #[serde(rename = "AssetID", default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(rename = "CostType", default, skip_serializing_if = "Option::is_none")]
    pub cost_type: Option<String>,
}

impl MaintenanceCost {
    pub fn new(date: DateTime<Utc>, amount: Decimal) -> Self {
        Self {
            date,
            amount: Some(amount),
            asset_id: None,
            cost_type: None,
        }
    }
}

/// The three tables a KPI calculation reads from.
///
/// A table missing from a serialized dataset is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceDataset {
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub failures: Vec<FailureEvent>,
    #[serde(default)]
    pub maintenance_costs: Vec<MaintenanceCost>,
}

impl MaintenanceDataset {
    pub fn new(
        assets: Vec<Asset>,
        failures: Vec<FailureEvent>,
        maintenance_costs: Vec<MaintenanceCost>,
    ) -> Self {
        Self {
            assets,
            failures,
            maintenance_costs,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.failures.is_empty() && self.maintenance_costs.is_empty()
    }

    pub fn active_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets
            .iter()
            .filter(|a| a.operational_status.is_active())
    }

    pub fn critical_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets
            .iter()
            .filter(|a| a.criticality_level == CRITICAL_LEVEL)
    }

    /// Failures dated within the trailing `days` before `as_of`.
    pub fn recent_failures(
        &self,
        as_of: DateTime<Utc>,
        days: u32,
    ) -> impl Iterator<Item = &FailureEvent> {
        let cutoff = as_of - Duration::days(i64::from(days));
        self.failures
            .iter()
            .filter(move |f| f.failure_date >= cutoff)
    }
}
