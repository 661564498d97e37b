use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How `oee_change` is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OeeTrendMode {
    /// A uniform random figure drawn from `[oee_change_min, oee_change_max]`.
    /// Stands in until the plant records per-period OEE.
    #[default]
    Placeholder,
    /// OEE over the recent window minus OEE over the window before it,
    /// in percentage points.
    PeriodOverPeriod,
}

/// Parameters of the KPI calculator. Deserialized from `kpi.toml` and
/// `KPI_*` environment variables; every field may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiSettings {
    /// Length in days of the "recent" and "previous" comparison windows used
    /// by the MTBF, MTTR and OEE trends.
    pub calculation_period_days: u32,
    /// Trailing window in days for the failure rate.
    pub failure_rate_window_days: u32,
    /// Possible operating hours per active asset in the OEE availability term.
    pub possible_hours_per_asset: f64,
    pub quality_rate: f64,
    pub performance_rate: f64,
    pub oee_trend: OeeTrendMode,
    pub oee_change_min: f64,
    pub oee_change_max: f64,
}

impl Default for KpiSettings {
    fn default() -> Self {
        Self {
            calculation_period_days: 90,
            failure_rate_window_days: 90,
            possible_hours_per_asset: 24.0,
            quality_rate: 0.95,
            performance_rate: 0.88,
            oee_trend: OeeTrendMode::Placeholder,
            oee_change_min: -2.0,
            oee_change_max: 3.0,
        }
    }
}

impl KpiSettings {
    /// Checks the invariants the calculator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.calculation_period_days == 0 {
            return Err(ConfigError::ValidationError(
                "calculation_period_days must be greater than zero".to_string(),
            ));
        }
        if self.failure_rate_window_days == 0 {
            return Err(ConfigError::ValidationError(
                "failure_rate_window_days must be greater than zero".to_string(),
            ));
        }
        if !(self.possible_hours_per_asset.is_finite() && self.possible_hours_per_asset > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "possible_hours_per_asset must be positive, got {}",
                self.possible_hours_per_asset
            )));
        }

        for (name, rate) in [
            ("quality_rate", self.quality_rate),
            ("performance_rate", self.performance_rate),
        ] {
            if !(rate > 0.0 && rate <= 1.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within (0, 1], got {}",
                    name, rate
                )));
            }
        }

        if !(self.oee_change_min.is_finite() && self.oee_change_max.is_finite())
            || self.oee_change_min > self.oee_change_max
        {
            return Err(ConfigError::ValidationError(format!(
                "oee_change range [{}, {}] is invalid",
                self.oee_change_min, self.oee_change_max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = KpiSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.calculation_period_days, 90);
        assert_eq!(settings.performance_rate, 0.88);
        assert_eq!(settings.oee_trend, OeeTrendMode::Placeholder);
    }

    #[test]
    fn test_zero_windows_rejected() {
        let settings = KpiSettings {
            calculation_period_days: 0,
            ..KpiSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = KpiSettings {
            failure_rate_window_days: 0,
            ..KpiSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rates_outside_unit_interval_rejected() {
        let settings = KpiSettings {
            quality_rate: 1.5,
            ..KpiSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = KpiSettings {
            performance_rate: 0.0,
            ..KpiSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_inverted_oee_range_rejected() {
        let settings = KpiSettings {
            oee_change_min: 3.0,
            oee_change_max: -2.0,
            ..KpiSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
