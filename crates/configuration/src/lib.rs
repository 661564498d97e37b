use crate::error::ConfigError;
use config::{Environment, File, FileFormat};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{KpiSettings, OeeTrendMode};

/// Loads the calculator settings from an optional `kpi.toml` file in the
/// working directory, overridden by `KPI_`-prefixed environment variables.
///
/// Missing sources are not an error; every field falls back to its default.
pub fn load_config() -> Result<KpiSettings, ConfigError> {
    load_config_from("kpi")
}

/// Same as [`load_config`] but reads the given file stem or path instead of `kpi`.
pub fn load_config_from(path: &str) -> Result<KpiSettings, ConfigError> {
    load_config_with_env(path, kpi_environment())
}

/// Reads `path` (if present) and then the given environment source on top.
pub fn load_config_with_env(path: &str, env: Environment) -> Result<KpiSettings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(env)
        .build()?;

    finish(builder)
}

/// The `KPI_`-prefixed environment source, e.g. `KPI_CALCULATION_PERIOD_DAYS=30`.
pub fn kpi_environment() -> Environment {
    Environment::with_prefix("KPI").try_parsing(true)
}

/// Parses settings from an in-memory TOML document.
pub fn parse_config(toml: &str) -> Result<KpiSettings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<KpiSettings, ConfigError> {
    // Attempt to deserialize the entire configuration into our `KpiSettings` struct
    let settings = builder.try_deserialize::<KpiSettings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Loaded KPI settings.");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_toml_keeps_defaults() {
        let settings = parse_config(
            r#"
            calculation_period_days = 30
            oee_trend = "period_over_period"
            "#,
        )
        .unwrap();

        assert_eq!(settings.calculation_period_days, 30);
        assert_eq!(settings.oee_trend, OeeTrendMode::PeriodOverPeriod);
        assert_eq!(settings.failure_rate_window_days, 90);
        assert_eq!(settings.quality_rate, 0.95);
    }

    #[test]
    fn test_parse_empty_toml_is_default() {
        let settings = parse_config("").unwrap();
        assert_eq!(settings, KpiSettings::default());
    }

    #[test]
    fn test_parse_rejects_invalid_values() {
        let err = parse_config("quality_rate = 2.0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        kpi_environment().source(Some(map))
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = load_config_with_env("does-not-exist/kpi", env(&[])).unwrap();
        assert_eq!(settings, KpiSettings::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let settings = load_config_with_env(
            "does-not-exist/kpi",
            env(&[
                ("KPI_CALCULATION_PERIOD_DAYS", "30"),
                ("KPI_OEE_TREND", "period_over_period"),
                ("KPI_QUALITY_RATE", "0.9"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.calculation_period_days, 30);
        assert_eq!(settings.oee_trend, OeeTrendMode::PeriodOverPeriod);
        assert_eq!(settings.quality_rate, 0.9);
        assert_eq!(settings.failure_rate_window_days, 90);
    }

    #[test]
    fn test_environment_values_are_validated() {
        let err =
            load_config_with_env("does-not-exist/kpi", env(&[("KPI_FAILURE_RATE_WINDOW_DAYS", "0")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let settings = load_config_with_env(
            "does-not-exist/kpi",
            env(&[("CALCULATION_PERIOD_DAYS", "7")]),
        )
        .unwrap();
        assert_eq!(settings.calculation_period_days, 90);
    }
}
