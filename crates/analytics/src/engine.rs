use crate::error::AnalyticsError;
use crate::report::{
    CostResult, CriticalityDistribution, FailureRateResult, KpiReport, MtbfResult, MttrResult,
    OeeResult, UtilizationResult,
};
use chrono::{DateTime, Datelike, Duration, Utc};
use configuration::{KpiSettings, OeeTrendMode};
use core_types::{Asset, FailureEvent, MaintenanceCost, MaintenanceDataset};
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// A stateless calculator for maintenance KPIs.
///
/// The only state is the immutable `KpiSettings` it was built with. Every
/// metric is a pure function of the tables passed in and never fails: empty
/// tables and missing columns produce zeroed results.
#[derive(Debug, Clone, Default)]
pub struct KpiCalculator {
    settings: KpiSettings,
}

impl KpiCalculator {
    /// Creates a calculator with the default settings (90-day windows).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: KpiSettings) -> Result<Self, AnalyticsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &KpiSettings {
        &self.settings
    }

    /// Calculates every KPI as of now.
    pub fn calculate_all_kpis(&self, data: &MaintenanceDataset) -> KpiReport {
        self.calculate_all_kpis_at(data, Utc::now(), &mut rand::thread_rng())
    }

    /// The main entry point for calculating the KPI report.
    ///
    /// # Arguments
    ///
    /// * `data` - The asset register, failure log and cost ledger.
    /// * `as_of` - The instant the trailing windows are measured back from.
    /// * `rng` - Source for the placeholder OEE trend.
    #[tracing::instrument(
        name = "calculate_all_kpis",
        skip(self, data, rng),
        fields(
            assets = data.assets.len(),
            failures = data.failures.len(),
            costs = data.maintenance_costs.len()
        )
    )]
    pub fn calculate_all_kpis_at<R: Rng>(
        &self,
        data: &MaintenanceDataset,
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> KpiReport {
        let mtbf = self.calculate_mtbf(&data.failures, as_of);
        let mttr = self.calculate_mttr(&data.failures, as_of);
        let oee = self.calculate_oee(&data.assets, &data.failures, as_of, rng);
        let cost = self.calculate_total_maintenance_cost(&data.maintenance_costs, as_of);
        let utilization = self.calculate_asset_utilization(&data.assets);
        let failure_rate = self.calculate_failure_rate(
            &data.failures,
            as_of,
            self.settings.failure_rate_window_days,
        );
        let criticality = self.calculate_criticality_distribution(&data.assets);

        let report =
            KpiReport::from_parts(mtbf, mttr, oee, cost, utilization, failure_rate, criticality);

        tracing::info!(
            mtbf = report.mtbf,
            mttr = report.mttr,
            oee = report.oee,
            total_cost = %report.total_cost,
            "KPI calculation complete."
        );
        report
    }

    /// Mean time between failures, pooled over every asset with at least two
    /// recorded failures.
    pub fn calculate_mtbf(&self, failures: &[FailureEvent], as_of: DateTime<Utc>) -> MtbfResult {
        if failures.is_empty() {
            return MtbfResult::default();
        }

        // BTreeMap keeps the summation order stable between calls.
        let mut by_asset: BTreeMap<&str, Vec<DateTime<Utc>>> = BTreeMap::new();
        for failure in failures {
            by_asset
                .entry(failure.asset_id.as_str())
                .or_default()
                .push(failure.failure_date);
        }

        let mut gap_sum = 0.0;
        let mut gap_count = 0usize;
        for dates in by_asset.values_mut().filter(|d| d.len() > 1) {
            dates.sort();
            for pair in dates.windows(2) {
                gap_sum += (pair[1] - pair[0]).num_milliseconds() as f64 / MILLIS_PER_DAY;
                gap_count += 1;
            }
        }

        if gap_count == 0 {
            return MtbfResult::default();
        }

        let mtbf = gap_sum / gap_count as f64;

        let (recent_start, previous_start) = self.comparison_windows(as_of);
        let recent = failures
            .iter()
            .filter(|f| f.failure_date >= recent_start)
            .count();
        let previous = failures
            .iter()
            .filter(|f| f.failure_date >= previous_start && f.failure_date < recent_start)
            .count();

        let mtbf_change = if recent > 0 && previous > 0 {
            (previous as f64 - recent as f64) / previous as f64 * 100.0
        } else {
            0.0
        };

        tracing::debug!(mtbf, gap_count, recent, previous, "Calculated MTBF.");
        MtbfResult { mtbf, mtbf_change }
    }

    /// Mean time to repair over every failure that recorded downtime.
    pub fn calculate_mttr(&self, failures: &[FailureEvent], as_of: DateTime<Utc>) -> MttrResult {
        if failures.is_empty() {
            return MttrResult::default();
        }

        let Some(mttr) = mean(failures.iter().filter_map(|f| f.downtime_hours)) else {
            tracing::warn!("Failure log carries no DowntimeHours; MTTR defaults to zero.");
            return MttrResult::default();
        };

        let (recent_start, previous_start) = self.comparison_windows(as_of);
        let recent = mean(
            failures
                .iter()
                .filter(|f| f.failure_date >= recent_start)
                .filter_map(|f| f.downtime_hours),
        );
        let previous = mean(
            failures
                .iter()
                .filter(|f| f.failure_date >= previous_start && f.failure_date < recent_start)
                .filter_map(|f| f.downtime_hours),
        );

        let mttr_change = match (recent, previous) {
            (Some(recent), Some(previous)) if previous != 0.0 => {
                (recent - previous) / previous * 100.0
            }
            _ => 0.0,
        };

        tracing::debug!(mttr, ?recent, ?previous, "Calculated MTTR.");
        MttrResult { mttr, mttr_change }
    }

    /// Overall equipment effectiveness from availability over the recent
    /// window and the configured quality and performance rates.
    pub fn calculate_oee<R: Rng>(
        &self,
        assets: &[Asset],
        failures: &[FailureEvent],
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> OeeResult {
        if assets.is_empty() {
            return OeeResult::default();
        }

        let active = assets
            .iter()
            .filter(|a| a.operational_status.is_active())
            .count();
        if active == 0 {
            return OeeResult::default();
        }

        let possible_hours = active as f64 * self.settings.possible_hours_per_asset;
        let (recent_start, previous_start) = self.comparison_windows(as_of);

        let recent_downtime: f64 = failures
            .iter()
            .filter(|f| f.failure_date >= recent_start)
            .filter_map(|f| f.downtime_hours)
            .sum();
        let oee = self.oee_from_downtime(possible_hours, recent_downtime);

        let oee_change = match self.settings.oee_trend {
            OeeTrendMode::Placeholder => {
                rng.gen_range(self.settings.oee_change_min..=self.settings.oee_change_max)
            }
            OeeTrendMode::PeriodOverPeriod => {
                let previous_downtime: f64 = failures
                    .iter()
                    .filter(|f| f.failure_date >= previous_start && f.failure_date < recent_start)
                    .filter_map(|f| f.downtime_hours)
                    .sum();
                oee - self.oee_from_downtime(possible_hours, previous_downtime)
            }
        };

        tracing::debug!(active, possible_hours, recent_downtime, oee, "Calculated OEE.");
        OeeResult { oee, oee_change }
    }

    /// Total spend in the ledger, with the current calendar month compared
    /// against the previous one.
    pub fn calculate_total_maintenance_cost(
        &self,
        costs: &[MaintenanceCost],
        as_of: DateTime<Utc>,
    ) -> CostResult {
        if costs.is_empty() {
            return CostResult::default();
        }
        if costs.iter().all(|c| c.amount.is_none()) {
            tracing::warn!("Cost ledger carries no Amount; total cost defaults to zero.");
            return CostResult::default();
        }

        let current_month_start = month_start(as_of);
        let previous_month_start = month_start(current_month_start - Duration::days(1));

        let mut total_cost = Decimal::ZERO;
        let mut current = Decimal::ZERO;
        let mut previous = Decimal::ZERO;
        for cost in costs {
            let Some(amount) = cost.amount else {
                continue;
            };
            let bucket = if cost.date >= current_month_start {
                Some(&mut current)
            } else if cost.date >= previous_month_start {
                Some(&mut previous)
            } else {
                None
            };

            let Some(sum) = total_cost.checked_add(amount) else {
                tracing::warn!("Cost ledger total overflows; total cost defaults to zero.");
                return CostResult::default();
            };
            total_cost = sum;
            if let Some(bucket) = bucket {
                let Some(sum) = bucket.checked_add(amount) else {
                    tracing::warn!("Monthly cost total overflows; total cost defaults to zero.");
                    return CostResult::default();
                };
                *bucket = sum;
            }
        }

        let cost_change = if previous > Decimal::ZERO {
            percent_change(current, previous).unwrap_or_else(|| {
                tracing::warn!(%current, %previous, "Cost change overflows; defaults to zero.");
                Decimal::ZERO
            })
        } else {
            Decimal::ZERO
        };

        tracing::debug!(%total_cost, %current, %previous, "Calculated maintenance cost.");
        CostResult {
            total_cost,
            cost_change,
        }
    }

    pub fn calculate_asset_utilization(&self, assets: &[Asset]) -> UtilizationResult {
        if assets.is_empty() {
            return UtilizationResult::default();
        }

        let total_assets = assets.len();
        let active_assets = assets
            .iter()
            .filter(|a| a.operational_status.is_active())
            .count();

        UtilizationResult {
            utilization: active_assets as f64 / total_assets as f64 * 100.0,
            active_assets,
            total_assets,
        }
    }

    /// Failures per day over the trailing `period_days`.
    pub fn calculate_failure_rate(
        &self,
        failures: &[FailureEvent],
        as_of: DateTime<Utc>,
        period_days: u32,
    ) -> FailureRateResult {
        if failures.is_empty() || period_days == 0 {
            return FailureRateResult::default();
        }

        let cutoff = as_of - Duration::days(i64::from(period_days));
        let total_failures = failures
            .iter()
            .filter(|f| f.failure_date >= cutoff)
            .count();

        FailureRateResult {
            failure_rate: total_failures as f64 / f64::from(period_days),
            total_failures,
        }
    }

    pub fn calculate_criticality_distribution(&self, assets: &[Asset]) -> CriticalityDistribution {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for asset in assets {
            *counts.entry(asset.criticality_level.clone()).or_default() += 1;
        }

        let total = assets.len() as f64;
        counts
            .into_iter()
            .map(|(level, count)| (level, count as f64 / total * 100.0))
            .collect()
    }

    /// Start of the recent window and start of the previous window.
    fn comparison_windows(&self, as_of: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let period = Duration::days(i64::from(self.settings.calculation_period_days));
        let recent_start = as_of - period;
        (recent_start, recent_start - period)
    }

    fn oee_from_downtime(&self, possible_hours: f64, downtime_hours: f64) -> f64 {
        let availability = ((possible_hours - downtime_hours) / possible_hours).max(0.0);
        availability * self.settings.quality_rate * self.settings.performance_rate * 100.0
    }
}

/// `(current - previous) / previous * 100`, or `None` on overflow.
fn percent_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Midnight UTC on the first day of the month containing `at`.
fn month_start(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(at)
}
