use chrono::{DateTime, Utc};
use core_types::MaintenanceDataset;
use serde::Serialize;

/// Record count and covered period of a single table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableSummary {
    pub record_count: usize,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TableSummary {
    fn from_dates(record_count: usize, dates: impl Iterator<Item = DateTime<Utc>>) -> Self {
        let date_range = dates.fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((start, end)) => Some((start.min(date), end.max(date))),
        });
        Self {
            record_count,
            date_range,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub assets: TableSummary,
    pub failures: TableSummary,
    pub maintenance_costs: TableSummary,
}

pub fn summarize_dataset(data: &MaintenanceDataset) -> DatasetSummary {
    DatasetSummary {
        assets: TableSummary {
            record_count: data.assets.len(),
            date_range: None,
        },
        failures: TableSummary::from_dates(
            data.failures.len(),
            data.failures.iter().map(|f| f.failure_date),
        ),
        maintenance_costs: TableSummary::from_dates(
            data.maintenance_costs.len(),
            data.maintenance_costs.iter().map(|c| c.date),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use core_types::{Asset, FailureEvent, OperationalStatus};

    #[test]
    fn test_summary_counts_and_ranges() {
        let day = |d| Utc.with_ymd_and_hms(2024, 2, d, 0, 0, 0).unwrap();
        let data = MaintenanceDataset::new(
            vec![Asset::new("A", OperationalStatus::Active, "Low").unwrap()],
            vec![
                FailureEvent::new("A", day(14), None).unwrap(),
                FailureEvent::new("A", day(3), None).unwrap(),
                FailureEvent::new("A", day(27), None).unwrap(),
            ],
            vec![],
        );

        let summary = summarize_dataset(&data);
        assert_eq!(summary.assets.record_count, 1);
        assert_eq!(summary.assets.date_range, None);
        assert_eq!(summary.failures.record_count, 3);
        assert_eq!(summary.failures.date_range, Some((day(3), day(27))));
        assert_eq!(summary.maintenance_costs, TableSummary::default());
    }
}
