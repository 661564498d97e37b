//! Scoring helpers used when presenting KPIs against plant targets.

/// Share of the period the equipment was up, in percent.
pub fn availability_pct(uptime_hours: f64, total_hours: f64) -> f64 {
    if total_hours == 0.0 {
        return 0.0;
    }
    uptime_hours / total_hours * 100.0
}

/// MTBF relative to a target MTBF, capped at 100.
pub fn reliability_score(mtbf: f64, target_mtbf: f64) -> f64 {
    if target_mtbf == 0.0 {
        return 0.0;
    }
    (mtbf / target_mtbf * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability() {
        assert_eq!(availability_pct(18.0, 24.0), 75.0);
        assert_eq!(availability_pct(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_reliability_score_is_capped() {
        assert_eq!(reliability_score(15.0, 30.0), 50.0);
        assert_eq!(reliability_score(90.0, 30.0), 100.0);
        assert_eq!(reliability_score(10.0, 0.0), 0.0);
    }
}
