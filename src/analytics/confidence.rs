/// Back-tested confidence score for a forecast.
///
/// The last 20% of the window is held out and predicted with a naive trend extrapolation from
/// the points before each held-out value. The mean relative error maps to a confidence in
/// `[0.1, 0.95]`.

use crate::analytics::statistics::mean;
use crate::analytics::trend::{trend, TREND_WINDOW};
use crate::records::{self, HistoricalPeriodRecord};

pub const MIN_CONFIDENCE: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Returned when the window is too short to back-test
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
pub const MIN_BACKTEST_HISTORY: usize = 6;
const HOLDOUT_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate(&self, history: &[HistoricalPeriodRecord]) -> f64 {
        self.estimate_series(&records::amounts(history))
    }

    pub fn estimate_series(&self, values: &[f64]) -> f64 {
        if values.len() < MIN_BACKTEST_HISTORY {
            return DEFAULT_CONFIDENCE;
        }

        let holdout = ((values.len() as f64 * HOLDOUT_FRACTION).floor() as usize).max(1);
        let start = values.len() - holdout;

        let errors: Vec<f64> = (start..values.len())
            .map(|i| {
                let preceding = &values[i.saturating_sub(TREND_WINDOW)..i];
                let last_value = values[i - 1];
                let predicted = last_value * (1.0 + trend(preceding));
                relative_error(values[i], predicted)
            })
            .collect();

        let avg_error = mean(&errors);
        log::debug!(
            "Back-tested {} held-out periods, mean relative error {:.4}",
            holdout,
            avg_error
        );

        (1.0 - avg_error).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}

/// `|actual - predicted| / actual`; a zero actual scores 0 when matched exactly, else 1
fn relative_error(actual: f64, predicted: f64) -> f64 {
    if actual == 0.0 {
        return if predicted == 0.0 { 0.0 } else { 1.0 };
    }
    let error = ((actual - predicted) / actual).abs();
    if error.is_finite() {
        error
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_history_defaults() {
        let estimator = ConfidenceEstimator::new();
        assert_eq!(estimator.estimate_series(&[]), DEFAULT_CONFIDENCE);
        assert_eq!(estimator.estimate_series(&[1.0, 2.0, 3.0, 4.0, 5.0]), DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_flat_series_hits_ceiling() {
        let estimator = ConfidenceEstimator::new();
        assert_eq!(estimator.estimate_series(&[500.0; 12]), MAX_CONFIDENCE);
    }

    #[test]
    fn test_erratic_series_hits_floor() {
        let estimator = ConfidenceEstimator::new();
        let series = [100.0, 5000.0, 10.0, 8000.0, 1.0, 9000.0, 2.0, 7000.0, 3.0, 10000.0];
        assert_eq!(estimator.estimate_series(&series), MIN_CONFIDENCE);
    }

    #[test]
    fn test_holdout_error() {
        // Six points hold out one; persistence predicts 100 for an actual of 125.
        let estimator = ConfidenceEstimator::new();
        let series = [100.0, 100.0, 100.0, 100.0, 100.0, 125.0];
        assert!((estimator.estimate_series(&series) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_zero_actuals() {
        assert_eq!(relative_error(0.0, 0.0), 0.0);
        assert_eq!(relative_error(0.0, 10.0), 1.0);
        let estimator = ConfidenceEstimator::new();
        assert_eq!(estimator.estimate_series(&[0.0; 8]), MAX_CONFIDENCE);
    }

    #[test]
    fn test_always_within_bounds() {
        let estimator = ConfidenceEstimator::new();
        for scale in [0.5_f64, 1.0, 1.5, 3.0] {
            let series: Vec<f64> = (0..24).map(|i| 100.0 * scale.powi(i % 4)).collect();
            let confidence = estimator.estimate_series(&series);
            assert!((MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&confidence));
        }
    }
}
