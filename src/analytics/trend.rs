/// Recent-versus-prior trend of a numeric series.

use crate::analytics::statistics::mean;

/// Size of each comparison window
pub const TREND_WINDOW: usize = 3;

/// Relative change between the average of the last three values and the average of the
/// (up to) three values immediately before them.
///
/// Reused for spending, complaint volume and emergency events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Returns 0 for fewer than two points, an empty prior window, or a prior mean of 0.
    pub fn trend(&self, series: &[f64]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }

        let n = series.len();
        let recent = &series[n.saturating_sub(TREND_WINDOW)..];
        let older = &series[n.saturating_sub(2 * TREND_WINDOW)..n.saturating_sub(TREND_WINDOW)];

        if older.is_empty() {
            return 0.0;
        }

        let older_avg = mean(older);
        if older_avg == 0.0 {
            return 0.0;
        }

        let change = (mean(recent) - older_avg) / older_avg;
        if change.is_finite() {
            change
        } else {
            0.0
        }
    }
}

/// Convenience wrapper around [`TrendAnalyzer::trend`]
pub fn trend(series: &[f64]) -> f64 {
    TrendAnalyzer.trend(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_series() {
        assert_eq!(trend(&[]), 0.0);
        assert_eq!(trend(&[42.0]), 0.0);
        // Three points leave no prior window
        assert_eq!(trend(&[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_flat_series() {
        assert_eq!(trend(&[100.0; 12]), 0.0);
    }

    #[test]
    fn test_growth_between_windows() {
        let series = [100.0, 100.0, 100.0, 110.0, 110.0, 110.0];
        assert!((trend(&series) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_short_prior_window() {
        // Prior window holds only the first value
        let series = [50.0, 100.0, 100.0, 100.0];
        assert!((trend(&series) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_tail_matters() {
        let series = [1.0, 1000.0, 5.0, 10.0, 10.0, 10.0, 5.0, 5.0, 5.0];
        assert!((trend(&series) - (-0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_prior_mean_guard() {
        assert_eq!(trend(&[0.0, 0.0, 0.0, 5.0, 5.0, 5.0]), 0.0);
    }
}
