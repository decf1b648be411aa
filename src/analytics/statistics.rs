/// Descriptive statistics shared by the forecasting and detection components.
///
/// All helpers are total: an empty slice or a zero denominator yields 0 rather than NaN.

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standard deviation relative to the mean
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    safe_ratio(std_dev(values), mean(values))
}

/// `numerator / denominator`, or 0 when the denominator is 0 or the result is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Percentage change from `baseline` to `adjusted`, 0 when the baseline is 0
pub fn percent_change(baseline: f64, adjusted: f64) -> f64 {
    safe_ratio(adjusted - baseline, baseline) * 100.0
}
