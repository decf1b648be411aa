/// Point-prediction models used by the ensemble forecaster.
///
/// A [`Regressor`] fits a [`FittedModel`] from a historical window; the fitted model maps a
/// period index to a predicted amount. The least-squares regressors also accept raw `(x, y)`
/// pairs through `fit_points`, so another backend can be swapped in without touching the
/// ensemble.

use crate::analytics::statistics::{mean, safe_ratio};
use crate::analytics::trend::trend;
use crate::error::{ForecastError, Result};
use crate::records::{self, HistoricalPeriodRecord};
use std::fmt;

/// A fitted model that predicts a value for a period index
pub trait FittedModel: Send + Sync + fmt::Debug {
    fn predict(&self, x: f64) -> f64;
}

/// Core trait for ensemble members
pub trait Regressor: Send + Sync + fmt::Debug {
    fn fit(&self, history: &[HistoricalPeriodRecord]) -> Result<Box<dyn FittedModel>>;

    fn name(&self) -> &str;
}

/// `(index, actual_amount)` pairs for a window
fn indexed_amounts(history: &[HistoricalPeriodRecord]) -> (Vec<f64>, Vec<f64>) {
    let xs = (0..history.len()).map(|i| i as f64).collect();
    (xs, records::amounts(history))
}

fn check_points(xs: &[f64], ys: &[f64], required: usize) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(ForecastError::invalid_parameter(format!(
            "x and y lengths differ: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < required {
        return Err(ForecastError::insufficient_history(required, xs.len()));
    }
    Ok(())
}

// Linear

#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRegressor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearRegressor {
    /// Ordinary least squares line through the given points
    pub fn fit_points(&self, xs: &[f64], ys: &[f64]) -> Result<LinearModel> {
        check_points(xs, ys, 2)?;

        let n = xs.len() as f64;
        let x_sum: f64 = xs.iter().sum();
        let y_sum: f64 = ys.iter().sum();
        let xy_sum: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
        let x_sq_sum: f64 = xs.iter().map(|x| x * x).sum();

        let denominator = n * x_sq_sum - x_sum * x_sum;
        if denominator.abs() < 1e-10 {
            return Err(ForecastError::numerical("singular system in linear regression"));
        }

        let slope = (n * xy_sum - x_sum * y_sum) / denominator;
        let intercept = (y_sum - slope * x_sum) / n;

        Ok(LinearModel { intercept, slope })
    }
}

impl FittedModel for LinearModel {
    fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

impl Regressor for LinearRegressor {
    fn fit(&self, history: &[HistoricalPeriodRecord]) -> Result<Box<dyn FittedModel>> {
        let (xs, ys) = indexed_amounts(history);
        Ok(Box::new(self.fit_points(&xs, &ys)?))
    }

    fn name(&self) -> &str {
        "linear"
    }
}

// Polynomial

#[derive(Debug, Clone, Copy)]
pub struct PolynomialRegressor {
    degree: usize,
}

/// Coefficients in ascending powers of x
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    pub coefficients: Vec<f64>,
}

impl PolynomialRegressor {
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Quadratic least squares, the ensemble default
    pub fn quadratic() -> Self {
        Self::new(2)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Least-squares polynomial fit via the normal equations
    pub fn fit_points(&self, xs: &[f64], ys: &[f64]) -> Result<PolynomialModel> {
        check_points(xs, ys, self.degree + 1)?;

        let size = self.degree + 1;
        let mut power_sums = vec![0.0; 2 * self.degree + 1];
        let mut rhs = vec![0.0; size];

        for (&x, &y) in xs.iter().zip(ys) {
            let mut power = 1.0;
            for (k, sum) in power_sums.iter_mut().enumerate() {
                *sum += power;
                if k < size {
                    rhs[k] += power * y;
                }
                power *= x;
            }
        }

        let matrix: Vec<Vec<f64>> = (0..size)
            .map(|row| (0..size).map(|col| power_sums[row + col]).collect())
            .collect();

        let coefficients = solve_linear_system(matrix, rhs)?;
        Ok(PolynomialModel { coefficients })
    }
}

impl Default for PolynomialRegressor {
    fn default() -> Self {
        Self::quadratic()
    }
}

impl FittedModel for PolynomialModel {
    fn predict(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }
}

impl Regressor for PolynomialRegressor {
    fn fit(&self, history: &[HistoricalPeriodRecord]) -> Result<Box<dyn FittedModel>> {
        let (xs, ys) = indexed_amounts(history);
        Ok(Box::new(self.fit_points(&xs, &ys)?))
    }

    fn name(&self) -> &str {
        "polynomial"
    }
}

/// Gaussian elimination with partial pivoting
fn solve_linear_system(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();
    let scale = matrix
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tolerance = scale.max(1.0) * 1e-12;

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))
            .unwrap_or(col);

        if matrix[pivot_row][col].abs() < tolerance {
            return Err(ForecastError::numerical("singular system in polynomial regression"));
        }

        matrix.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }

    Ok(solution)
}

// Multi-factor heuristic

/// Blends the average spend with a complaint- and emergency-driven projection.
///
/// Not a regression: the fitted value is the same for every index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFactorRegressor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiFactorModel {
    pub projected_amount: f64,
}

impl MultiFactorRegressor {
    const PROJECTION_WEIGHT: f64 = 0.3;
    const AVERAGE_WEIGHT: f64 = 0.7;

    pub fn project(&self, history: &[HistoricalPeriodRecord]) -> Result<MultiFactorModel> {
        let last = history
            .last()
            .ok_or_else(|| ForecastError::insufficient_history(1, 0))?;

        let amounts = records::amounts(history);
        let complaints = records::complaint_counts(history);
        let emergencies = records::emergency_counts(history);

        let avg_amount = mean(&amounts);
        let complaint_weight = safe_ratio(avg_amount, mean(&complaints));
        let emergency_weight = safe_ratio(avg_amount, mean(&emergencies));

        let projected_complaints = last.complaint_count as f64 * (1.0 + trend(&complaints));
        let projected_emergencies = last.emergency_events as f64 * (1.0 + trend(&emergencies));

        let projected_amount = Self::PROJECTION_WEIGHT
            * (projected_complaints * complaint_weight + projected_emergencies * emergency_weight)
            + Self::AVERAGE_WEIGHT * avg_amount;

        Ok(MultiFactorModel { projected_amount })
    }
}

impl FittedModel for MultiFactorModel {
    fn predict(&self, _x: f64) -> f64 {
        self.projected_amount
    }
}

impl Regressor for MultiFactorRegressor {
    fn fit(&self, history: &[HistoricalPeriodRecord]) -> Result<Box<dyn FittedModel>> {
        Ok(Box::new(self.project(history)?))
    }

    fn name(&self) -> &str {
        "multi_factor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(i: usize, amount: f64, complaints: u64, emergencies: u64) -> HistoricalPeriodRecord {
        HistoricalPeriodRecord {
            period: format!("2025-{:02}", i + 1),
            actual_amount: amount,
            complaint_count: complaints,
            resolved_count: complaints,
            emergency_events: emergencies,
            personnel_cost: amount * 0.4,
            infrastructure_cost: amount * 0.35,
            operational_cost: amount * 0.2,
        }
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 12.0, 14.0, 16.0, 18.0];
        let model = LinearRegressor.fit_points(&xs, &ys).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-10);
        assert!((model.intercept - 10.0).abs() < 1e-10);
        assert!((model.predict(5.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_linear_rejects_degenerate_input() {
        assert!(matches!(
            LinearRegressor.fit_points(&[1.0], &[1.0]),
            Err(ForecastError::InsufficientHistory { required: 2, actual: 1 })
        ));
        assert!(matches!(
            LinearRegressor.fit_points(&[2.0, 2.0], &[1.0, 5.0]),
            Err(ForecastError::NumericalError(_))
        ));
        assert!(LinearRegressor.fit_points(&[1.0, 2.0], &[1.0]).is_err());
    }

    #[test]
    fn test_quadratic_fit_exact_parabola() {
        let xs: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 + 2.0 * x + 0.5 * x * x).collect();
        let model = PolynomialRegressor::quadratic().fit_points(&xs, &ys).unwrap();
        assert!((model.coefficients[0] - 3.0).abs() < 1e-6);
        assert!((model.coefficients[1] - 2.0).abs() < 1e-6);
        assert!((model.coefficients[2] - 0.5).abs() < 1e-6);
        assert!((model.predict(6.0) - (3.0 + 12.0 + 18.0)).abs() < 1e-6);
    }

    #[test]
    fn test_quadratic_needs_three_points() {
        let result = PolynomialRegressor::quadratic().fit_points(&[0.0, 1.0], &[1.0, 2.0]);
        assert!(matches!(result, Err(ForecastError::InsufficientHistory { required: 3, .. })));
    }

    #[test]
    fn test_quadratic_singular_system() {
        let result = PolynomialRegressor::quadratic().fit_points(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(ForecastError::NumericalError(_))));
    }

    #[test]
    fn test_multi_factor_on_flat_history() {
        let history: Vec<_> = (0..6).map(|i| record(i, 1000.0, 100, 2)).collect();
        let model = MultiFactorRegressor.project(&history).unwrap();
        // 0.3 * (100 * 10 + 2 * 500) + 0.7 * 1000
        assert!((model.projected_amount - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_factor_zero_divisors() {
        let history: Vec<_> = (0..4).map(|i| record(i, 1000.0, 0, 0)).collect();
        let model = MultiFactorRegressor.project(&history).unwrap();
        assert!((model.projected_amount - 700.0).abs() < 1e-9);
        assert!(model.predict(99.0).is_finite());
    }

    #[test]
    fn test_regressor_trait_objects() {
        let history: Vec<_> = (0..5).map(|i| record(i, 100.0 + 10.0 * i as f64, 50, 1)).collect();
        let members: Vec<Box<dyn Regressor>> = vec![
            Box::new(LinearRegressor),
            Box::new(PolynomialRegressor::quadratic()),
            Box::new(MultiFactorRegressor),
        ];
        for member in &members {
            let model = member.fit(&history).unwrap();
            assert!(model.predict(5.0).is_finite(), "{} produced a non-finite value", member.name());
        }
        let linear = members[0].fit(&history).unwrap();
        assert!((linear.predict(5.0) - 150.0).abs() < 1e-9);
    }
}
