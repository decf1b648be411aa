/// Ensemble forecaster for the next budget period.
///
/// Blends linear, quadratic and multi-factor predictions with fixed weights
/// (0.4 / 0.4 / 0.2). The weights are not learned.

use crate::analytics::regression::{
    FittedModel, LinearRegressor, MultiFactorRegressor, PolynomialRegressor, Regressor,
};
use crate::error::{ForecastError, Result};
use crate::records::HistoricalPeriodRecord;

/// Minimum history the ensemble accepts
pub const MIN_FORECAST_HISTORY: usize = 3;

/// A regressor paired with its blend weight
#[derive(Debug)]
pub struct WeightedRegressor {
    pub regressor: Box<dyn Regressor>,
    pub weight: f64,
}

#[derive(Debug)]
pub struct EnsembleForecastModel {
    members: Vec<WeightedRegressor>,
}

impl EnsembleForecastModel {
    pub fn new() -> Self {
        Self::with_members(vec![
            WeightedRegressor {
                regressor: Box::new(LinearRegressor),
                weight: 0.4,
            },
            WeightedRegressor {
                regressor: Box::new(PolynomialRegressor::quadratic()),
                weight: 0.4,
            },
            WeightedRegressor {
                regressor: Box::new(MultiFactorRegressor),
                weight: 0.2,
            },
        ])
    }

    /// Build an ensemble from custom members, e.g. an alternative least-squares backend
    pub fn with_members(members: Vec<WeightedRegressor>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[WeightedRegressor] {
        &self.members
    }

    /// Blended prediction for the period right after the window
    pub fn predict(&self, history: &[HistoricalPeriodRecord]) -> Result<f64> {
        self.predict_at(history, 1)
    }

    /// Blended prediction `horizon` periods after the last record
    pub fn predict_at(&self, history: &[HistoricalPeriodRecord], horizon: u32) -> Result<f64> {
        self.fit(history)?.predict_horizon(horizon)
    }

    /// Fit every member once so several horizons can be evaluated against the same window.
    ///
    /// Earlier predictions are never fed back in as synthetic history.
    pub fn fit(&self, history: &[HistoricalPeriodRecord]) -> Result<FittedEnsemble> {
        if history.len() < MIN_FORECAST_HISTORY {
            return Err(ForecastError::insufficient_history(MIN_FORECAST_HISTORY, history.len()));
        }

        let members = self
            .members
            .iter()
            .map(|member| {
                Ok(FittedMember {
                    name: member.regressor.name().to_string(),
                    model: member.regressor.fit(history)?,
                    weight: member.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FittedEnsemble {
            members,
            last_index: history.len() - 1,
        })
    }
}

#[derive(Debug)]
struct FittedMember {
    name: String,
    model: Box<dyn FittedModel>,
    weight: f64,
}

/// Ensemble members fitted to one historical window
#[derive(Debug)]
pub struct FittedEnsemble {
    members: Vec<FittedMember>,
    last_index: usize,
}

impl FittedEnsemble {
    /// Evaluate every member at `last_index + horizon` and blend
    pub fn predict_horizon(&self, horizon: u32) -> Result<f64> {
        if horizon == 0 {
            return Err(ForecastError::invalid_parameter("forecast horizon must be at least 1"));
        }

        let x = self.last_index as f64 + horizon as f64;
        let mut blended = 0.0;

        for member in &self.members {
            let prediction = member.model.predict(x);
            log::debug!("{} regressor predicts {:.2} at index {}", member.name, prediction, x);
            blended += member.weight * prediction;
        }

        if !blended.is_finite() {
            return Err(ForecastError::numerical("ensemble produced a non-finite prediction"));
        }

        Ok(blended)
    }
}

impl Default for EnsembleForecastModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_history(n: usize) -> Vec<HistoricalPeriodRecord> {
        (0..n)
            .map(|i| HistoricalPeriodRecord {
                period: format!("2024-{:02}", i + 1),
                actual_amount: 1000.0 + 100.0 * i as f64,
                complaint_count: 100,
                resolved_count: 90,
                emergency_events: 0,
                personnel_cost: 400.0,
                infrastructure_cost: 350.0,
                operational_cost: 200.0,
            })
            .collect()
    }

    #[test]
    fn test_requires_three_points() {
        let model = EnsembleForecastModel::new();
        let result = model.predict(&linear_history(2));
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientHistory { required: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_default_weights() {
        let model = EnsembleForecastModel::new();
        let weights: Vec<f64> = model.members().iter().map(|m| m.weight).collect();
        assert_eq!(weights, vec![0.4, 0.4, 0.2]);
        let names: Vec<&str> = model.members().iter().map(|m| m.regressor.name()).collect();
        assert_eq!(names, vec!["linear", "polynomial", "multi_factor"]);
    }

    #[test]
    fn test_blend_on_linear_history() {
        let history = linear_history(6);
        let model = EnsembleForecastModel::new();
        let prediction = model.predict(&history).unwrap();

        // Linear and quadratic both extrapolate the line to 1600 at index 6.
        let multi = MultiFactorRegressor.project(&history).unwrap().predict(6.0);
        let expected = 0.8 * 1600.0 + 0.2 * multi;
        assert!((prediction - expected).abs() < 1e-6);
    }

    #[test]
    fn test_horizon_extends_extrapolation() {
        let history = linear_history(6);
        let model = EnsembleForecastModel::new();
        let first = model.predict_at(&history, 1).unwrap();
        let third = model.predict_at(&history, 3).unwrap();
        assert!((first - model.predict(&history).unwrap()).abs() < 1e-12);
        // Linear parts move 200 further along a slope of 100 per period
        assert!((third - first - 0.8 * 200.0).abs() < 1e-6);
        assert!(model.predict_at(&history, 0).is_err());
    }
}
