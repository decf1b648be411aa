/// Forecasting analytics for historical budget windows
///
/// This module provides the numeric core of the engine:
/// - Descriptive statistics with division guards
/// - Recent-versus-prior trend analysis
/// - Pluggable regressors (linear, quadratic, multi-factor heuristic)
/// - A fixed-weight ensemble forecaster
/// - Back-tested forecast confidence

pub mod statistics;
pub mod trend;
pub mod regression;
pub mod forecasting;
pub mod confidence;

pub use trend::{trend, TrendAnalyzer};

pub use regression::{
    FittedModel, Regressor, LinearRegressor, LinearModel,
    PolynomialRegressor, PolynomialModel, MultiFactorRegressor, MultiFactorModel
};

pub use forecasting::{EnsembleForecastModel, FittedEnsemble, WeightedRegressor, MIN_FORECAST_HISTORY};

pub use confidence::ConfidenceEstimator;
