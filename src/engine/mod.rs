/// Budget forecasting engine
///
/// Coordinates the analytics, budget and detection components for one request:
/// - Multi-period budget forecasts with breakdowns and annotations
/// - Demand surge predictions
/// - The cost optimization catalog
/// - What-if scenario simulation
///
/// The engine holds no per-request state; every call works from the history it is given.


use crate::analytics::{ConfidenceEstimator, EnsembleForecastModel, MIN_FORECAST_HISTORY};
use crate::budget::{
    CostBreakdownAllocator, CostOptimizationSuggestion, ForecastResult, InsightGenerator,
    OptimizationScope, OptimizationSuggestionGenerator, RecommendationGenerator, RiskIdentifier,
    ScenarioParameters, ScenarioResult, ScenarioSimulator,
};
use crate::detection::{DemandSurgePrediction, SurgeDetector};
use crate::error::{ForecastError, Result};
use crate::records::{next_period, validate_history, HistoricalPeriodRecord, PeriodType};
use crate::MODEL_VERSION;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration and request limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Trailing records kept from the supplied history
    pub max_history_len: usize,
    /// Upper bound on periods per forecast request
    pub max_forecast_periods: u32,
    /// Compute the periods of one request on the rayon pool
    pub parallel_forecasts: bool,
    pub default_period_type: PeriodType,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history_len: 24,
            max_forecast_periods: 24,
            parallel_forecasts: true,
            default_period_type: PeriodType::Monthly,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_history_len < MIN_FORECAST_HISTORY {
            return Err(ForecastError::config(format!(
                "maxHistoryLen must be at least {}, got {}",
                MIN_FORECAST_HISTORY, self.max_history_len
            )));
        }
        if self.max_forecast_periods == 0 {
            return Err(ForecastError::config("maxForecastPeriods must be at least 1"));
        }
        Ok(())
    }
}

/// Central engine that wires the forecasting components together
#[derive(Debug)]
pub struct BudgetForecastEngine {
    config: EngineConfig,
    ensemble: EnsembleForecastModel,
    confidence: ConfidenceEstimator,
    allocator: CostBreakdownAllocator,
    insights: InsightGenerator,
    risks: RiskIdentifier,
    recommendations: RecommendationGenerator,
    surge_detector: SurgeDetector,
    optimizer: OptimizationSuggestionGenerator,
    simulator: ScenarioSimulator,
}

impl BudgetForecastEngine {
    /// Create a new engine with default configuration
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create a new engine with custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            config,
            ensemble: EnsembleForecastModel::new(),
            confidence: ConfidenceEstimator::new(),
            allocator: CostBreakdownAllocator::new(),
            insights: InsightGenerator::new(),
            risks: RiskIdentifier::new(),
            recommendations: RecommendationGenerator::new(),
            surge_detector: SurgeDetector::new(),
            optimizer: OptimizationSuggestionGenerator::new(),
            simulator: ScenarioSimulator::new(),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forecast `periods` consecutive periods after the last historical record.
    ///
    /// Each period is forecast from the same window, so the periods are independent and may
    /// run in parallel; the result keeps period order.
    pub fn forecast_budget(
        &self,
        history: &[HistoricalPeriodRecord],
        period_type: PeriodType,
        periods: u32,
    ) -> Result<Vec<ForecastResult>> {
        if periods == 0 || periods > self.config.max_forecast_periods {
            return Err(ForecastError::invalid_parameter(format!(
                "periods must be between 1 and {}, got {}",
                self.config.max_forecast_periods, periods
            )));
        }

        let window = self.window(history);
        validate_history(window)?;
        if window.len() < MIN_FORECAST_HISTORY {
            return Err(ForecastError::insufficient_history(MIN_FORECAST_HISTORY, window.len()));
        }

        log::info!(
            "Forecasting {} {} periods from {} records (model {})",
            periods,
            period_type,
            window.len(),
            MODEL_VERSION
        );

        let last_period = window[window.len() - 1].period.as_str();
        let fitted = self.ensemble.fit(window)?;
        let confidence = self.confidence.estimate(window);
        let insights = self.insights.generate(window);
        let risk_factors = self.risks.identify(window);

        let forecast_one = |offset: u32| -> Result<ForecastResult> {
            let period = next_period(last_period, period_type, offset)?;
            let predicted_amount = fitted.predict_horizon(offset)?.max(0.0);
            let breakdown = self.allocator.allocate(predicted_amount, window);
            let recommendations =
                self.recommendations
                    .generate(&breakdown, predicted_amount, window, &risk_factors);

            Ok(ForecastResult {
                period,
                predicted_amount,
                confidence,
                breakdown,
                insights: insights.clone(),
                risk_factors: risk_factors.clone(),
                recommendations,
                model_version: MODEL_VERSION.to_string(),
            })
        };

        if self.config.parallel_forecasts && periods > 1 {
            (1..=periods).into_par_iter().map(forecast_one).collect()
        } else {
            (1..=periods).map(forecast_one).collect()
        }
    }

    /// Forecast using the configured default period type
    pub fn forecast_default(&self, history: &[HistoricalPeriodRecord], periods: u32) -> Result<Vec<ForecastResult>> {
        self.forecast_budget(history, self.config.default_period_type, periods)
    }

    /// Scan complaint history for demand surges
    pub fn predict_surges(&self, history: &[HistoricalPeriodRecord]) -> Result<Vec<DemandSurgePrediction>> {
        let window = self.window(history);
        validate_history(window)?;
        Ok(self.surge_detector.detect(window))
    }

    /// Static optimization catalog; the scope does not change the suggestions
    pub fn optimization_suggestions(&self, scope: &OptimizationScope) -> Vec<CostOptimizationSuggestion> {
        self.optimizer.suggest(scope)
    }

    /// Apply what-if deltas to a baseline forecast set
    pub fn simulate_scenario(
        &self,
        baseline: &[ForecastResult],
        parameters: &ScenarioParameters,
    ) -> Result<ScenarioResult> {
        self.simulator.simulate(baseline, parameters)
    }

    /// The trailing `max_history_len` records
    fn window<'a>(&self, history: &'a [HistoricalPeriodRecord]) -> &'a [HistoricalPeriodRecord] {
        let max = self.config.max_history_len;
        if history.len() > max {
            log::warn!(
                "History has {} records, using the most recent {}",
                history.len(),
                max
            );
            &history[history.len() - max..]
        } else {
            history
        }
    }
}

impl Default for BudgetForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}
