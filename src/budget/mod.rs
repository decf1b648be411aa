/// Budget planning outputs built on top of the forecasting analytics
///
/// This module provides:
/// - Cost breakdown allocation across spending buckets
/// - Rule-based insights, risk factors and recommendations
/// - The static cost optimization catalog
/// - What-if scenario simulation

pub mod breakdown;
pub mod insights;
pub mod risks;
pub mod recommendations;
pub mod optimization;
pub mod scenario;

pub use breakdown::CostBreakdownAllocator;
pub use insights::InsightGenerator;
pub use risks::RiskIdentifier;
pub use recommendations::RecommendationGenerator;

pub use optimization::{
    CostOptimizationSuggestion, OptimizationCategory, OptimizationScope,
    OptimizationSuggestionGenerator, Priority, Timeframe
};

pub use scenario::{
    RiskLevel, ScenarioImpact, ScenarioParameters, ScenarioResult, ScenarioSimulator
};

use serde::{Deserialize, Serialize};

/// Predicted spending split into buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub personnel_cost: f64,
    pub infrastructure_cost: f64,
    pub operational_cost: f64,
    pub emergency_fund: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.personnel_cost + self.infrastructure_cost + self.operational_cost + self.emergency_fund
    }
}

/// Forecast for one future period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub period: String,
    pub predicted_amount: f64,
    pub confidence: f64,
    pub breakdown: CostBreakdown,
    pub insights: Vec<String>,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub model_version: String,
}
