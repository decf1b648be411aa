/// What-if scenario simulation over a baseline forecast set.

use crate::analytics::confidence::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::analytics::statistics::percent_change;
use crate::budget::{CostBreakdown, ForecastResult};
use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Percentage deltas applied to a baseline; all default to 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScenarioParameters {
    pub complaint_volume_change: f64,
    pub emergency_events_change: f64,
    pub personnel_cost_change: f64,
    pub infrastructure_cost_change: f64,
    pub operational_cost_change: f64,
    pub efficiency_improvement: f64,
}

impl ScenarioParameters {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("complaintVolumeChange", self.complaint_volume_change),
            ("emergencyEventsChange", self.emergency_events_change),
            ("personnelCostChange", self.personnel_cost_change),
            ("infrastructureCostChange", self.infrastructure_cost_change),
            ("operationalCostChange", self.operational_cost_change),
            ("efficiencyImprovement", self.efficiency_improvement),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::invalid_parameter(format!("{} must be a finite percentage", name)));
            }
        }
        Ok(())
    }

    /// Sum of the absolute values of the five change deltas
    pub fn complexity(&self) -> f64 {
        self.complaint_volume_change.abs()
            + self.emergency_events_change.abs()
            + self.personnel_cost_change.abs()
            + self.infrastructure_cost_change.abs()
            + self.operational_cost_change.abs()
    }

    pub fn risk_score(&self) -> f64 {
        self.complexity() - self.efficiency_improvement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 20.0 {
            RiskLevel::Low
        } else if score < 50.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Aggregate percentage change of adjusted versus baseline totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioImpact {
    pub total_budget_change: f64,
    pub personnel_change: f64,
    pub infrastructure_change: f64,
    pub operational_change: f64,
    pub emergency_fund_change: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub parameters: ScenarioParameters,
    pub baseline_forecast: Vec<ForecastResult>,
    pub adjusted_forecast: Vec<ForecastResult>,
    pub impact: ScenarioImpact,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioSimulator;

impl ScenarioSimulator {
    pub fn new() -> Self {
        Self
    }

    pub fn simulate(&self, baseline: &[ForecastResult], parameters: &ScenarioParameters) -> Result<ScenarioResult> {
        parameters.validate()?;

        let adjusted: Vec<ForecastResult> = baseline
            .iter()
            .map(|forecast| self.adjust(forecast, parameters))
            .collect();

        let impact = ScenarioImpact {
            total_budget_change: percent_change(sum_by(baseline, |f| f.predicted_amount), sum_by(&adjusted, |f| f.predicted_amount)),
            personnel_change: percent_change(
                sum_by(baseline, |f| f.breakdown.personnel_cost),
                sum_by(&adjusted, |f| f.breakdown.personnel_cost),
            ),
            infrastructure_change: percent_change(
                sum_by(baseline, |f| f.breakdown.infrastructure_cost),
                sum_by(&adjusted, |f| f.breakdown.infrastructure_cost),
            ),
            operational_change: percent_change(
                sum_by(baseline, |f| f.breakdown.operational_cost),
                sum_by(&adjusted, |f| f.breakdown.operational_cost),
            ),
            emergency_fund_change: percent_change(
                sum_by(baseline, |f| f.breakdown.emergency_fund),
                sum_by(&adjusted, |f| f.breakdown.emergency_fund),
            ),
            risk_level: RiskLevel::from_score(parameters.risk_score()),
        };

        log::info!(
            "Simulated scenario over {} periods: total change {:.1}%, risk {:?}",
            baseline.len(),
            impact.total_budget_change,
            impact.risk_level
        );

        let recommendations = self.recommend(parameters, &impact);

        Ok(ScenarioResult {
            parameters: *parameters,
            baseline_forecast: baseline.to_vec(),
            adjusted_forecast: adjusted,
            impact,
            recommendations,
        })
    }

    fn adjust(&self, forecast: &ForecastResult, p: &ScenarioParameters) -> ForecastResult {
        let factor = |change: f64| 1.0 + change / 100.0;
        let efficiency = 1.0 - p.efficiency_improvement / 100.0;
        let confidence_penalty = (1.0 - p.complexity() / 500.0).max(0.1);

        let breakdown = CostBreakdown {
            personnel_cost: forecast.breakdown.personnel_cost * factor(p.personnel_cost_change) * efficiency,
            infrastructure_cost: forecast.breakdown.infrastructure_cost * factor(p.infrastructure_cost_change),
            operational_cost: forecast.breakdown.operational_cost * factor(p.operational_cost_change) * efficiency,
            emergency_fund: forecast.breakdown.emergency_fund * factor(p.emergency_events_change),
        };

        ForecastResult {
            predicted_amount: forecast.predicted_amount * factor(p.complaint_volume_change) * efficiency,
            confidence: (forecast.confidence * confidence_penalty).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE),
            breakdown,
            ..forecast.clone()
        }
    }

    fn recommend(&self, parameters: &ScenarioParameters, impact: &ScenarioImpact) -> Vec<String> {
        let mut recommendations = Vec::new();

        if impact.total_budget_change > 10.0 {
            recommendations.push(format!(
                "Scenario raises the total budget by {:.1}%; identify additional funding before committing",
                impact.total_budget_change
            ));
        } else if impact.total_budget_change < -10.0 {
            recommendations.push(format!(
                "Scenario lowers the total budget by {:.1}%; confirm service levels can be maintained",
                impact.total_budget_change.abs()
            ));
        }

        if impact.risk_level == RiskLevel::High {
            recommendations.push(
                "High-risk scenario: phase the changes in gradually and monitor monthly".to_string(),
            );
        }

        if parameters.efficiency_improvement > 0.0 {
            recommendations.push(format!(
                "Track delivery of the assumed {:.1}% efficiency improvement against actual spend",
                parameters.efficiency_improvement
            ));
        }

        if parameters.emergency_events_change > 0.0 {
            recommendations.push(format!(
                "Emergency events rise by {:.1}%; review emergency fund adequacy",
                parameters.emergency_events_change
            ));
        }

        if parameters.complexity() > 100.0 {
            recommendations.push(
                "Many simultaneous changes reduce forecast confidence; validate with a smaller scenario first".to_string(),
            );
        }

        recommendations
    }
}

fn sum_by(forecasts: &[ForecastResult], value: impl Fn(&ForecastResult) -> f64) -> f64 {
    forecasts.iter().map(value).sum()
}
