/// Cost optimization suggestions.
///
/// The generator returns a fixed placeholder catalog. The department, state and district
/// scope is accepted for API compatibility but does not influence the output; no data-driven
/// model backs these suggestions.

use crate::analytics::statistics::safe_ratio;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationCategory {
    Personnel,
    Infrastructure,
    Operational,
    Procurement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Timeframe {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostOptimizationSuggestion {
    pub category: OptimizationCategory,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub potential_savings: f64,
    pub implementation_cost: f64,
    /// `potential_savings / implementation_cost`, 0 when there is no implementation cost
    pub roi: f64,
    pub timeframe: Timeframe,
    pub reasoning: Vec<String>,
}

impl CostOptimizationSuggestion {
    #[allow(clippy::too_many_arguments)]
    fn new(
        category: OptimizationCategory,
        priority: Priority,
        title: &str,
        description: &str,
        potential_savings: f64,
        implementation_cost: f64,
        timeframe: Timeframe,
        reasoning: &[&str],
    ) -> Self {
        Self {
            category,
            priority,
            title: title.to_string(),
            description: description.to_string(),
            potential_savings,
            implementation_cost,
            roi: safe_ratio(potential_savings, implementation_cost),
            timeframe,
            reasoning: reasoning.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Administrative scope a suggestion request is made for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationScope {
    pub department_id: Option<String>,
    pub state_id: Option<String>,
    pub district_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OptimizationSuggestionGenerator;

impl OptimizationSuggestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// The static suggestion catalog; `scope` is ignored.
    pub fn suggest(&self, scope: &OptimizationScope) -> Vec<CostOptimizationSuggestion> {
        log::debug!(
            "Returning static optimization catalog (scope {:?} does not affect suggestions)",
            scope
        );

        vec![
            CostOptimizationSuggestion::new(
                OptimizationCategory::Personnel,
                Priority::High,
                "Automate complaint triage",
                "Route and categorize incoming complaints automatically to free staff for resolution work",
                150_000.0,
                50_000.0,
                Timeframe::ShortTerm,
                &[
                    "Manual triage consumes a large share of staff hours",
                    "Automated routing shortens time to first response",
                ],
            ),
            CostOptimizationSuggestion::new(
                OptimizationCategory::Infrastructure,
                Priority::Medium,
                "Predictive maintenance program",
                "Schedule infrastructure repairs from condition data before failures generate complaints",
                200_000.0,
                100_000.0,
                Timeframe::LongTerm,
                &[
                    "Reactive repairs cost more than planned maintenance",
                    "Recurring infrastructure complaints indicate preventable failures",
                ],
            ),
            CostOptimizationSuggestion::new(
                OptimizationCategory::Operational,
                Priority::Medium,
                "Consolidate field operations",
                "Batch field visits by district to cut travel and overtime",
                80_000.0,
                20_000.0,
                Timeframe::MediumTerm,
                &[
                    "Field visits are scheduled per complaint rather than per area",
                    "Route consolidation reduces fuel and overtime spend",
                ],
            ),
            CostOptimizationSuggestion::new(
                OptimizationCategory::Procurement,
                Priority::Low,
                "Bulk procurement contracts",
                "Negotiate shared supply contracts across departments",
                60_000.0,
                10_000.0,
                Timeframe::MediumTerm,
                &[
                    "Departments purchase overlapping supplies separately",
                    "Volume commitments unlock lower unit prices",
                ],
            ),
        ]
    }
}
