/// Rule-based budget recommendations.

use crate::analytics::statistics::safe_ratio;
use crate::budget::CostBreakdown;
use crate::records::HistoricalPeriodRecord;

const PERSONNEL_SHARE_THRESHOLD: f64 = 0.5;
/// Complaints handled per 1,000 of infrastructure spend
const INFRASTRUCTURE_EFFICIENCY_THRESHOLD: f64 = 0.7;

pub const PREDICTIVE_MAINTENANCE: &str =
    "Adopt predictive maintenance for public infrastructure to reduce reactive repair costs";
pub const DIGITAL_TRANSFORMATION: &str =
    "Invest in digital transformation of complaint handling to lower cost per resolution";

#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        breakdown: &CostBreakdown,
        predicted_amount: f64,
        history: &[HistoricalPeriodRecord],
        risk_factors: &[String],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        let personnel_share = safe_ratio(breakdown.personnel_cost, predicted_amount);
        if personnel_share > PERSONNEL_SHARE_THRESHOLD {
            recommendations.push(format!(
                "Personnel costs account for {:.1}% of the budget; consider automating routine complaint triage",
                personnel_share * 100.0
            ));
        }

        let infrastructure_spend: f64 = history.iter().map(|r| r.infrastructure_cost).sum();
        if infrastructure_spend > 0.0 {
            let complaints: u64 = history.iter().map(|r| r.complaint_count).sum();
            let efficiency = safe_ratio(complaints as f64, infrastructure_spend / 1000.0);
            if efficiency < INFRASTRUCTURE_EFFICIENCY_THRESHOLD {
                recommendations.push(
                    "Review infrastructure spending and consider shared resources across districts".to_string(),
                );
            }
        }

        if risk_factors.iter().any(|risk| risk.to_lowercase().contains("emergency")) {
            recommendations.push(
                "Increase the emergency fund allocation to cover rising emergency demand".to_string(),
            );
        }

        recommendations.push(PREDICTIVE_MAINTENANCE.to_string());
        recommendations.push(DIGITAL_TRANSFORMATION.to_string());

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn breakdown(personnel: f64) -> CostBreakdown {
        CostBreakdown {
            personnel_cost: personnel,
            infrastructure_cost: 0.0,
            operational_cost: 0.0,
            emergency_fund: 0.0,
        }
    }

    fn record(complaints: u64, infrastructure: f64) -> HistoricalPeriodRecord {
        HistoricalPeriodRecord {
            period: "2025-01".to_string(),
            actual_amount: 1000.0,
            complaint_count: complaints,
            resolved_count: complaints,
            emergency_events: 0,
            personnel_cost: 0.0,
            infrastructure_cost: infrastructure,
            operational_cost: 0.0,
        }
    }

    #[test]
    fn test_strategic_recommendations_always_present() {
        let recommendations = RecommendationGenerator::new().generate(&breakdown(0.0), 0.0, &[], &[]);
        assert_eq!(
            recommendations,
            vec![PREDICTIVE_MAINTENANCE.to_string(), DIGITAL_TRANSFORMATION.to_string()]
        );
    }

    #[test]
    fn test_personnel_heavy_budget() {
        let recommendations = RecommendationGenerator::new().generate(&breakdown(600.0), 1000.0, &[], &[]);
        assert!(recommendations[0].contains("automating"));
        assert_eq!(recommendations.len(), 3);
    }

    #[test]
    fn test_infrastructure_review() {
        // 10 complaints per 100,000 of infrastructure spend
        let history = vec![record(10, 100_000.0)];
        let recommendations = RecommendationGenerator::new().generate(&breakdown(0.0), 1000.0, &history, &[]);
        assert!(recommendations.iter().any(|r| r.contains("shared resources")));

        let efficient = vec![record(500, 1000.0)];
        let recommendations = RecommendationGenerator::new().generate(&breakdown(0.0), 1000.0, &efficient, &[]);
        assert!(!recommendations.iter().any(|r| r.contains("shared resources")));
    }

    #[test]
    fn test_emergency_risk_triggers_fund_increase() {
        let risks = vec!["Rising Emergency events (50.0% increase)".to_string()];
        let recommendations = RecommendationGenerator::new().generate(&breakdown(0.0), 1000.0, &[], &risks);
        assert!(recommendations.iter().any(|r| r.starts_with("Increase the emergency fund")));
    }
}
