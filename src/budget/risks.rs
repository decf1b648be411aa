/// Risk factors identified from a historical window.

use crate::analytics::statistics::{coefficient_of_variation, safe_ratio};
use crate::analytics::trend::trend;
use crate::records::{self, HistoricalPeriodRecord};

const VOLATILITY_THRESHOLD: f64 = 0.25;
const EMERGENCY_TREND_THRESHOLD: f64 = 0.2;
const RESOLUTION_RATE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, Default)]
pub struct RiskIdentifier;

impl RiskIdentifier {
    pub fn new() -> Self {
        Self
    }

    pub fn identify(&self, history: &[HistoricalPeriodRecord]) -> Vec<String> {
        let mut risks = Vec::new();
        if history.is_empty() {
            return risks;
        }

        let volatility = coefficient_of_variation(&records::amounts(history));
        if volatility > VOLATILITY_THRESHOLD {
            risks.push(format!(
                "High budget volatility ({:.1}%) makes spending hard to predict",
                volatility * 100.0
            ));
        }

        let emergency_trend = trend(&records::emergency_counts(history));
        if emergency_trend > EMERGENCY_TREND_THRESHOLD {
            risks.push(format!(
                "Rising emergency events ({:.1}% increase) may exceed the emergency reserve",
                emergency_trend * 100.0
            ));
        }

        let complaints: u64 = history.iter().map(|r| r.complaint_count).sum();
        if complaints > 0 {
            let resolved: u64 = history.iter().map(|r| r.resolved_count).sum();
            let resolution_rate = safe_ratio(resolved as f64, complaints as f64);
            if resolution_rate < RESOLUTION_RATE_THRESHOLD {
                risks.push(format!(
                    "Low complaint resolution rate ({:.1}%) may increase future costs",
                    resolution_rate * 100.0
                ));
            }
        }

        risks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: f64, complaints: u64, resolved: u64, emergencies: u64) -> HistoricalPeriodRecord {
        HistoricalPeriodRecord {
            period: "2025-01".to_string(),
            actual_amount: amount,
            complaint_count: complaints,
            resolved_count: resolved,
            emergency_events: emergencies,
            personnel_cost: 0.0,
            infrastructure_cost: 0.0,
            operational_cost: 0.0,
        }
    }

    #[test]
    fn test_stable_window_has_no_risks() {
        let history: Vec<_> = (0..6).map(|_| record(1000.0, 100, 90, 1)).collect();
        assert!(RiskIdentifier::new().identify(&history).is_empty());
        assert!(RiskIdentifier::new().identify(&[]).is_empty());
    }

    #[test]
    fn test_volatility_risk() {
        let history = vec![record(100.0, 10, 10, 0), record(1000.0, 10, 10, 0), record(100.0, 10, 10, 0)];
        let risks = RiskIdentifier::new().identify(&history);
        assert_eq!(risks.len(), 1);
        assert!(risks[0].starts_with("High budget volatility"));
    }

    #[test]
    fn test_rising_emergencies() {
        let emergencies = [1, 1, 1, 2, 2, 2];
        let history: Vec<_> = emergencies.iter().map(|&e| record(1000.0, 100, 100, e)).collect();
        let risks = RiskIdentifier::new().identify(&history);
        assert!(risks.iter().any(|r| r.to_lowercase().contains("emergency")));
    }

    #[test]
    fn test_low_resolution_rate() {
        let history: Vec<_> = (0..3).map(|_| record(1000.0, 100, 50, 0)).collect();
        let risks = RiskIdentifier::new().identify(&history);
        assert_eq!(risks, vec!["Low complaint resolution rate (50.0%) may increase future costs".to_string()]);
    }
}
