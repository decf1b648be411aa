/// Descriptive insights over a historical window.
///
/// Every rule is a threshold check; a window that triggers nothing yields an empty list.

use crate::analytics::statistics::{mean, safe_ratio};
use crate::analytics::trend::trend;
use crate::records::{self, HistoricalPeriodRecord};
use chrono::Month;
use std::collections::BTreeMap;

const AMOUNT_TREND_THRESHOLD: f64 = 0.10;
const COMPLAINT_TREND_THRESHOLD: f64 = 0.15;
const SEASONAL_MIN_MONTHS: usize = 12;
/// Resolved complaints per 1,000 spent
const EFFICIENCY_THRESHOLD: f64 = 0.8;
/// Emergency events per period
const EMERGENCY_FREQUENCY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, history: &[HistoricalPeriodRecord]) -> Vec<String> {
        let mut insights = Vec::new();
        if history.is_empty() {
            return insights;
        }

        let amount_trend = trend(&records::amounts(history));
        if amount_trend > AMOUNT_TREND_THRESHOLD {
            insights.push(format!(
                "Budget shows an upward trend of {:.1}% over recent periods",
                amount_trend * 100.0
            ));
        } else if amount_trend < -AMOUNT_TREND_THRESHOLD {
            insights.push(format!(
                "Budget shows a downward trend of {:.1}% over recent periods",
                amount_trend.abs() * 100.0
            ));
        }

        let complaint_trend = trend(&records::complaint_counts(history));
        if complaint_trend > COMPLAINT_TREND_THRESHOLD {
            insights.push(format!(
                "Complaint volume has increased by {:.1}%; additional resources may be required",
                complaint_trend * 100.0
            ));
        }

        if let Some(seasonal) = self.seasonal_pattern(history) {
            insights.push(seasonal);
        }

        let total_spend: f64 = history.iter().map(|r| r.actual_amount).sum();
        let total_resolved: u64 = history.iter().map(|r| r.resolved_count).sum();
        if total_spend > 0.0 {
            let efficiency = safe_ratio(total_resolved as f64, total_spend / 1000.0);
            if efficiency < EFFICIENCY_THRESHOLD {
                insights.push(format!(
                    "Cost efficiency is low: {:.2} complaints resolved per 1,000 spent",
                    efficiency
                ));
            }
        }

        let emergency_total: u64 = history.iter().map(|r| r.emergency_events).sum();
        let emergency_frequency = emergency_total as f64 / history.len() as f64;
        if emergency_frequency > EMERGENCY_FREQUENCY_THRESHOLD {
            insights.push(format!(
                "Frequent emergency events ({:.2} per period); maintain an adequate emergency fund",
                emergency_frequency
            ));
        }

        insights
    }

    /// Peak and trough calendar months by average spend, when at least a year of monthly
    /// records is present and the two months differ.
    fn seasonal_pattern(&self, history: &[HistoricalPeriodRecord]) -> Option<String> {
        let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for record in history {
            if let Some(month) = record.period_key().and_then(|key| key.month_of_year()) {
                by_month.entry(month).or_default().push(record.actual_amount);
            }
        }

        let monthly_points: usize = by_month.values().map(Vec::len).sum();
        if monthly_points < SEASONAL_MIN_MONTHS {
            return None;
        }

        let averages: Vec<(u32, f64)> = by_month.iter().map(|(&m, values)| (m, mean(values))).collect();
        let (peak, _) = averages.iter().copied().max_by(|a, b| a.1.total_cmp(&b.1))?;
        let (trough, _) = averages.iter().copied().min_by(|a, b| a.1.total_cmp(&b.1))?;

        if peak == trough {
            return None;
        }

        Some(format!(
            "Seasonal pattern detected: spending peaks in {} and is lowest in {}",
            month_name(peak),
            month_name(trough)
        ))
    }
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly(amounts: &[f64]) -> Vec<HistoricalPeriodRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| HistoricalPeriodRecord {
                period: format!("{}-{:02}", 2024 + i / 12, i % 12 + 1),
                actual_amount: amount,
                complaint_count: 100,
                resolved_count: 95,
                emergency_events: 0,
                personnel_cost: amount * 0.4,
                infrastructure_cost: amount * 0.35,
                operational_cost: amount * 0.2,
            })
            .collect()
    }

    #[test]
    fn test_empty_history() {
        assert!(InsightGenerator::new().generate(&[]).is_empty());
    }

    #[test]
    fn test_quiet_window_yields_nothing() {
        let history = monthly(&[1000.0; 6]);
        assert!(InsightGenerator::new().generate(&history).is_empty());
    }

    #[test]
    fn test_upward_and_downward_trend() {
        let up = monthly(&[1000.0, 1000.0, 1000.0, 1200.0, 1200.0, 1200.0]);
        let insights = InsightGenerator::new().generate(&up);
        assert!(insights.iter().any(|s| s.contains("upward trend of 20.0%")));

        let down = monthly(&[1000.0, 1000.0, 1000.0, 800.0, 800.0, 800.0]);
        let insights = InsightGenerator::new().generate(&down);
        assert!(insights.iter().any(|s| s.contains("downward trend of 20.0%")));
    }

    #[test]
    fn test_complaint_surge_warning() {
        let mut history = monthly(&[1000.0; 6]);
        for record in history.iter_mut().skip(3) {
            record.complaint_count = 130;
            record.resolved_count = 120;
        }
        let insights = InsightGenerator::new().generate(&history);
        assert!(insights.iter().any(|s| s.contains("Complaint volume has increased by 30.0%")));
    }

    #[test]
    fn test_seasonal_pattern_names_months() {
        let mut amounts = vec![1000.0; 12];
        amounts[6] = 1500.0; // July
        amounts[1] = 700.0; // February
        let history = monthly(&amounts);
        let insights = InsightGenerator::new().generate(&history);
        assert!(insights
            .iter()
            .any(|s| s == "Seasonal pattern detected: spending peaks in July and is lowest in February"));
    }

    #[test]
    fn test_seasonal_needs_twelve_monthly_points() {
        let mut amounts = vec![1000.0; 11];
        amounts[3] = 2000.0;
        let history = monthly(&amounts);
        assert!(!InsightGenerator::new()
            .generate(&history)
            .iter()
            .any(|s| s.starts_with("Seasonal")));
    }

    #[test]
    fn test_low_efficiency_and_emergencies() {
        let mut history = monthly(&[1_000_000.0; 4]);
        for record in &mut history {
            record.emergency_events = 1;
        }
        let insights = InsightGenerator::new().generate(&history);
        assert!(insights.iter().any(|s| s.starts_with("Cost efficiency is low")));
        assert!(insights.iter().any(|s| s.starts_with("Frequent emergency events")));
    }
}
