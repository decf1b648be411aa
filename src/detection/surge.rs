/// Demand surge detection over complaint-volume history.
///
/// A period whose complaint count exceeds the mean by more than two standard deviations is
/// reported as a surge. The window length, confidence and cost multiplier are fixed
/// constants with no statistical derivation.

use crate::analytics::statistics::{mean, std_dev};
use crate::records::{self, HistoricalPeriodRecord};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_SURGE_HISTORY: usize = 6;
pub const SURGE_WINDOW_DAYS: i64 = 30;
pub const SURGE_CONFIDENCE: f64 = 0.7;
pub const SURGE_COST_MULTIPLIER: f64 = 1.5;
const MEDIUM_SIGMA: f64 = 2.0;
const HIGH_SIGMA: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurgeSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSurgePrediction {
    pub severity: SurgeSeverity,
    /// Historical period whose complaint volume triggered the prediction
    pub source_period: String,
    pub predicted_start: DateTime<Utc>,
    pub predicted_end: DateTime<Utc>,
    pub confidence: f64,
    pub estimated_complaints: u64,
    pub estimated_cost: f64,
    pub factors: Vec<String>,
    pub affected_areas: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SurgeDetector;

impl SurgeDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, history: &[HistoricalPeriodRecord]) -> Vec<DemandSurgePrediction> {
        self.detect_at(history, Utc::now())
    }

    /// Detect surges with prediction windows starting at `now`
    pub fn detect_at(&self, history: &[HistoricalPeriodRecord], now: DateTime<Utc>) -> Vec<DemandSurgePrediction> {
        if history.len() < MIN_SURGE_HISTORY {
            log::debug!(
                "Surge detection skipped: {} periods, need {}",
                history.len(),
                MIN_SURGE_HISTORY
            );
            return Vec::new();
        }

        let counts = records::complaint_counts(history);
        let mean = mean(&counts);
        let sigma = std_dev(&counts);
        let medium_threshold = mean + MEDIUM_SIGMA * sigma;
        let high_threshold = mean + HIGH_SIGMA * sigma;

        let surges: Vec<DemandSurgePrediction> = history
            .iter()
            .filter(|record| record.complaint_count as f64 > medium_threshold)
            .map(|record| {
                let severity = if record.complaint_count as f64 > high_threshold {
                    SurgeSeverity::High
                } else {
                    SurgeSeverity::Medium
                };

                DemandSurgePrediction {
                    severity,
                    source_period: record.period.clone(),
                    predicted_start: now,
                    predicted_end: now + Duration::days(SURGE_WINDOW_DAYS),
                    confidence: SURGE_CONFIDENCE,
                    estimated_complaints: record.complaint_count,
                    estimated_cost: record.actual_amount * SURGE_COST_MULTIPLIER,
                    factors: vec!["Historical pattern".to_string(), "Seasonal variation".to_string()],
                    affected_areas: vec!["All districts".to_string()],
                }
            })
            .collect();

        if !surges.is_empty() {
            log::info!(
                "Detected {} demand surges (mean {:.1}, sigma {:.1})",
                surges.len(),
                mean,
                sigma
            );
        }

        surges
    }
}
