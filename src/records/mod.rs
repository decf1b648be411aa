/// Historical input records for the forecasting engine.
///
/// Records arrive ordered ascending by period from an external store. The engine never
/// re-sorts them and never mutates them; every component borrows the window read-only.

pub mod period;
pub mod synthetic;

pub use period::{next_period, PeriodKey, PeriodType};
pub use synthetic::SyntheticHistory;

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// One period of observed spending and complaint activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPeriodRecord {
    pub period: String,
    pub actual_amount: f64,
    pub complaint_count: u64,
    pub resolved_count: u64,
    pub emergency_events: u64,
    pub personnel_cost: f64,
    pub infrastructure_cost: f64,
    pub operational_cost: f64,
}

impl HistoricalPeriodRecord {
    /// Reject records with a malformed period key or monetary fields that are negative or
    /// not finite.
    ///
    /// Counts are unsigned so only amounts need checking.
    pub fn validate(&self) -> Result<()> {
        if self.period.trim().is_empty() {
            return Err(ForecastError::invalid_record(&self.period, "period", "must not be empty"));
        }
        if let Err(err) = self.period.parse::<PeriodKey>() {
            return Err(ForecastError::invalid_record(&self.period, "period", err.to_string()));
        }

        for (field, value) in [
            ("actualAmount", self.actual_amount),
            ("personnelCost", self.personnel_cost),
            ("infrastructureCost", self.infrastructure_cost),
            ("operationalCost", self.operational_cost),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::invalid_record(&self.period, field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(ForecastError::invalid_record(
                    &self.period,
                    field,
                    format!("must be non-negative, got {}", value),
                ));
            }
        }

        Ok(())
    }

    /// Parsed period key, if the key is well formed
    pub fn period_key(&self) -> Option<PeriodKey> {
        self.period.parse().ok()
    }
}

/// Validate every record in a window, failing on the first malformed one.
pub fn validate_history(history: &[HistoricalPeriodRecord]) -> Result<()> {
    history.iter().try_for_each(HistoricalPeriodRecord::validate)
}

pub fn amounts(history: &[HistoricalPeriodRecord]) -> Vec<f64> {
    history.iter().map(|r| r.actual_amount).collect()
}

pub fn complaint_counts(history: &[HistoricalPeriodRecord]) -> Vec<f64> {
    history.iter().map(|r| r.complaint_count as f64).collect()
}

pub fn emergency_counts(history: &[HistoricalPeriodRecord]) -> Vec<f64> {
    history.iter().map(|r| r.emergency_events as f64).collect()
}
