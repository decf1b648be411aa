/// Splits a predicted total into personnel, infrastructure, operational and emergency buckets.

use crate::analytics::statistics::{mean, safe_ratio};
use crate::budget::CostBreakdown;
use crate::records::HistoricalPeriodRecord;

/// Emergency reserve share, never derived from history
pub const EMERGENCY_FUND_RATIO: f64 = 0.05;
/// Personnel / infrastructure / operational split used without history
pub const DEFAULT_RATIOS: [f64; 3] = [0.40, 0.35, 0.20];

#[derive(Debug, Clone, Copy, Default)]
pub struct CostBreakdownAllocator;

impl CostBreakdownAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Split `predicted_amount` using the normalised ratios from [`Self::bucket_ratios`],
    /// not the literal historical shares, so the four buckets always sum to the prediction.
    pub fn allocate(&self, predicted_amount: f64, history: &[HistoricalPeriodRecord]) -> CostBreakdown {
        let [personnel, infrastructure, operational] = self.bucket_ratios(history);

        CostBreakdown {
            personnel_cost: predicted_amount * personnel,
            infrastructure_cost: predicted_amount * infrastructure,
            operational_cost: predicted_amount * operational,
            emergency_fund: predicted_amount * EMERGENCY_FUND_RATIO,
        }
    }

    /// Historical bucket-to-total ratios, rescaled to share whatever the emergency fund leaves.
    ///
    /// Bucket costs need not add up to the recorded total, so the raw ratios are normalised
    /// to keep the breakdown summing to the predicted amount.
    pub fn bucket_ratios(&self, history: &[HistoricalPeriodRecord]) -> [f64; 3] {
        if history.is_empty() {
            return DEFAULT_RATIOS;
        }

        let mean_of = |f: fn(&HistoricalPeriodRecord) -> f64| -> f64 {
            mean(&history.iter().map(f).collect::<Vec<_>>())
        };

        let avg_total = mean_of(|r| r.actual_amount);
        let raw = [
            safe_ratio(mean_of(|r| r.personnel_cost), avg_total),
            safe_ratio(mean_of(|r| r.infrastructure_cost), avg_total),
            safe_ratio(mean_of(|r| r.operational_cost), avg_total),
        ];

        let raw_sum: f64 = raw.iter().sum();
        let target = 1.0 - EMERGENCY_FUND_RATIO;
        if raw_sum <= 0.0 {
            return DEFAULT_RATIOS;
        }
        if (raw_sum - target).abs() > 1e-9 {
            log::debug!(
                "Historical bucket ratios sum to {:.4}, rescaling to {:.2}",
                raw_sum,
                target
            );
        }

        raw.map(|ratio| ratio / raw_sum * target)
    }
}
