pub mod records;
pub mod analytics;
pub mod budget;
pub mod detection;
pub mod engine;
pub mod error;

/// Version stamped on every forecast result
pub const MODEL_VERSION: &str = "1.0.0";

pub use records::{next_period, HistoricalPeriodRecord, PeriodKey, PeriodType, SyntheticHistory};
pub use error::{ForecastError, Result};
pub use analytics::{
    ConfidenceEstimator, EnsembleForecastModel, FittedEnsemble, TrendAnalyzer,
    FittedModel, Regressor, LinearRegressor, PolynomialRegressor, MultiFactorRegressor
};
pub use budget::{
    CostBreakdown, ForecastResult, CostOptimizationSuggestion, OptimizationScope,
    ScenarioParameters, ScenarioResult, ScenarioImpact, RiskLevel
};
pub use detection::{DemandSurgePrediction, SurgeDetector, SurgeSeverity};
pub use engine::{BudgetForecastEngine, EngineConfig};

pub mod prelude {
    pub use crate::records::{next_period, HistoricalPeriodRecord, PeriodKey, PeriodType};
    pub use crate::error::{ForecastError, Result};
    pub use crate::analytics::{EnsembleForecastModel, Regressor, FittedModel};
    pub use crate::budget::{
        CostBreakdown, ForecastResult, CostOptimizationSuggestion, OptimizationScope,
        ScenarioParameters, ScenarioResult, RiskLevel
    };
    pub use crate::detection::{DemandSurgePrediction, SurgeSeverity};
    pub use crate::engine::{BudgetForecastEngine, EngineConfig};
    pub use crate::MODEL_VERSION;
}
