/// Anomaly detection over complaint-volume history.

pub mod surge;

pub use surge::{DemandSurgePrediction, SurgeDetector, SurgeSeverity};
