pub type Result<T> = std::result::Result<T, ForecastError>;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Insufficient history: need at least {required} periods, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    #[error("Invalid record for period '{period}': field '{field}' {reason}")]
    InvalidRecord {
        period: String,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numerical error: {0}")]
    NumericalError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn insufficient_history(required: usize, actual: usize) -> Self {
        ForecastError::InsufficientHistory { required, actual }
    }

    pub fn invalid_record<P: Into<String>, R: Into<String>>(period: P, field: &'static str, reason: R) -> Self {
        ForecastError::InvalidRecord {
            period: period.into(),
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_period<S: Into<String>>(msg: S) -> Self {
        ForecastError::InvalidPeriod(msg.into())
    }

    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        ForecastError::InvalidParameter(msg.into())
    }

    pub fn numerical<S: Into<String>>(msg: S) -> Self {
        ForecastError::NumericalError(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        ForecastError::Config(msg.into())
    }
}
