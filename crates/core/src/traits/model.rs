//! Prediction model trait
//!
//! The form variant hands a 12-feature vector to a pre-trained regression
//! model and thresholds the score. Implementations live in `ovacare-model`;
//! tests can plug in fixed-score stubs.

use thiserror::Error;

use crate::form::{FeatureVector, FEATURE_COUNT};

/// Errors raised by a prediction backend
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model I/O error: {0}")]
    Io(String),

    #[error("Model parse error: {0}")]
    Parse(String),

    #[error("Model expects {expected} coefficients, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Model produced a non-finite score")]
    NonFinite,

    #[error(transparent)]
    Input(#[from] crate::Error),
}

impl ModelError {
    /// Short label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ModelError::Io(_) => "io",
            ModelError::Parse(_) => "parse",
            ModelError::DimensionMismatch { .. } => "dimension",
            ModelError::NonFinite => "non_finite",
            ModelError::Input(_) => "input",
        }
    }
}

/// Regression model producing a risk score from a feature vector
///
/// # Example
///
/// ```ignore
/// let score = model.predict(&answers.to_features()?)?;
/// let label = Prediction::from_score(score);
/// ```
pub trait RiskModel: Send + Sync {
    /// Score a feature vector; higher means more likely positive
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Model identifier for logs
    fn name(&self) -> &str;

    /// Number of input features the model accepts
    fn input_dim(&self) -> usize {
        FEATURE_COUNT
    }
}
