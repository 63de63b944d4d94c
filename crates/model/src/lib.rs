//! Prediction backends for the form variant
//!
//! - [`LinearModel`]: linear regression scorer (`intercept + w·x`) loaded
//!   from a JSON coefficient file
//! - [`FormPredictor`]: validate, encode, score and threshold a form

pub mod linear;
pub mod predictor;

pub use linear::LinearModel;
pub use predictor::{FormPrediction, FormPredictor};

pub use ovacare_core::{ModelError, RiskModel};
