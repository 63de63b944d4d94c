//! Core traits for the screening system
//!
//! ```text
//! Prediction:
//!   - RiskModel: feature vector -> continuous score
//! ```

mod model;

pub use model::{ModelError, RiskModel};
