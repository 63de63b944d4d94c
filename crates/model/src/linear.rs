//! Linear regression model
//!
//! File format:
//!
//! ```json
//! { "name": "pcos-linear-v1", "intercept": -1.2, "coefficients": [0.01, ...] }
//! ```
//!
//! `coefficients` must hold exactly one weight per feature, in feature order.

use ndarray::{Array1, ArrayView1};
use serde::Deserialize;
use std::path::Path;

use ovacare_core::{FeatureVector, ModelError, RiskModel, FEATURE_COUNT};

#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(default)]
    name: Option<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

/// `intercept + coefficients · features`
#[derive(Debug, Clone)]
pub struct LinearModel {
    name: String,
    intercept: f64,
    coefficients: Array1<f64>,
}

impl LinearModel {
    /// Build from raw parameters
    pub fn from_parts(intercept: f64, coefficients: Vec<f64>) -> Result<Self, ModelError> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: coefficients.len(),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        Ok(Self {
            name: "linear".to_string(),
            intercept,
            coefficients: Array1::from_vec(coefficients),
        })
    }

    /// Parse a JSON model document
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let file: ModelFile =
            serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;

        let mut model = Self::from_parts(file.intercept, file.coefficients)?;
        if let Some(name) = file.name {
            model.name = name;
        }
        Ok(model)
    }

    /// Load a JSON model file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Io(format!("{}: {}", path.display(), e)))?;
        let model = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            model = %model.name,
            "Loaded linear model"
        );
        Ok(model)
    }
}

impl RiskModel for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = ArrayView1::from(features.as_slice());
        if x.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: x.len(),
            });
        }

        let score = self.intercept + self.coefficients.dot(&x);
        if !score.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(score)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn input_dim(&self) -> usize {
        self.coefficients.len()
    }
}
