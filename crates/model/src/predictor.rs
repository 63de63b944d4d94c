//! Form prediction pipeline

use serde::Serialize;
use std::sync::Arc;

use ovacare_core::{FormAnswers, ModelError, Prediction, RiskModel};

/// Label plus the raw score it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormPrediction {
    pub prediction: Prediction,
    pub score: f64,
}

/// Validates a form, encodes it and thresholds the model score
///
/// Model failures are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct FormPredictor {
    model: Arc<dyn RiskModel>,
}

impl FormPredictor {
    pub fn new(model: Arc<dyn RiskModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn predict(&self, form: &FormAnswers) -> Result<FormPrediction, ModelError> {
        let features = form.to_features()?;
        let score = self.model.predict(&features)?;
        let prediction = Prediction::from_score(score);

        tracing::debug!(
            model = self.model.name(),
            score,
            prediction = prediction.as_str(),
            "Form scored"
        );

        Ok(FormPrediction { prediction, score })
    }
}

impl std::fmt::Debug for FormPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormPredictor")
            .field("model", &self.model.name())
            .finish()
    }
}
