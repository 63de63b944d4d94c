//! Message templates
//!
//! Every assistant utterance that is not a catalog question comes from here,
//! so wording can be changed per deployment without touching the controller.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Assistant messages, keyed by situation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplates {
    /// Shown until the user types "start"
    #[serde(default = "default_start_prompt")]
    pub start_prompt: String,

    /// Acknowledgment emitted right before the first question
    #[serde(default = "default_start_ack")]
    pub start_ack: String,

    /// Emitted when the user greets mid-questionnaire
    #[serde(default = "default_greeting_redirect")]
    pub greeting_redirect: String,

    /// Corrective re-prompt for anything unusable as an answer
    #[serde(default = "default_invalid_answer")]
    pub invalid_answer: String,

    /// Emitted for any input after completion other than a restart
    #[serde(default = "default_closing")]
    pub closing: String,

    #[serde(default = "default_low_risk")]
    pub low_risk: String,

    #[serde(default = "default_moderate_risk")]
    pub moderate_risk: String,

    #[serde(default = "default_high_risk")]
    pub high_risk: String,
}

fn default_start_prompt() -> String {
    "Hello! Type 'start' to begin the test and answer 'yes' or 'no' to the questions.".to_string()
}
fn default_start_ack() -> String {
    "Great! Let's start the PCOS test. Please answer 'yes' or 'no' to the following questions."
        .to_string()
}
fn default_greeting_redirect() -> String {
    "Hi! I’m OvaCare 🤖, your PCOS assistant. Let's continue with the test.".to_string()
}
fn default_invalid_answer() -> String {
    "Please respond with 'yes' or 'no'.".to_string()
}
fn default_closing() -> String {
    "Thank you for using OvaCare! Stay healthy ❤️".to_string()
}
fn default_low_risk() -> String {
    "You have a LOW risk of PCOS. Keep monitoring your health and consult a doctor if needed."
        .to_string()
}
fn default_moderate_risk() -> String {
    "You have a MODERATE risk of PCOS. It is advisable to consult a doctor for further evaluation."
        .to_string()
}
fn default_high_risk() -> String {
    "You have a HIGH risk of PCOS. Please consult a doctor for a detailed diagnosis.".to_string()
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            start_prompt: default_start_prompt(),
            start_ack: default_start_ack(),
            greeting_redirect: default_greeting_redirect(),
            invalid_answer: default_invalid_answer(),
            closing: default_closing(),
            low_risk: default_low_risk(),
            moderate_risk: default_moderate_risk(),
            high_risk: default_high_risk(),
        }
    }
}

impl PromptTemplates {
    fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("prompts.start_prompt", self.start_prompt.as_str()),
            ("prompts.start_ack", self.start_ack.as_str()),
            ("prompts.greeting_redirect", self.greeting_redirect.as_str()),
            ("prompts.invalid_answer", self.invalid_answer.as_str()),
            ("prompts.closing", self.closing.as_str()),
            ("prompts.low_risk", self.low_risk.as_str()),
            ("prompts.moderate_risk", self.moderate_risk.as_str()),
            ("prompts.high_risk", self.high_risk.as_str()),
        ]
    }

    /// Reject blank templates
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, text) in self.entries() {
            if text.trim().is_empty() {
                return Err(ConfigError::invalid(field, "Template cannot be empty"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let prompts = PromptTemplates::default();
        assert!(prompts.validate().is_ok());
        assert_eq!(prompts.invalid_answer, "Please respond with 'yes' or 'no'.");
        assert!(prompts.low_risk.contains("LOW"));
        assert!(prompts.moderate_risk.contains("MODERATE"));
        assert!(prompts.high_risk.contains("HIGH"));
    }

    #[test]
    fn test_blank_template_rejected() {
        let prompts = PromptTemplates {
            closing: "   ".to_string(),
            ..Default::default()
        };
        match prompts.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "prompts.closing"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }
}
