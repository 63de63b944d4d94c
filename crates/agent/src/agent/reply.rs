//! Turn result

use serde::Serialize;

use crate::intent::Intent;
use crate::scoring::RiskAssessment;
use crate::stage::ConversationStage;

/// Outcome of a single `handle` call
#[derive(Debug, Clone, Serialize)]
pub struct TurnReply {
    /// Assistant messages emitted this turn, in order
    pub messages: Vec<String>,
    /// How the utterance was interpreted
    pub intent: Intent,
    /// Stage after the turn
    pub stage: ConversationStage,
    /// Cursor after the turn
    pub cursor: usize,
    /// Present only on the turn that completed the questionnaire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
}

impl TurnReply {
    pub fn is_completion(&self) -> bool {
        self.assessment.is_some()
    }

    /// Messages joined for single-bubble front ends
    pub fn text(&self) -> String {
        self.messages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_serialization_omits_missing_assessment() {
        let reply = TurnReply {
            messages: vec!["Please respond with 'yes' or 'no'.".to_string()],
            intent: Intent::Invalid,
            stage: ConversationStage::Asking,
            cursor: 3,
            assessment: None,
        };

        let json = serde_json::to_value(&reply).unwrap();
        assert!(json.get("assessment").is_none());
        assert_eq!(json["stage"], "asking");
        assert_eq!(json["intent"]["kind"], "invalid");
        assert!(!reply.is_completion());
        assert_eq!(reply.text(), "Please respond with 'yes' or 'no'.");
    }
}
