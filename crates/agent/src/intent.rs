//! Input interpretation
//!
//! Classifies a raw utterance into an [`Intent`] given where the session is.
//! Matching is case-insensitive substring matching on a small keyword set,
//! so "yesterday" counts as a yes. Which intents can be produced depends on
//! the stage; the controller's transition table handles every combination.

use ovacare_core::AnswerKind;
use serde::Serialize;

use crate::session::SessionState;
use crate::stage::ConversationStage;

/// Interpreted user utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// "start" before the questionnaire began
    StartCommand,
    /// "hi" / "hello" / "hey" outside of question answering
    Greeting,
    /// "yes" after completion
    RestartConfirm,
    /// Anything else after completion
    RestartDecline,
    YesAnswer,
    NoAnswer,
    /// Plain digit string on the numeric question
    NumericAnswer(u32),
    /// Unusable in the current context
    Invalid,
}

impl Intent {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::StartCommand => "start",
            Intent::Greeting => "greeting",
            Intent::RestartConfirm => "restart_confirm",
            Intent::RestartDecline => "restart_decline",
            Intent::YesAnswer => "yes",
            Intent::NoAnswer => "no",
            Intent::NumericAnswer(_) => "numeric",
            Intent::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::NumericAnswer(n) => write!(f, "numeric({})", n),
            other => f.write_str(other.kind()),
        }
    }
}

/// Keyword-based intent interpreter
#[derive(Debug, Clone)]
pub struct IntentInterpreter {
    start_keyword: &'static str,
    greetings: &'static [&'static str],
    yes_keyword: &'static str,
    no_keyword: &'static str,
}

impl Default for IntentInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentInterpreter {
    pub fn new() -> Self {
        Self {
            start_keyword: "start",
            greetings: &["hi", "hello", "hey"],
            yes_keyword: "yes",
            no_keyword: "no",
        }
    }

    /// Classify an utterance; pure, never fails
    pub fn interpret(&self, raw: &str, state: &SessionState) -> Intent {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Intent::Invalid;
        }
        let text = trimmed.to_lowercase();

        let intent = match state.stage() {
            ConversationStage::NotStarted => {
                if text.contains(self.start_keyword) {
                    Intent::StartCommand
                } else if self.is_greeting(&text) {
                    Intent::Greeting
                } else {
                    Intent::Invalid
                }
            }
            ConversationStage::Completed => {
                if self.is_greeting(&text) {
                    Intent::Greeting
                } else if text.contains(self.yes_keyword) {
                    Intent::RestartConfirm
                } else {
                    Intent::RestartDecline
                }
            }
            ConversationStage::Asking => match state.current_question().map(|q| q.kind) {
                Some(AnswerKind::YesNo) => self.yes_no(&text),
                Some(AnswerKind::Days) => parse_days(trimmed),
                None => Intent::Invalid,
            },
        };

        tracing::debug!(
            stage = state.stage().as_str(),
            cursor = state.cursor(),
            intent = intent.kind(),
            "Interpreted utterance"
        );

        intent
    }

    fn is_greeting(&self, text: &str) -> bool {
        self.greetings.iter().any(|g| text.contains(g))
    }

    fn yes_no(&self, text: &str) -> Intent {
        if text.contains(self.yes_keyword) {
            Intent::YesAnswer
        } else if text.contains(self.no_keyword) {
            Intent::NoAnswer
        } else {
            Intent::Invalid
        }
    }
}

/// Digits only; overflow is invalid
fn parse_days(text: &str) -> Intent {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Intent::Invalid;
    }
    text.parse::<u32>()
        .map(Intent::NumericAnswer)
        .unwrap_or(Intent::Invalid)
}
