//! Controller stages and the transition table

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

/// Where a session is in the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// Waiting for "start"
    #[default]
    NotStarted,
    /// Walking through the catalog
    Asking,
    /// All questions answered, verdict given
    Completed,
}

impl ConversationStage {
    /// Derive the stage from the session flags
    pub fn from_flags(started: bool, completed: bool) -> Self {
        match (started, completed) {
            (_, true) => ConversationStage::Completed,
            (true, false) => ConversationStage::Asking,
            (false, false) => ConversationStage::NotStarted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStage::NotStarted => "not_started",
            ConversationStage::Asking => "asking",
            ConversationStage::Completed => "completed",
        }
    }

    /// Get stage display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConversationStage::NotStarted => "Not Started",
            ConversationStage::Asking => "Asking",
            ConversationStage::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What the controller does for a (stage, intent) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Ask the user to type "start"
    PromptStart,
    /// Acknowledge and ask question 0
    Begin,
    /// Friendly redirect, then repeat the current question
    Redirect,
    /// Record a yes/no answer (1 / 0)
    RecordFlag(bool),
    /// Record a day count, subject to the configured range
    RecordDays(u32),
    /// Corrective re-prompt; nothing advances
    Reprompt,
    /// Wipe the session and ask question 0
    Restart,
    /// Closing message; state stays completed
    Close,
}

/// Exhaustive transition table
pub fn transition(stage: ConversationStage, intent: Intent) -> TurnAction {
    use ConversationStage::*;

    match (stage, intent) {
        (NotStarted, Intent::StartCommand) => TurnAction::Begin,
        (
            NotStarted,
            Intent::Greeting
            | Intent::RestartConfirm
            | Intent::RestartDecline
            | Intent::YesAnswer
            | Intent::NoAnswer
            | Intent::NumericAnswer(_)
            | Intent::Invalid,
        ) => TurnAction::PromptStart,

        (Asking, Intent::Greeting) => TurnAction::Redirect,
        (Asking, Intent::YesAnswer) => TurnAction::RecordFlag(true),
        (Asking, Intent::NoAnswer) => TurnAction::RecordFlag(false),
        (Asking, Intent::NumericAnswer(days)) => TurnAction::RecordDays(days),
        (
            Asking,
            Intent::StartCommand | Intent::RestartConfirm | Intent::RestartDecline | Intent::Invalid,
        ) => TurnAction::Reprompt,

        (Completed, Intent::RestartConfirm) => TurnAction::Restart,
        (
            Completed,
            Intent::StartCommand
            | Intent::Greeting
            | Intent::RestartDecline
            | Intent::YesAnswer
            | Intent::NoAnswer
            | Intent::NumericAnswer(_)
            | Intent::Invalid,
        ) => TurnAction::Close,
    }
}
