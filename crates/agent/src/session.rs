//! Per-session conversation state
//!
//! Mutated only by the controller in this crate; everything outside sees
//! read-only accessors.

use ovacare_core::{AnswerValue, Answers, Question, Turn, QUESTIONS};
use serde::Serialize;

use crate::stage::ConversationStage;

/// State of one user's questionnaire run
///
/// Invariants upheld by the mutators below:
/// - `cursor` only moves forward between a start and a reset
/// - `completed` iff `cursor == QUESTIONS.len()`, and then every answer is recorded
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    answers: Answers,
    cursor: usize,
    started: bool,
    completed: bool,
    transcript: Vec<Turn>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Index of the next unanswered question
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn stage(&self) -> ConversationStage {
        ConversationStage::from_flags(self.started, self.completed)
    }

    /// Question under the cursor, if the questionnaire is running
    pub fn current_question(&self) -> Option<&'static Question> {
        if self.stage() == ConversationStage::Asking {
            QUESTIONS.get(self.cursor)
        } else {
            None
        }
    }

    /// Number of questions still to be answered
    pub fn remaining(&self) -> usize {
        QUESTIONS.len() - self.cursor
    }

    pub(crate) fn begin(&mut self) {
        self.started = true;
    }

    /// Record an answer for the current question and advance
    ///
    /// Returns true when this answer completed the questionnaire.
    pub(crate) fn record(&mut self, value: AnswerValue) -> bool {
        if self.stage() != ConversationStage::Asking {
            return false;
        }

        self.answers.set(self.cursor, value);
        self.cursor += 1;
        if self.cursor == QUESTIONS.len() {
            self.completed = true;
        }
        self.completed
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    /// Replace everything, transcript included, with fresh defaults
    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SessionState::new();
        assert_eq!(state.stage(), ConversationStage::NotStarted);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.answers().answered_count(), 0);
        assert!(state.transcript().is_empty());
        assert!(state.current_question().is_none());
    }

    #[test]
    fn test_record_advances_cursor() {
        let mut state = SessionState::new();
        assert!(!state.record(AnswerValue::yes()));
        assert_eq!(state.cursor(), 0);

        state.begin();
        assert_eq!(state.current_question().unwrap().key, "irregular_periods");
        assert!(!state.record(AnswerValue::yes()));
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.current_question().unwrap().key, "weight_gain");
        assert_eq!(state.remaining(), QUESTIONS.len() - 1);
    }

    #[test]
    fn test_completion_invariants() {
        let mut state = SessionState::new();
        state.begin();
        for i in 0..QUESTIONS.len() {
            let done = state.record(AnswerValue::no());
            assert_eq!(done, i == QUESTIONS.len() - 1);
        }

        assert!(state.is_completed());
        assert_eq!(state.cursor(), QUESTIONS.len());
        assert!(state.answers().is_complete());
        assert!(state.current_question().is_none());

        // No further recording once completed
        assert!(!state.record(AnswerValue::yes()));
        assert_eq!(state.cursor(), QUESTIONS.len());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = SessionState::new();
        state.begin();
        state.record(AnswerValue::yes());
        state.push_turn(Turn::user("yes"));

        state.reset();
        assert_eq!(state.stage(), ConversationStage::NotStarted);
        assert_eq!(state.cursor(), 0);
        assert!(state.transcript().is_empty());
        assert_eq!(state.answers().answered_count(), 0);
    }
}
