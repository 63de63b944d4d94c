//! Screening agent
//!
//! The conversation controller. It is stateless itself: every call operates
//! on an explicit [`SessionState`] owned by the caller, so one agent serves
//! any number of sessions.
//!
//! A turn runs in three steps:
//! - interpret the utterance against the session's stage and cursor
//! - look up the action in the transition table
//! - apply it, appending the user turn and then every assistant message to
//!   the transcript

mod reply;

pub use reply::TurnReply;

use ovacare_config::{AgentConfig, PromptTemplates};
use ovacare_core::{AnswerValue, Turn, QUESTIONS};

use crate::intent::IntentInterpreter;
use crate::scoring::{self, RiskAssessment};
use crate::session::SessionState;
use crate::stage::{self, TurnAction};

/// Questionnaire controller
#[derive(Debug, Clone)]
pub struct ScreeningAgent {
    config: AgentConfig,
    prompts: PromptTemplates,
    interpreter: IntentInterpreter,
}

impl Default for ScreeningAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default(), PromptTemplates::default())
    }
}

impl ScreeningAgent {
    pub fn new(config: AgentConfig, prompts: PromptTemplates) -> Self {
        Self {
            config,
            prompts,
            interpreter: IntentInterpreter::new(),
        }
    }

    pub fn prompts(&self) -> &PromptTemplates {
        &self.prompts
    }

    /// Process one user utterance
    pub fn handle(&self, state: &mut SessionState, raw: &str) -> TurnReply {
        let intent = self.interpreter.interpret(raw, state);
        let action = stage::transition(state.stage(), intent);

        if action == TurnAction::Restart {
            state.reset();
        }
        state.push_turn(Turn::user(raw));

        let mut messages = Vec::new();
        let mut assessment = None;

        match action {
            TurnAction::PromptStart => messages.push(self.prompts.start_prompt.clone()),
            TurnAction::Begin | TurnAction::Restart => {
                state.begin();
                if action == TurnAction::Begin {
                    messages.push(self.prompts.start_ack.clone());
                }
                messages.push(QUESTIONS[0].prompt.to_string());
            }
            TurnAction::Redirect => {
                messages.push(self.prompts.greeting_redirect.clone());
                if let Some(question) = state.current_question() {
                    messages.push(question.prompt.to_string());
                }
            }
            TurnAction::RecordFlag(yes) => {
                let value = if yes { AnswerValue::yes() } else { AnswerValue::no() };
                assessment = self.record(state, value, &mut messages);
            }
            TurnAction::RecordDays(days) => {
                if self.accepts_days(state, days) {
                    assessment = self.record(state, AnswerValue::Integer(days), &mut messages);
                } else {
                    tracing::debug!(
                        days,
                        min = self.config.period_days.min,
                        max = self.config.period_days.max,
                        "Day count out of range"
                    );
                    messages.push(self.prompts.invalid_answer.clone());
                }
            }
            TurnAction::Reprompt => messages.push(self.prompts.invalid_answer.clone()),
            TurnAction::Close => messages.push(self.prompts.closing.clone()),
        }

        for message in &messages {
            state.push_turn(Turn::assistant(message.as_str()));
        }

        tracing::debug!(
            intent = intent.kind(),
            action = ?action,
            stage = state.stage().as_str(),
            cursor = state.cursor(),
            "Turn handled"
        );

        TurnReply {
            messages,
            intent,
            stage: state.stage(),
            cursor: state.cursor(),
            assessment,
        }
    }

    /// Day counts are only valid on the numeric question and within range
    fn accepts_days(&self, state: &SessionState, days: u32) -> bool {
        state.current_question().is_some_and(|q| q.is_numeric())
            && self.config.period_days.contains(days)
    }

    fn record(
        &self,
        state: &mut SessionState,
        value: AnswerValue,
        messages: &mut Vec<String>,
    ) -> Option<RiskAssessment> {
        if !state.record(value) {
            if let Some(next) = state.current_question() {
                messages.push(next.prompt.to_string());
            }
            return None;
        }

        let assessment = scoring::score(state.answers(), &self.prompts);
        tracing::info!(
            tier = assessment.tier.as_str(),
            total = assessment.total,
            "Questionnaire completed"
        );
        messages.push(assessment.message.clone());
        Some(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use crate::stage::ConversationStage;
    use ovacare_core::TurnRole;

    fn started(agent: &ScreeningAgent) -> SessionState {
        let mut state = SessionState::new();
        agent.handle(&mut state, "start");
        state
    }

    #[test]
    fn test_not_started_prompts_for_start() {
        let agent = ScreeningAgent::default();
        let mut state = SessionState::new();

        let reply = agent.handle(&mut state, "what is this?");
        assert_eq!(reply.messages, vec![agent.prompts().start_prompt.clone()]);
        assert_eq!(reply.stage, ConversationStage::NotStarted);
        assert_eq!(state.cursor(), 0);
        assert!(!state.is_started());
    }

    #[test]
    fn test_start_emits_ack_then_first_question() {
        let agent = ScreeningAgent::default();
        let mut state = SessionState::new();

        let reply = agent.handle(&mut state, "Start");
        assert_eq!(
            reply.messages,
            vec![
                agent.prompts().start_ack.clone(),
                QUESTIONS[0].prompt.to_string()
            ]
        );
        assert_eq!(reply.stage, ConversationStage::Asking);
        assert_eq!(reply.intent, Intent::StartCommand);
    }

    #[test]
    fn test_transcript_order() {
        let agent = ScreeningAgent::default();
        let state = started(&agent);

        let roles: Vec<_> = state.transcript().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::User, TurnRole::Assistant, TurnRole::Assistant]
        );
        assert_eq!(state.transcript()[0].content, "start");
    }

    #[test]
    fn test_answer_advances_to_next_question() {
        let agent = ScreeningAgent::default();
        let mut state = started(&agent);

        let reply = agent.handle(&mut state, "yes");
        assert_eq!(reply.messages, vec![QUESTIONS[1].prompt.to_string()]);
        assert_eq!(reply.cursor, 1);
        assert_eq!(
            state.answers().get("irregular_periods"),
            Some(AnswerValue::Integer(1))
        );
    }

    #[test]
    fn test_invalid_answer_does_not_advance() {
        let agent = ScreeningAgent::default();
        let mut state = started(&agent);

        let reply = agent.handle(&mut state, "perhaps");
        assert_eq!(reply.messages, vec![agent.prompts().invalid_answer.clone()]);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_out_of_range_days_reprompts() {
        let agent = ScreeningAgent::default();
        let mut state = started(&agent);
        for _ in 0..8 {
            agent.handle(&mut state, "no");
        }
        assert_eq!(state.cursor(), 8);

        for raw in ["0", "31"] {
            let reply = agent.handle(&mut state, raw);
            assert_eq!(reply.messages, vec![agent.prompts().invalid_answer.clone()]);
            assert_eq!(state.cursor(), 8);
        }

        let reply = agent.handle(&mut state, "30");
        assert_eq!(reply.cursor, 9);
        assert_eq!(reply.messages, vec![QUESTIONS[9].prompt.to_string()]);
    }

    #[test]
    fn test_custom_day_range() {
        let config = AgentConfig {
            period_days: ovacare_config::DayRange { min: 2, max: 7 },
        };
        let agent = ScreeningAgent::new(config, PromptTemplates::default());
        let mut state = started(&agent);
        for _ in 0..8 {
            agent.handle(&mut state, "no");
        }

        agent.handle(&mut state, "8");
        assert_eq!(state.cursor(), 8);
        agent.handle(&mut state, "7");
        assert_eq!(state.cursor(), 9);
    }

    #[test]
    fn test_completion_emits_single_assessment() {
        let agent = ScreeningAgent::default();
        let mut state = started(&agent);
        for _ in 0..8 {
            assert!(agent.handle(&mut state, "yes").assessment.is_none());
        }
        assert!(agent.handle(&mut state, "5").assessment.is_none());

        let reply = agent.handle(&mut state, "yes");
        let assessment = reply.assessment.expect("completion yields an assessment");
        assert_eq!(assessment.total, 14);
        assert_eq!(reply.messages, vec![assessment.message.clone()]);
        assert_eq!(reply.stage, ConversationStage::Completed);

        let after = agent.handle(&mut state, "thanks");
        assert!(after.assessment.is_none());
        assert_eq!(after.messages, vec![agent.prompts().closing.clone()]);
    }

    #[test]
    fn test_restart_replaces_session() {
        let agent = ScreeningAgent::default();
        let mut state = started(&agent);
        for raw in ["yes", "no", "yes", "no", "yes", "no", "yes", "no", "4", "yes"] {
            agent.handle(&mut state, raw);
        }
        assert!(state.is_completed());

        let reply = agent.handle(&mut state, "yes");
        assert_eq!(reply.messages, vec![QUESTIONS[0].prompt.to_string()]);
        assert_eq!(reply.stage, ConversationStage::Asking);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.answers().answered_count(), 0);
        assert_eq!(state.transcript().len(), 2);
        assert!(state.transcript()[0].is_user());
    }
}
