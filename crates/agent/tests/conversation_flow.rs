//! End-to-end questionnaire dialogues
//!
//! These tests drive the controller the way a host does: one utterance at a
//! time against a single session state.

use ovacare_agent::{ConversationStage, RiskTier, ScreeningAgent, SessionState, TurnReply};
use ovacare_config::PromptTemplates;
use ovacare_core::{AnswerValue, TurnRole, QUESTIONS};

fn run(agent: &ScreeningAgent, state: &mut SessionState, inputs: &[&str]) -> Vec<TurnReply> {
    inputs.iter().map(|raw| agent.handle(state, raw)).collect()
}

/// Greeting, start, eight "no", a 3-day period and a final "no" sums to 3
#[test]
fn test_reference_dialogue_is_moderate() {
    let agent = ScreeningAgent::default();
    let mut state = SessionState::new();

    let replies = run(
        &agent,
        &mut state,
        &["hello", "start", "no", "no", "no", "no", "no", "no", "no", "no", "3", "no"],
    );

    let prompts = PromptTemplates::default();
    assert_eq!(replies[0].messages, vec![prompts.start_prompt.clone()]);

    let completions: Vec<_> = replies.iter().filter(|r| r.is_completion()).collect();
    assert_eq!(completions.len(), 1);

    let last = replies.last().unwrap();
    let assessment = last.assessment.as_ref().unwrap();
    assert_eq!(assessment.total, 3);
    assert_eq!(assessment.tier, RiskTier::Moderate);
    assert_eq!(last.messages, vec![prompts.moderate_risk.clone()]);
    assert_eq!(state.stage(), ConversationStage::Completed);
    assert_eq!(state.answers().get("period_len"), Some(AnswerValue::Integer(3)));
}

/// Every question is asked exactly once, in catalog order
#[test]
fn test_questions_asked_in_order() {
    let agent = ScreeningAgent::default();
    let mut state = SessionState::new();

    let mut inputs = vec!["start"];
    inputs.extend(std::iter::repeat("no").take(8));
    inputs.push("1");
    inputs.push("no");
    run(&agent, &mut state, &inputs);

    let asked: Vec<_> = state
        .transcript()
        .iter()
        .filter(|t| t.role == TurnRole::Assistant)
        .filter(|t| QUESTIONS.iter().any(|q| q.prompt == t.content))
        .map(|t| t.content.clone())
        .collect();
    let expected: Vec<_> = QUESTIONS.iter().map(|q| q.prompt.to_string()).collect();
    assert_eq!(asked, expected);

    assert_eq!(
        state.answers().iter().last().map(|(_, v)| v),
        Some(AnswerValue::Integer(0))
    );
    let final_reply = agent.handle(&mut state, "ok");
    assert_eq!(final_reply.stage, ConversationStage::Completed);
}

/// Malformed numeric input keeps re-emitting the same corrective message
#[test]
fn test_numeric_retry_loop() {
    let agent = ScreeningAgent::default();
    let mut state = SessionState::new();
    run(&agent, &mut state, &["start", "no", "no", "no", "no", "no", "no", "no", "no"]);
    assert_eq!(state.cursor(), 8);

    let retries = run(&agent, &mut state, &["five days", "yes", "5.5", "", "0", "31"]);
    for reply in &retries {
        assert_eq!(reply.messages, vec!["Please respond with 'yes' or 'no'.".to_string()]);
        assert_eq!(reply.cursor, 8);
    }

    let accepted = agent.handle(&mut state, "5");
    assert_eq!(accepted.cursor, 9);
}

/// Everything before "start" leaves the session untouched apart from the transcript
#[test]
fn test_input_before_start() {
    let agent = ScreeningAgent::default();
    let mut state = SessionState::new();

    for raw in ["yes", "no", "7", "hey there", ""] {
        let reply = agent.handle(&mut state, raw);
        assert_eq!(reply.stage, ConversationStage::NotStarted);
        assert_eq!(reply.cursor, 0);
    }
    assert_eq!(state.answers().answered_count(), 0);
    assert_eq!(state.transcript().len(), 10);
}

/// After completion, "no" closes idempotently and "yes" restarts
#[test]
fn test_completed_then_restart() {
    let agent = ScreeningAgent::default();
    let mut state = SessionState::new();
    run(
        &agent,
        &mut state,
        &["start", "yes", "yes", "yes", "yes", "yes", "no", "no", "no", "6", "no"],
    );
    assert!(state.is_completed());

    let closing = PromptTemplates::default().closing;
    for _ in 0..3 {
        let reply = agent.handle(&mut state, "no thanks");
        assert_eq!(reply.messages, vec![closing.clone()]);
        assert_eq!(reply.stage, ConversationStage::Completed);
    }

    let reply = agent.handle(&mut state, "yes");
    assert_eq!(reply.messages, vec![QUESTIONS[0].prompt.to_string()]);
    assert_eq!(state.stage(), ConversationStage::Asking);
    assert_eq!(state.cursor(), 0);
    assert!(state.answers().iter().all(|(_, v)| !v.is_answered()));

    // The restarted run scores independently of the first one
    let replies = run(
        &agent,
        &mut state,
        &["no", "no", "no", "no", "no", "no", "no", "no", "1", "no"],
    );
    let assessment = replies.last().unwrap().assessment.as_ref().unwrap();
    assert_eq!(assessment.tier, RiskTier::Low);
}
