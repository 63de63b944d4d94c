//! Conversational screening agent
//!
//! Features:
//! - Keyword intent interpretation scoped by conversation stage
//! - Explicit per-session state with enforced invariants
//! - Exhaustive (stage, intent) transition table
//! - Risk scoring into LOW / MODERATE / HIGH tiers
//!
//! The controller never fails: every utterance maps to some reply, with
//! unusable input degrading to a corrective re-prompt.

pub mod agent;
pub mod intent;
pub mod scoring;
pub mod session;
pub mod stage;

pub use agent::{ScreeningAgent, TurnReply};
pub use intent::{Intent, IntentInterpreter};
pub use scoring::{score, RiskAssessment, RiskTier};
pub use session::SessionState;
pub use stage::{transition, ConversationStage, TurnAction};
