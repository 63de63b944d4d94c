//! Core types for the OvaCare screening assistant
//!
//! This crate provides foundational types used across all other crates:
//! - The fixed question catalog and answer values
//! - Conversation transcript turns
//! - Form input types and the feature-vector encoding
//! - The `RiskModel` trait for pluggable prediction backends
//! - Error types

pub mod conversation;
pub mod error;
pub mod form;
pub mod questionnaire;
pub mod traits;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use form::{BloodGroup, FeatureVector, FormAnswers, Prediction, FEATURE_COUNT, FEATURE_NAMES};
pub use questionnaire::{
    question_by_key, AnswerKind, AnswerValue, Answers, Question, NUMERIC_QUESTION_KEY, QUESTIONS,
};
pub use traits::{ModelError, RiskModel};
