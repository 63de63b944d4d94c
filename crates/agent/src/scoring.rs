//! Risk scoring
//!
//! Sums every recorded answer. Yes/no answers contribute 0 or 1 and the
//! period length contributes its raw day count.

use ovacare_config::PromptTemplates;
use ovacare_core::Answers;
use serde::{Deserialize, Serialize};

/// Coarse risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    /// Total of 0 or 1
    Low,
    /// Total of 2 or 3
    Moderate,
    /// Total of 4 or more
    High,
}

impl RiskTier {
    pub fn from_total(total: u64) -> Self {
        match total {
            0..=1 => RiskTier::Low,
            2..=3 => RiskTier::Moderate,
            _ => RiskTier::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Moderate => "MODERATE",
            RiskTier::High => "HIGH",
        }
    }

    /// Advisory text for this tier
    pub fn message<'a>(&self, prompts: &'a PromptTemplates) -> &'a str {
        match self {
            RiskTier::Low => &prompts.low_risk,
            RiskTier::Moderate => &prompts.moderate_risk,
            RiskTier::High => &prompts.high_risk,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scorer verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    /// Sum of all recorded answers
    pub total: u64,
    pub message: String,
}

/// Score a set of answers; unanswered slots contribute nothing
pub fn score(answers: &Answers, prompts: &PromptTemplates) -> RiskAssessment {
    let total = answers
        .recorded()
        .fold(0u64, |acc, value| acc.saturating_add(u64::from(value)));
    let tier = RiskTier::from_total(total);

    RiskAssessment {
        tier,
        total,
        message: tier.message(prompts).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovacare_core::{AnswerValue, QUESTIONS};

    fn answers_with(values: &[u32]) -> Answers {
        let mut answers = Answers::new();
        for (index, value) in values.iter().enumerate() {
            answers.set(index, AnswerValue::Integer(*value));
        }
        answers
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_total(0), RiskTier::Low);
        assert_eq!(RiskTier::from_total(1), RiskTier::Low);
        assert_eq!(RiskTier::from_total(2), RiskTier::Moderate);
        assert_eq!(RiskTier::from_total(3), RiskTier::Moderate);
        assert_eq!(RiskTier::from_total(4), RiskTier::High);
        assert_eq!(RiskTier::from_total(5), RiskTier::High);
        assert_eq!(RiskTier::from_total(u64::MAX), RiskTier::High);
    }

    #[test]
    fn test_tier_is_monotonic() {
        let tiers: Vec<_> = (0..10).map(RiskTier::from_total).collect();
        assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_score_sums_raw_day_count() {
        let prompts = PromptTemplates::default();
        let mut values = vec![0; QUESTIONS.len()];
        values[8] = 3;
        let assessment = score(&answers_with(&values), &prompts);

        assert_eq!(assessment.total, 3);
        assert_eq!(assessment.tier, RiskTier::Moderate);
        assert_eq!(assessment.message, prompts.moderate_risk);
    }

    #[test]
    fn test_score_is_deterministic() {
        let prompts = PromptTemplates::default();
        let answers = answers_with(&[1, 1, 0, 1, 0, 1, 1, 0, 5, 1]);
        let first = score(&answers, &prompts);
        let second = score(&answers, &prompts);

        assert_eq!(first, second);
        assert_eq!(first.total, 11);
        assert_eq!(first.tier, RiskTier::High);
    }

    #[test]
    fn test_all_no_with_short_period_is_low() {
        let prompts = PromptTemplates::default();
        let mut values = vec![0; QUESTIONS.len()];
        values[8] = 1;
        let assessment = score(&answers_with(&values), &prompts);
        assert_eq!(assessment.tier, RiskTier::Low);
        assert!(assessment.message.contains("LOW"));
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&RiskTier::Moderate).unwrap();
        assert_eq!(json, "\"MODERATE\"");
    }
}
