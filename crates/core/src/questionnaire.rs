//! Question catalog and answer values
//!
//! The catalog order is load-bearing: a free-text answer is always bound to
//! the question under the session cursor.

use serde::{Deserialize, Serialize, Serializer};

/// Expected answer shape for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// Answered with "yes" / "no", recorded as 1 / 0
    YesNo,
    /// Answered with a plain day count
    Days,
}

/// A single questionnaire entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Stable identifier
    pub key: &'static str,
    /// Text shown to the user
    pub prompt: &'static str,
    pub kind: AnswerKind,
}

impl Question {
    const fn yes_no(key: &'static str, prompt: &'static str) -> Self {
        Self {
            key,
            prompt,
            kind: AnswerKind::YesNo,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == AnswerKind::Days
    }
}

/// Key of the one question answered with a number
pub const NUMERIC_QUESTION_KEY: &str = "period_len";

/// The questionnaire, in the order it is asked
pub const QUESTIONS: [Question; 10] = [
    Question::yes_no("irregular_periods", "Do you have irregular periods? (yes/no)"),
    Question::yes_no("weight_gain", "Have you experienced sudden weight gain? (yes/no)"),
    Question::yes_no("acne", "Do you have acne or oily skin? (yes/no)"),
    Question::yes_no(
        "hair_growth",
        "Do you notice excessive hair growth on your body? (yes/no)",
    ),
    Question::yes_no("balding", "Have you experienced hair thinning or balding? (yes/no)"),
    Question::yes_no("fast_food", "Do you consume fast food regularly? (yes/no)"),
    Question::yes_no("skin_darkening", "Have you noticed skin darkening recently? (yes/no)"),
    Question::yes_no("exercise", "Do you exercise frequently? (yes/no)"),
    Question {
        key: NUMERIC_QUESTION_KEY,
        prompt: "How long does your period last? (in days, numeric input)",
        kind: AnswerKind::Days,
    },
    Question::yes_no("mood_swings", "Do you experience mood swings? (yes/no)"),
];

/// Look up a question by key
pub fn question_by_key(key: &str) -> Option<(usize, &'static Question)> {
    QUESTIONS.iter().enumerate().find(|(_, q)| q.key == key)
}

/// A recorded (or missing) answer
///
/// Serializes as `null` when unanswered and as a plain number otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum AnswerValue {
    #[default]
    Unanswered,
    Integer(u32),
}

impl AnswerValue {
    pub fn yes() -> Self {
        AnswerValue::Integer(1)
    }

    pub fn no() -> Self {
        AnswerValue::Integer(0)
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            AnswerValue::Unanswered => None,
            AnswerValue::Integer(n) => Some(*n),
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, AnswerValue::Integer(_))
    }
}

impl From<Option<u32>> for AnswerValue {
    fn from(value: Option<u32>) -> Self {
        value.map_or(AnswerValue::Unanswered, AnswerValue::Integer)
    }
}

impl From<AnswerValue> for Option<u32> {
    fn from(value: AnswerValue) -> Self {
        value.as_integer()
    }
}

/// One answer slot per catalog entry, all present from creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    values: [AnswerValue; QUESTIONS.len()],
}

impl Answers {
    pub fn new() -> Self {
        Self {
            values: [AnswerValue::Unanswered; QUESTIONS.len()],
        }
    }

    /// Answer recorded for the question with this key
    pub fn get(&self, key: &str) -> Option<AnswerValue> {
        question_by_key(key).map(|(index, _)| self.values[index])
    }

    /// Record an answer at a catalog index
    ///
    /// Returns false when the index is outside the catalog.
    pub fn set(&mut self, index: usize, value: AnswerValue) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterate (question, answer) pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static Question, AnswerValue)> + '_ {
        QUESTIONS.iter().zip(self.values.iter().copied())
    }

    /// All recorded integer values, in catalog order
    pub fn recorded(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().filter_map(AnswerValue::as_integer)
    }

    pub fn answered_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_answered()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(AnswerValue::is_answered)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Answers {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(q, v)| (q.key, v)))
    }
}
