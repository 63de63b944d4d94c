//! Single-shot form input and its numeric encoding
//!
//! The prediction model consumes a fixed-order vector of twelve features.
//! The order below must match the order the model was trained on.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of features the prediction model accepts
pub const FEATURE_COUNT: usize = 12;

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "blood_group",
    "weight_gain",
    "body_hair_growth",
    "skin_darkening",
    "hair_loss",
    "acne",
    "fast_food",
    "exercise",
    "mood_swings",
    "periods_regular",
    "period_duration",
];

pub const AGE_RANGE: (u32, u32) = (1, 100);
pub const PERIOD_DURATION_RANGE: (u32, u32) = (1, 10);

/// Score above which a prediction is positive
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Blood group, encoded 0-7 in the order below
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// Display code, e.g. "AB-"
    pub fn code(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// Numeric encoding used in the feature vector
    pub fn encoding(&self) -> u8 {
        match self {
            BloodGroup::APositive => 0,
            BloodGroup::ANegative => 1,
            BloodGroup::BPositive => 2,
            BloodGroup::BNegative => 3,
            BloodGroup::AbPositive => 4,
            BloodGroup::AbNegative => 5,
            BloodGroup::OPositive => 6,
            BloodGroup::ONegative => 7,
        }
    }
}

impl FromStr for BloodGroup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_uppercase();
        BloodGroup::ALL
            .iter()
            .copied()
            .find(|group| group.code() == wanted)
            .ok_or_else(|| Error::UnknownBloodGroup(s.to_string()))
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Answers collected in one batch by the form front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAnswers {
    /// Age in years (1-100)
    pub age: u32,
    pub blood_group: BloodGroup,
    pub weight_gain: bool,
    pub body_hair_growth: bool,
    pub skin_darkening: bool,
    pub hair_loss: bool,
    pub acne: bool,
    pub fast_food: bool,
    pub exercise: bool,
    pub mood_swings: bool,
    pub periods_regular: bool,
    /// Period duration in days (1-10)
    pub period_duration: u32,
}

impl FormAnswers {
    /// Check numeric fields against their allowed ranges
    pub fn validate(&self) -> Result<()> {
        Error::check_range(
            "age",
            i64::from(self.age),
            i64::from(AGE_RANGE.0),
            i64::from(AGE_RANGE.1),
        )?;
        Error::check_range(
            "period_duration",
            i64::from(self.period_duration),
            i64::from(PERIOD_DURATION_RANGE.0),
            i64::from(PERIOD_DURATION_RANGE.1),
        )
    }

    /// Validate and encode into the model's feature order
    pub fn to_features(&self) -> Result<FeatureVector> {
        self.validate()?;

        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        Ok(FeatureVector([
            f64::from(self.age),
            f64::from(self.blood_group.encoding()),
            flag(self.weight_gain),
            flag(self.body_hair_growth),
            flag(self.skin_darkening),
            flag(self.hair_loss),
            flag(self.acne),
            flag(self.fast_food),
            flag(self.exercise),
            flag(self.mood_swings),
            flag(self.periods_regular),
            f64::from(self.period_duration),
        ]))
    }
}

/// Fixed-length numeric input for the prediction model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|index| self.0[index])
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

/// Binary label derived from the model score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Yes,
    No,
}

impl Prediction {
    pub fn from_score(score: f64) -> Self {
        if score > DECISION_THRESHOLD {
            Prediction::Yes
        } else {
            Prediction::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Prediction::Yes => "Yes",
            Prediction::No => "No",
        }
    }
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormAnswers {
        FormAnswers {
            age: 25,
            blood_group: BloodGroup::BNegative,
            weight_gain: true,
            body_hair_growth: false,
            skin_darkening: true,
            hair_loss: false,
            acne: true,
            fast_food: false,
            exercise: false,
            mood_swings: true,
            periods_regular: false,
            period_duration: 5,
        }
    }

    #[test]
    fn test_blood_group_encoding_order() {
        let encodings: Vec<u8> = BloodGroup::ALL.iter().map(|g| g.encoding()).collect();
        assert_eq!(encodings, (0..8).collect::<Vec<u8>>());
    }

    #[test]
    fn test_blood_group_parse() {
        assert_eq!("AB+".parse::<BloodGroup>().unwrap(), BloodGroup::AbPositive);
        assert_eq!(" o- ".parse::<BloodGroup>().unwrap(), BloodGroup::ONegative);
        assert!(matches!(
            "C+".parse::<BloodGroup>(),
            Err(Error::UnknownBloodGroup(_))
        ));
    }

    #[test]
    fn test_blood_group_serde_uses_codes() {
        let json = serde_json::to_string(&BloodGroup::AbNegative).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(parsed, BloodGroup::OPositive);
    }

    #[test]
    fn test_feature_order() {
        let features = sample().to_features().unwrap();
        assert_eq!(
            features.as_slice(),
            &[25.0, 3.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 5.0]
        );
        assert_eq!(features.get("period_duration"), Some(5.0));
        assert_eq!(features.get("missing"), None);
    }

    #[test]
    fn test_age_bounds() {
        let mut form = sample();
        form.age = 0;
        assert!(matches!(
            form.to_features(),
            Err(Error::OutOfRange { field: "age", .. })
        ));
        form.age = 101;
        assert!(form.validate().is_err());
        form.age = 100;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_period_duration_bounds() {
        let mut form = sample();
        form.period_duration = 0;
        assert!(form.validate().is_err());
        form.period_duration = 11;
        assert!(matches!(
            form.validate(),
            Err(Error::OutOfRange {
                field: "period_duration",
                ..
            })
        ));
        form.period_duration = 10;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_prediction_threshold() {
        assert_eq!(Prediction::from_score(0.5), Prediction::No);
        assert_eq!(Prediction::from_score(0.51), Prediction::Yes);
        assert_eq!(Prediction::from_score(-3.0), Prediction::No);
        assert_eq!(Prediction::Yes.to_string(), "Yes");
    }
}
