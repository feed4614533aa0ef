//! User profile model
//!
//! Body metrics that drive the daily recommendation. Any field may be unset.

use serde::{Deserialize, Serialize};

use super::RawInput;
use crate::nutrition::parse_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "female" => Gender::Female,
            _ => Gender::Male,
        }
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Unknown levels fall back to sedentary
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "lightly_active" => ActivityLevel::LightlyActive,
            "moderately_active" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extra_active" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Sedentary,
        }
    }

    /// TDEE multiplier for this level
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Profile field addressable by a form edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Age,
    Height,
    Weight,
    Gender,
    ActivityLevel,
}

impl ProfileField {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "age" => Some(ProfileField::Age),
            "height" => Some(ProfileField::Height),
            "weight" => Some(ProfileField::Weight),
            "gender" => Some(ProfileField::Gender),
            "activity_level" | "activitylevel" => Some(ProfileField::ActivityLevel),
            _ => None,
        }
    }
}

/// User body metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: Option<f64>,    // years
    pub height: Option<f64>, // cm
    pub weight: Option<f64>, // kg
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

impl UserProfile {
    /// Age, height and weight are all set
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.height.is_some() && self.weight.is_some()
    }

    /// Apply one raw form edit.
    ///
    /// Numeric fields become unset when the input is missing, unparsable or
    /// not positive.
    pub fn set_field(&mut self, field: ProfileField, raw: &RawInput) {
        let positive = || parse_amount(raw).filter(|v| *v > 0.0);
        match field {
            ProfileField::Age => self.age = positive(),
            ProfileField::Height => self.height = positive(),
            ProfileField::Weight => self.weight = positive(),
            ProfileField::Gender => self.gender = Gender::from_str(&raw.as_text()),
            ProfileField::ActivityLevel => {
                self.activity_level = ActivityLevel::from_str(&raw.as_text())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_factors() {
        assert_eq!(ActivityLevel::Sedentary.factor(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.factor(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.factor(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.factor(), 1.725);
        assert_eq!(ActivityLevel::ExtraActive.factor(), 1.9);
    }

    #[test]
    fn test_unknown_activity_defaults_to_sedentary() {
        assert_eq!(ActivityLevel::from_str("couch_potato"), ActivityLevel::Sedentary);
        assert_eq!(ActivityLevel::from_str("VERY_ACTIVE"), ActivityLevel::VeryActive);
    }

    #[test]
    fn test_set_field_parses_and_rejects_non_positive() {
        let mut profile = UserProfile::default();
        profile.set_field(ProfileField::Age, &RawInput::from("25"));
        profile.set_field(ProfileField::Height, &RawInput::Number(175.0));
        profile.set_field(ProfileField::Weight, &RawInput::Number(0.0));
        assert_eq!(profile.age, Some(25.0));
        assert_eq!(profile.height, Some(175.0));
        assert_eq!(profile.weight, None);
        assert!(!profile.is_complete());

        profile.set_field(ProfileField::Weight, &RawInput::from("70"));
        assert!(profile.is_complete());

        profile.set_field(ProfileField::Age, &RawInput::from("twenty"));
        assert_eq!(profile.age, None);
    }

    #[test]
    fn test_set_enum_fields() {
        let mut profile = UserProfile::default();
        profile.set_field(ProfileField::Gender, &RawInput::from("female"));
        profile.set_field(ProfileField::ActivityLevel, &RawInput::from("extra_active"));
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.activity_level, ActivityLevel::ExtraActive);
    }
}
