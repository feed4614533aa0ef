//! Daily recommendation
//!
//! Mifflin-St Jeor BMR, activity-scaled TDEE and a fixed 20/50/30 macro split.
//!
//! BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + offset, where the offset
//! is +5 for men and -161 for women.

use serde::{Deserialize, Serialize};

use crate::models::{Gender, UserProfile};

pub const PROTEIN_ENERGY_SHARE: f64 = 0.20;
pub const CARBS_ENERGY_SHARE: f64 = 0.50;
pub const FAT_ENERGY_SHARE: f64 = 0.30;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Rounded daily targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub calories: i64,
    pub protein: i64, // grams
    pub carbs: i64,   // grams
    pub fat: i64,     // grams
}

/// Unrounded energy figures behind a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyEstimate {
    pub bmr: f64,
    pub tdee: f64,
}

/// Basal metabolic rate in kcal/day
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: f64, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age + offset
}

/// BMR and TDEE, or `None` while age, height or weight is unset
pub fn estimate_energy(profile: &UserProfile) -> Option<EnergyEstimate> {
    let (age, height, weight) = (profile.age?, profile.height?, profile.weight?);
    let bmr = calculate_bmr(weight, height, age, profile.gender);
    Some(EnergyEstimate {
        bmr,
        tdee: bmr * profile.activity_level.factor(),
    })
}

/// Split a TDEE into rounded calorie and macro targets.
///
/// `f64::round` rounds half away from zero, so 2008.5 kcal becomes 2009.
/// A negative TDEE (implausible body metrics) is clamped to zero.
pub fn recommendation_from_tdee(tdee: f64) -> Recommendation {
    let tdee = tdee.max(0.0);
    let grams = |share: f64, kcal_per_gram: f64| (tdee * share / kcal_per_gram).round() as i64;
    Recommendation {
        calories: tdee.round() as i64,
        protein: grams(PROTEIN_ENERGY_SHARE, KCAL_PER_GRAM_PROTEIN),
        carbs: grams(CARBS_ENERGY_SHARE, KCAL_PER_GRAM_CARBS),
        fat: grams(FAT_ENERGY_SHARE, KCAL_PER_GRAM_FAT),
    }
}

pub fn compute_recommendation(profile: &UserProfile) -> Option<Recommendation> {
    estimate_energy(profile).map(|e| recommendation_from_tdee(e.tdee))
}

/// Holds the last computed recommendation.
///
/// An incomplete profile leaves the previous value in place; before the first
/// complete profile the value is all zeros.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    current: Recommendation,
    estimate: Option<EnergyEstimate>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from `profile`. Returns false when the profile was incomplete
    /// and the stale value was kept.
    pub fn refresh(&mut self, profile: &UserProfile) -> bool {
        match estimate_energy(profile) {
            Some(estimate) => {
                self.current = recommendation_from_tdee(estimate.tdee);
                self.estimate = Some(estimate);
                tracing::debug!(
                    bmr = estimate.bmr,
                    tdee = estimate.tdee,
                    calories = self.current.calories,
                    "Recommendation recomputed"
                );
                true
            }
            None => {
                tracing::debug!("Profile incomplete, keeping previous recommendation");
                false
            }
        }
    }

    pub fn current(&self) -> Recommendation {
        self.current
    }

    /// Energy figures from the last successful refresh
    pub fn estimate(&self) -> Option<EnergyEstimate> {
        self.estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityLevel;

    fn profile(age: f64, height: f64, weight: f64, gender: Gender, level: ActivityLevel) -> UserProfile {
        UserProfile {
            age: Some(age),
            height: Some(height),
            weight: Some(weight),
            gender,
            activity_level: level,
        }
    }

    #[test]
    fn test_reference_male_sedentary() {
        let p = profile(25.0, 175.0, 70.0, Gender::Male, ActivityLevel::Sedentary);
        let estimate = estimate_energy(&p).unwrap();
        assert!((estimate.bmr - 1673.75).abs() < 1e-9);
        assert!((estimate.tdee - 2008.5).abs() < 1e-9);

        let rec = compute_recommendation(&p).unwrap();
        assert_eq!(rec, Recommendation { calories: 2009, protein: 100, carbs: 251, fat: 67 });
    }

    #[test]
    fn test_female_moderately_active() {
        let p = profile(30.0, 165.0, 60.0, Gender::Female, ActivityLevel::ModeratelyActive);
        let estimate = estimate_energy(&p).unwrap();
        assert!((estimate.bmr - 1320.25).abs() < 1e-9);

        let rec = compute_recommendation(&p).unwrap();
        assert_eq!(rec, Recommendation { calories: 2046, protein: 102, carbs: 256, fat: 68 });
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(recommendation_from_tdee(1000.5).calories, 1001);
        assert_eq!(recommendation_from_tdee(1000.49).calories, 1000);
        assert_eq!(recommendation_from_tdee(0.0), Recommendation::default());
    }

    #[test]
    fn test_extreme_profile_never_goes_negative() {
        let p = profile(120.0, 50.0, 3.0, Gender::Female, ActivityLevel::Sedentary);
        assert!(estimate_energy(&p).unwrap().tdee < 0.0);
        assert_eq!(compute_recommendation(&p), Some(Recommendation::default()));
    }

    #[test]
    fn test_incomplete_profile_has_no_recommendation() {
        let mut p = profile(25.0, 175.0, 70.0, Gender::Male, ActivityLevel::Sedentary);
        p.height = None;
        assert!(compute_recommendation(&p).is_none());
        assert!(estimate_energy(&UserProfile::default()).is_none());
    }

    #[test]
    fn test_engine_keeps_stale_value_until_complete() {
        let mut engine = RecommendationEngine::new();
        assert_eq!(engine.current(), Recommendation::default());

        let mut p = profile(25.0, 175.0, 70.0, Gender::Male, ActivityLevel::Sedentary);
        assert!(engine.refresh(&p));
        let first = engine.current();
        assert_eq!(first.calories, 2009);

        p.weight = None;
        assert!(!engine.refresh(&p));
        assert_eq!(engine.current(), first);

        p.weight = Some(80.0);
        p.activity_level = ActivityLevel::VeryActive;
        assert!(engine.refresh(&p));
        // (800 + 1093.75 - 125 + 5) * 1.725 = 3059.71875
        assert_eq!(engine.current().calories, 3060);
    }
}
