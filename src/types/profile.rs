//! User profile data structures for the recommendation pipeline

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Valid weight range in kilograms
pub const WEIGHT_RANGE: RangeInclusive<f64> = 40.0..=150.0;
/// Valid height range in centimeters
pub const HEIGHT_RANGE: RangeInclusive<f64> = 140.0..=210.0;
/// Valid age range in years
pub const AGE_RANGE: RangeInclusive<u32> = 18..=60;
/// Valid reported daily water intake in cups
pub const WATER_CUPS_RANGE: RangeInclusive<u32> = 0..=15;

/// Gender as encoded during model training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse from user input (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported exercise level, one of the five categories the models
/// were trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ExerciseLevel {
    /// All levels, in training order
    pub const ALL: [ExerciseLevel; 5] = [
        ExerciseLevel::Sedentary,
        ExerciseLevel::Light,
        ExerciseLevel::Moderate,
        ExerciseLevel::Active,
        ExerciseLevel::VeryActive,
    ];

    /// Parse from user input (case-insensitive; accepts "very active" and
    /// "very_active")
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sedentary" => Some(ExerciseLevel::Sedentary),
            "light" => Some(ExerciseLevel::Light),
            "moderate" => Some(ExerciseLevel::Moderate),
            "active" => Some(ExerciseLevel::Active),
            "very active" | "very_active" => Some(ExerciseLevel::VeryActive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseLevel::Sedentary => "sedentary",
            ExerciseLevel::Light => "light",
            ExerciseLevel::Moderate => "moderate",
            ExerciseLevel::Active => "active",
            ExerciseLevel::VeryActive => "very_active",
        }
    }

    /// Name of the one-hot indicator column for this level
    pub fn column(&self) -> &'static str {
        match self {
            ExerciseLevel::Sedentary => "exercise_level_sedentary",
            ExerciseLevel::Light => "exercise_level_light",
            ExerciseLevel::Moderate => "exercise_level_moderate",
            ExerciseLevel::Active => "exercise_level_active",
            ExerciseLevel::VeryActive => "exercise_level_very_active",
        }
    }
}

impl fmt::Display for ExerciseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One set of user-entered body metrics, captured fresh per interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Body weight in kilograms
    #[serde(alias = "weight")]
    pub weight_kg: f64,

    /// Height in centimeters
    #[serde(alias = "height")]
    pub height_cm: f64,

    /// Age in years
    pub age: u32,

    /// Gender
    pub gender: Gender,

    /// Self-reported exercise level
    pub exercise_level: ExerciseLevel,

    /// Reported daily water intake in cups
    pub water_cups: u32,
}

impl UserProfile {
    /// Check every field against its capture domain.
    ///
    /// Called at capture time; the feature encoder performs no validation
    /// of its own.
    pub fn validate(&self) -> Result<()> {
        if !WEIGHT_RANGE.contains(&self.weight_kg) {
            bail!(
                "weight {} kg is outside the supported range {:.0}-{:.0} kg",
                self.weight_kg,
                WEIGHT_RANGE.start(),
                WEIGHT_RANGE.end()
            );
        }
        if !HEIGHT_RANGE.contains(&self.height_cm) {
            bail!(
                "height {} cm is outside the supported range {:.0}-{:.0} cm",
                self.height_cm,
                HEIGHT_RANGE.start(),
                HEIGHT_RANGE.end()
            );
        }
        if !AGE_RANGE.contains(&self.age) {
            bail!(
                "age {} is outside the supported range {}-{}",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            );
        }
        if !WATER_CUPS_RANGE.contains(&self.water_cups) {
            bail!(
                "water intake of {} cups is outside the supported range {}-{}",
                self.water_cups,
                WATER_CUPS_RANGE.start(),
                WATER_CUPS_RANGE.end()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            weight_kg: 70.0,
            height_cm: 170.0,
            age: 25,
            gender: Gender::Female,
            exercise_level: ExerciseLevel::Moderate,
            water_cups: 6,
        }
    }

    #[test]
    fn test_profile_serialization() {
        let p = profile();

        let json = serde_json::to_string(&p).unwrap();
        let deserialized: UserProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(p.weight_kg, deserialized.weight_kg);
        assert_eq!(p.gender, deserialized.gender);
        assert_eq!(p.exercise_level, deserialized.exercise_level);
    }

    #[test]
    fn test_profile_accepts_short_field_names() {
        let json = r#"{
            "weight": 82.5,
            "height": 180.0,
            "age": 41,
            "gender": "male",
            "exercise_level": "very_active",
            "water_cups": 8
        }"#;

        let p: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.weight_kg, 82.5);
        assert_eq!(p.gender, Gender::Male);
        assert_eq!(p.exercise_level, ExerciseLevel::VeryActive);
    }

    #[test]
    fn test_validate_rejects_out_of_domain() {
        let mut p = profile();
        assert!(p.validate().is_ok());

        p.weight_kg = 30.0;
        assert!(p.validate().is_err());

        p = profile();
        p.age = 17;
        assert!(p.validate().is_err());

        p = profile();
        p.water_cups = 16;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_exercise_level_parse() {
        assert_eq!(
            ExerciseLevel::parse("very active"),
            Some(ExerciseLevel::VeryActive)
        );
        assert_eq!(ExerciseLevel::parse("MODERATE"), Some(ExerciseLevel::Moderate));
        assert_eq!(ExerciseLevel::parse("extreme"), None);
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("m"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);
    }
}
