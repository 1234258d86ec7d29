//! Derived body metrics: BMI and hydration
//!
//! Pure arithmetic over a captured profile; none of these values involve
//! the predictive models.

use crate::models::inference::PredictionResult;
use crate::types::profile::UserProfile;
use chrono::{DateTime, Utc};

/// Recommended water volume per kilogram of body weight, in milliliters
pub const WATER_ML_PER_KG: f64 = 30.0;

/// Volume of one cup, in milliliters
pub const CUP_ML: f64 = 250.0;

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value against the standard thresholds
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi >= 30.0 {
            BmiCategory::Obese
        } else if bmi >= 25.0 {
            BmiCategory::Overweight
        } else if bmi >= 18.5 {
            BmiCategory::Normal
        } else {
            BmiCategory::Underweight
        }
    }

    /// Human-readable label for the report
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obesity",
        }
    }
}

/// BMI value and its category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiReading {
    /// Compute BMI from a profile: weight / height_in_meters^2
    pub fn from_profile(profile: &UserProfile) -> Self {
        let meters = profile.height_cm / 100.0;
        let value = profile.weight_kg / (meters * meters);
        Self {
            value,
            category: BmiCategory::from_bmi(value),
        }
    }
}

/// Whether reported intake covers the recommended volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationStatus {
    Sufficient,
    Insufficient,
}

/// Hydration recommendation derived from body weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrationReading {
    /// Cups the user reported drinking per day
    pub reported_cups: u32,
    /// Reported volume, at one cup = 250 ml
    pub reported_ml: f64,
    /// Recommended volume: weight_kg * 30 ml
    pub recommended_ml: f64,
    /// Recommended volume expressed in cups, rounded
    pub recommended_cups: u32,
    pub status: HydrationStatus,
}

impl HydrationReading {
    pub fn from_profile(profile: &UserProfile) -> Self {
        let recommended_ml = profile.weight_kg * WATER_ML_PER_KG;
        let recommended_cups = (recommended_ml / CUP_ML).round() as u32;
        let status = if profile.water_cups >= recommended_cups {
            HydrationStatus::Sufficient
        } else {
            HydrationStatus::Insufficient
        };

        Self {
            reported_cups: profile.water_cups,
            reported_ml: f64::from(profile.water_cups) * CUP_ML,
            recommended_ml,
            recommended_cups,
            status,
        }
    }
}

/// Everything one interaction displays: the model outputs plus the derived
/// vitals, assembled once per report
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub prediction: PredictionResult,
    pub bmi: BmiReading,
    pub hydration: HydrationReading,
    pub generated_at: DateTime<Utc>,
}
