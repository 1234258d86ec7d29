//! Inference dispatch over the loaded model bundle

use crate::encoder::FeatureRow;
use crate::models::bundle::ModelBundle;
use crate::types::profile::UserProfile;
use crate::types::vitals::{BmiReading, HydrationReading, Recommendation};
use anyhow::Result;
use chrono::Utc;
use tracing::debug;

/// The six model outputs for one feature row.
///
/// Values are exactly what the predictors returned; rounding happens in
/// the report renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// Daily calorie target (kcal)
    pub calories: f64,
    /// Daily protein target (g)
    pub protein: f64,
    /// Daily fat target (g)
    pub fat: f64,
    /// Daily carbohydrate target (g)
    pub carb: f64,
    /// Recommended cardio routine
    pub cardio: String,
    /// Recommended strength routine
    pub strength: String,
    /// Recommended mobility routine
    pub mobility: String,
}

impl PredictionResult {
    /// Assemble the full display aggregate: model outputs plus the derived
    /// vitals for the same profile.
    pub fn to_recommendation(&self, profile: &UserProfile) -> Recommendation {
        Recommendation {
            prediction: self.clone(),
            bmi: BmiReading::from_profile(profile),
            hydration: HydrationReading::from_profile(profile),
            generated_at: Utc::now(),
        }
    }
}

/// Applies each of the six predictors in the bundle to one feature row.
pub struct InferenceDispatcher {
    bundle: ModelBundle,
}

impl InferenceDispatcher {
    /// Create a dispatcher owning a loaded bundle
    pub fn new(bundle: ModelBundle) -> Self {
        Self { bundle }
    }

    /// Ordered feature schema the bundle expects
    pub fn schema(&self) -> &[String] {
        &self.bundle.schema
    }

    /// Run all six predictors on one schema-aligned row.
    ///
    /// Any predictor failure aborts the whole operation; there are no
    /// retries and no partial results.
    pub fn predict(&self, row: &FeatureRow) -> Result<PredictionResult> {
        let calories = self.bundle.reg_calories.predict(row)?;
        let protein = self.bundle.reg_protein.predict(row)?;
        let fat = self.bundle.reg_fat.predict(row)?;
        let carb = self.bundle.reg_carb.predict(row)?;

        let cardio = self.bundle.clf_cardio.predict(row)?;
        let strength = self.bundle.clf_strength.predict(row)?;
        let mobility = self.bundle.clf_mobility.predict(row)?;

        debug!(
            calories,
            protein,
            fat,
            carb,
            cardio = %cardio,
            strength = %strength,
            mobility = %mobility,
            "Inference complete"
        );

        Ok(PredictionResult {
            calories,
            protein,
            fat,
            carb,
            cardio,
            strength,
            mobility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::FeatureEncoder;
    use crate::models::bundle::{Classifier, Regressor};
    use crate::types::profile::{ExerciseLevel, Gender};

    struct FixedRegressor(f64);

    impl Regressor for FixedRegressor {
        fn predict(&self, _row: &FeatureRow) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct FixedClassifier(&'static str);

    impl Classifier for FixedClassifier {
        fn predict(&self, _row: &FeatureRow) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingRegressor;

    impl Regressor for FailingRegressor {
        fn predict(&self, _row: &FeatureRow) -> Result<f64> {
            anyhow::bail!("model fault")
        }
    }

    fn fake_bundle() -> ModelBundle {
        ModelBundle {
            reg_calories: Box::new(FixedRegressor(2185.4)),
            reg_protein: Box::new(FixedRegressor(118.6)),
            reg_fat: Box::new(FixedRegressor(71.2)),
            reg_carb: Box::new(FixedRegressor(247.9)),
            clf_cardio: Box::new(FixedClassifier("30 min jog")),
            clf_strength: Box::new(FixedClassifier("full body, 3x/week")),
            clf_mobility: Box::new(FixedClassifier("10 min stretching daily")),
            schema: vec!["weight".to_string(), "height".to_string()],
        }
    }

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
    fn test_dispatch_returns_predictor_outputs_unrounded() {
        let dispatcher = InferenceDispatcher::new(fake_bundle());
        let encoder = FeatureEncoder::new(dispatcher.schema().to_vec());

        let row = encoder.encode(&profile());
        let result = dispatcher.predict(&row).unwrap();

        assert_eq!(result.calories, 2185.4);
        assert_eq!(result.protein, 118.6);
        assert_eq!(result.fat, 71.2);
        assert_eq!(result.carb, 247.9);
        assert_eq!(result.cardio, "30 min jog");
        assert_eq!(result.strength, "full body, 3x/week");
        assert_eq!(result.mobility, "10 min stretching daily");
    }

    #[test]
    fn test_predictor_fault_aborts_the_operation() {
        let mut bundle = fake_bundle();
        bundle.reg_fat = Box::new(FailingRegressor);

        let dispatcher = InferenceDispatcher::new(bundle);
        let encoder = FeatureEncoder::new(dispatcher.schema().to_vec());

        let row = encoder.encode(&profile());
        assert!(dispatcher.predict(&row).is_err());
    }

    #[test]
    fn test_recommendation_carries_vitals() {
        let dispatcher = InferenceDispatcher::new(fake_bundle());
        let encoder = FeatureEncoder::new(dispatcher.schema().to_vec());

        let p = profile();
        let row = encoder.encode(&p);
        let recommendation = dispatcher.predict(&row).unwrap().to_recommendation(&p);

        assert_eq!(recommendation.prediction.cardio, "30 min jog");
        assert!((recommendation.bmi.value - 24.22).abs() < 0.01);
        assert_eq!(recommendation.hydration.recommended_cups, 8);
    }
}
