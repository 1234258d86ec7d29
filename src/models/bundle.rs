//! Predictor traits and the loaded model bundle

use crate::encoder::FeatureRow;
use anyhow::Result;
use std::fmt;

/// A fitted numeric predictor (calorie and macro targets).
///
/// Implementations are opaque to the pipeline; the concrete models are
/// ONNX sessions, and tests substitute fixed-value fakes.
pub trait Regressor: Send + Sync {
    /// Predict a single scalar for one schema-aligned row.
    fn predict(&self, row: &FeatureRow) -> Result<f64>;
}

/// A fitted label predictor (exercise plan recommendations).
pub trait Classifier: Send + Sync {
    /// Predict a single label for one schema-aligned row.
    fn predict(&self, row: &FeatureRow) -> Result<String>;
}

/// The six fitted predictors plus their shared input schema, loaded once
/// at startup and read-only for the process lifetime.
///
/// The predictor roles are static, so the bundle is a fixed struct rather
/// than a keyed map. It is always passed explicitly; nothing holds it as
/// process-global state.
pub struct ModelBundle {
    pub reg_calories: Box<dyn Regressor>,
    pub reg_protein: Box<dyn Regressor>,
    pub reg_fat: Box<dyn Regressor>,
    pub reg_carb: Box<dyn Regressor>,
    pub clf_cardio: Box<dyn Classifier>,
    pub clf_strength: Box<dyn Classifier>,
    pub clf_mobility: Box<dyn Classifier>,
    /// Ordered feature column names the predictors expect (`X_cols`)
    pub schema: Vec<String>,
}

impl ModelBundle {
    /// Number of feature columns the predictors expect
    pub fn feature_count(&self) -> usize {
        self.schema.len()
    }
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
