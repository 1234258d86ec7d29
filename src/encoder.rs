//! Feature encoding for recommendation model inference.
//!
//! This module turns a captured user profile into the numeric feature row
//! the models expect, matching the preprocessing done in the upstream
//! training pipeline: numeric passthrough for the four measurement fields
//! and one-hot expansion for gender and exercise level.

use crate::types::profile::{ExerciseLevel, Gender, UserProfile};

/// A single schema-aligned row of named numeric model inputs.
///
/// Invariant: `columns` equals the bundle schema exactly, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f32>,
}

impl FeatureRow {
    /// Column names, in schema order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values, aligned with `columns`
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<f32> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encoder that transforms user profiles into schema-aligned feature rows.
///
/// The schema comes from the loaded model bundle (`X_cols`). Alignment is
/// total: raw columns the schema does not name are dropped silently, and
/// schema columns the raw encoding does not produce are filled with 0.
pub struct FeatureEncoder {
    schema: Vec<String>,
}

impl FeatureEncoder {
    /// Create an encoder for the given ordered schema.
    pub fn new(schema: Vec<String>) -> Self {
        Self { schema }
    }

    /// Encode a profile into a row matching the schema.
    ///
    /// Pure function of (profile, schema); encoding the same profile twice
    /// yields identical rows.
    pub fn encode(&self, profile: &UserProfile) -> FeatureRow {
        let raw = Self::raw_encoding(profile);

        let values = self
            .schema
            .iter()
            .map(|col| {
                raw.iter()
                    .find(|(name, _)| name == col)
                    .map(|(_, value)| *value)
                    .unwrap_or(0.0)
            })
            .collect();

        FeatureRow {
            columns: self.schema.clone(),
            values,
        }
    }

    /// Number of features produced per row.
    pub fn feature_count(&self) -> usize {
        self.schema.len()
    }

    /// Raw column/value pairs before schema alignment, matching the
    /// training data format (11 columns).
    fn raw_encoding(profile: &UserProfile) -> Vec<(&'static str, f32)> {
        let mut raw = Vec::with_capacity(11);

        // Numeric passthrough (4)
        raw.push(("weight", profile.weight_kg as f32));
        raw.push(("height", profile.height_cm as f32));
        raw.push(("age", profile.age as f32));
        raw.push(("water_cups", profile.water_cups as f32));

        // Gender indicators (2), exactly one set
        raw.push((
            "gender_female",
            if profile.gender == Gender::Female { 1.0 } else { 0.0 },
        ));
        raw.push((
            "gender_male",
            if profile.gender == Gender::Male { 1.0 } else { 0.0 },
        ));

        // Exercise level indicators (5), exactly one set
        for level in ExerciseLevel::ALL {
            raw.push((
                level.column(),
                if profile.exercise_level == level { 1.0 } else { 0.0 },
            ));
        }

        raw
    }
}
