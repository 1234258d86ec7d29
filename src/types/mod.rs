//! Type definitions for the recommendation pipeline

pub mod profile;
pub mod vitals;

pub use profile::{ExerciseLevel, Gender, UserProfile};
pub use vitals::{BmiCategory, BmiReading, HydrationReading, HydrationStatus, Recommendation};
