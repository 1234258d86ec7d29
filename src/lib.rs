//! Health & Diet Recommender Library
//!
//! A terminal dashboard that feeds user-entered body metrics through
//! pre-trained regression and classification models and renders
//! personalized nutrition, exercise, hydration, and BMI feedback.

pub mod config;
pub mod encoder;
pub mod models;
pub mod report;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use encoder::{FeatureEncoder, FeatureRow};
pub use models::inference::{InferenceDispatcher, PredictionResult};
pub use models::loader::ModelLoader;
pub use types::{profile::UserProfile, vitals::Recommendation};
