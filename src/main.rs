//! Health & Diet Recommender - Main Entry Point
//!
//! Loads the pre-trained model bundle once at startup, then runs one
//! capture -> encode -> predict -> render pass per interaction: an
//! interactive prompt loop by default, or a single shot when a profile
//! JSON path is given as the sole argument.

use anyhow::{bail, Result};
use health_recommender::{
    config::{AppConfig, LoggingConfig},
    encoder::FeatureEncoder,
    models::inference::InferenceDispatcher,
    models::loader::ModelLoader,
    report::{self, ReportStyle},
    session,
    types::profile::UserProfile,
};
use std::env;
use std::path::Path;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!("Starting Health & Diet Recommender");

    // The bundle is a hard startup requirement; a missing export halts
    // here, before any component is built.
    let bundle_path = Path::new(&config.bundle.path);
    if !bundle_path.exists() {
        error!(path = %bundle_path.display(), "Model bundle missing");
        bail!(
            "model bundle not found at {} (export the trained models before starting)",
            bundle_path.display()
        );
    }

    let loader = ModelLoader::with_threads(config.bundle.intra_threads)?;
    let bundle = loader.load_bundle(bundle_path)?;

    let encoder = FeatureEncoder::new(bundle.schema.clone());
    info!(
        "Feature encoder initialized ({} features)",
        encoder.feature_count()
    );

    let dispatcher = InferenceDispatcher::new(bundle);

    match env::args().nth(1) {
        Some(profile_path) => {
            let profile = session::load_profile(&profile_path)?;
            run_once(&profile, &encoder, &dispatcher, config.report.style)?;
        }
        None => {
            println!("AI Health & Diet Recommender");
            println!("Enter your details (press Enter to accept a default).\n");

            loop {
                let Some(profile) = session::prompt_profile()? else {
                    break;
                };

                run_once(&profile, &encoder, &dispatcher, config.report.style)?;

                if !session::confirm_another()? {
                    break;
                }
                println!();
            }
        }
    }

    Ok(())
}

/// One full interaction: encode, predict, derive vitals, render
fn run_once(
    profile: &UserProfile,
    encoder: &FeatureEncoder,
    dispatcher: &InferenceDispatcher,
    style: ReportStyle,
) -> Result<()> {
    info!(
        weight_kg = profile.weight_kg,
        height_cm = profile.height_cm,
        age = profile.age,
        gender = %profile.gender,
        exercise_level = %profile.exercise_level,
        water_cups = profile.water_cups,
        "Profile captured"
    );

    let row = encoder.encode(profile);
    let prediction = dispatcher.predict(&row)?;
    let recommendation = prediction.to_recommendation(profile);

    println!("\n{}", report::render(&recommendation, style));
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("health_recommender={}", logging.level).parse()?);

    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    Ok(())
}
