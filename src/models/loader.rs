//! ONNX model bundle loading
//!
//! The bundle is a single JSON manifest mapping the six predictor roles to
//! their exported ONNX graphs, plus the ordered `X_cols` feature schema.
//! Loading happens once at startup; a missing or unreadable bundle is a
//! fatal condition reported before any inference runs.

use crate::encoder::FeatureRow;
use crate::models::bundle::{Classifier, ModelBundle, Regressor};
use anyhow::{bail, Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

/// Bundle manifest as exported by the training pipeline
#[derive(Deserialize)]
struct BundleManifest {
    reg_calories: RegressorEntry,
    reg_protein: RegressorEntry,
    reg_fat: RegressorEntry,
    reg_carb: RegressorEntry,
    clf_cardio: ClassifierEntry,
    clf_strength: ClassifierEntry,
    clf_mobility: ClassifierEntry,
    #[serde(rename = "X_cols")]
    x_cols: Vec<String>,
}

#[derive(Deserialize)]
struct RegressorEntry {
    /// ONNX graph file, relative to the manifest
    file: String,
}

#[derive(Deserialize)]
struct ClassifierEntry {
    /// ONNX graph file, relative to the manifest
    file: String,
    /// Class labels in model output order
    classes: Vec<String>,
}

/// Loaded ONNX model with metadata
pub struct LoadedModel {
    /// Model name (its role key in the manifest)
    pub name: String,
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the model
    pub input_name: String,
    /// Output name holding the prediction
    pub output_name: String,
}

/// Loader for the recommendation model bundle
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    intra_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Result<Self> {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of threads
    pub fn with_threads(intra_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(intra_threads = intra_threads, "ONNX Runtime initialized");
        Ok(Self { intra_threads })
    }

    /// Load the full bundle from its manifest file.
    ///
    /// All six predictors are required; any missing or unloadable graph
    /// fails the whole load.
    pub fn load_bundle<P: AsRef<Path>>(&self, manifest_path: P) -> Result<ModelBundle> {
        let manifest_path = manifest_path.as_ref();

        if !manifest_path.exists() {
            bail!(
                "model bundle not found at {} (export the trained models before starting)",
                manifest_path.display()
            );
        }

        let file = File::open(manifest_path)
            .with_context(|| format!("Failed to open model bundle {}", manifest_path.display()))?;
        let manifest: BundleManifest = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid model bundle manifest {}", manifest_path.display()))?;

        if manifest.x_cols.is_empty() {
            bail!(
                "model bundle {} declares an empty X_cols schema",
                manifest_path.display()
            );
        }

        let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let bundle = ModelBundle {
            reg_calories: self.load_regressor(dir, &manifest.reg_calories, "reg_calories")?,
            reg_protein: self.load_regressor(dir, &manifest.reg_protein, "reg_protein")?,
            reg_fat: self.load_regressor(dir, &manifest.reg_fat, "reg_fat")?,
            reg_carb: self.load_regressor(dir, &manifest.reg_carb, "reg_carb")?,
            clf_cardio: self.load_classifier(dir, &manifest.clf_cardio, "clf_cardio")?,
            clf_strength: self.load_classifier(dir, &manifest.clf_strength, "clf_strength")?,
            clf_mobility: self.load_classifier(dir, &manifest.clf_mobility, "clf_mobility")?,
            schema: manifest.x_cols,
        };

        info!(
            features = bundle.feature_count(),
            "Loaded model bundle from {}",
            manifest_path.display()
        );

        Ok(bundle)
    }

    fn load_regressor(
        &self,
        dir: &Path,
        entry: &RegressorEntry,
        name: &str,
    ) -> Result<Box<dyn Regressor>> {
        let model = self.load_session(&dir.join(&entry.file), name, &["variable", "output"])?;
        Ok(Box::new(OnnxRegressor {
            model: RwLock::new(model),
        }))
    }

    fn load_classifier(
        &self,
        dir: &Path,
        entry: &ClassifierEntry,
        name: &str,
    ) -> Result<Box<dyn Classifier>> {
        if entry.classes.is_empty() {
            bail!("classifier {} declares no class labels", name);
        }
        let model = self.load_session(&dir.join(&entry.file), name, &["label"])?;
        Ok(Box::new(OnnxClassifier {
            model: RwLock::new(model),
            classes: entry.classes.clone(),
        }))
    }

    /// Load a single ONNX graph and pick its input/output names
    fn load_session(&self, path: &Path, name: &str, output_hints: &[&str]) -> Result<LoadedModel> {
        info!(model = %name, path = %path.display(), threads = self.intra_threads, "Loading ONNX model");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.intra_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .iter()
            .find(|o| output_hints.iter().any(|hint| o.name.contains(hint)))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "output".to_string())
            });

        info!(
            model = %name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(LoadedModel {
            name: name.to_string(),
            session,
            input_name,
            output_name,
        })
    }
}

/// Numeric predictor backed by an ONNX session.
///
/// `Session::run` needs exclusive access, so the model sits behind a lock
/// even though the pipeline itself is single-threaded.
struct OnnxRegressor {
    model: RwLock<LoadedModel>,
}

impl Regressor for OnnxRegressor {
    fn predict(&self, row: &FeatureRow) -> Result<f64> {
        use ort::value::Tensor;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let model_name = model.name.clone();
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, row.len() as i64];
        let input_tensor = Tensor::from_array((shape, row.values().to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = model.session.run(ort::inputs![&input_name => input_tensor])?;

        if let Some(output) = outputs.get(output_name.as_str()) {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                return scalar_from_tensor(data, &model_name);
            }
        }

        // Fallback: first numeric output
        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                return scalar_from_tensor(data, &model_name);
            }
        }

        bail!("model {} produced no numeric output", model_name)
    }
}

/// Label predictor backed by an ONNX session.
///
/// The graph emits a class index; the manifest supplies the label
/// vocabulary in model output order.
struct OnnxClassifier {
    model: RwLock<LoadedModel>,
    classes: Vec<String>,
}

impl Classifier for OnnxClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<String> {
        use ort::value::Tensor;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let model_name = model.name.clone();
        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let shape = vec![1_i64, row.len() as i64];
        let input_tensor = Tensor::from_array((shape, row.values().to_vec()))
            .context("Failed to create input tensor")?;

        let outputs = model.session.run(ort::inputs![&input_name => input_tensor])?;

        if let Some(output) = outputs.get(output_name.as_str()) {
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                return label_from_tensor(data, &self.classes, &model_name);
            }
        }

        // Fallback: any output named like a label
        for (name, output) in outputs.iter() {
            if !name.contains("label") {
                continue;
            }
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                return label_from_tensor(data, &self.classes, &model_name);
            }
        }

        bail!("model {} produced no label output", model_name)
    }
}

/// Extract the single scalar prediction (shape [1, 1] or [1])
fn scalar_from_tensor(data: &[f32], model_name: &str) -> Result<f64> {
    data.first()
        .map(|&v| f64::from(v))
        .with_context(|| format!("model {} returned an empty tensor", model_name))
}

/// Map the predicted class index to its label
fn label_from_tensor(data: &[i64], classes: &[String], model_name: &str) -> Result<String> {
    let index = *data
        .first()
        .with_context(|| format!("model {} returned an empty label tensor", model_name))?;

    usize::try_from(index)
        .ok()
        .and_then(|i| classes.get(i))
        .cloned()
        .with_context(|| {
            format!(
                "model {} predicted class {} outside its {} known labels",
                model_name,
                index,
                classes.len()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bundle_is_reported_with_path() {
        let loader = ModelLoader { intra_threads: 1 };

        let err = loader
            .load_bundle("models/does-not-exist.json")
            .expect_err("missing bundle must fail");

        assert!(err.to_string().contains("models/does-not-exist.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_scalar_from_tensor() {
        let scalar = scalar_from_tensor(&[2185.4], "reg_calories").unwrap();
        assert!((scalar - 2185.4).abs() < 1e-3);

        assert!(scalar_from_tensor(&[], "reg_calories").is_err());
    }

    #[test]
    fn test_label_from_tensor() {
        let classes = vec!["20 min walk".to_string(), "30 min jog".to_string()];

        assert_eq!(
            label_from_tensor(&[1], &classes, "clf_cardio").unwrap(),
            "30 min jog"
        );
        assert!(label_from_tensor(&[2], &classes, "clf_cardio").is_err());
        assert!(label_from_tensor(&[-1], &classes, "clf_cardio").is_err());
        assert!(label_from_tensor(&[], &classes, "clf_cardio").is_err());
    }
}
