use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use candle_core::utils::{cuda_is_available, metal_is_available};
use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{Linear, VarBuilder};
use hf_hub::{Repo, RepoType, api::tokio::Api};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::encoding::CategoricalField;
use crate::engine::Engine;
use crate::types::{Cell, CreditApplication, ModelInfo};

pub const CONFIG_FILE: &str = "config.json";
pub const WEIGHTS_FILE: &str = "model.safetensors";

/// What to do with a category the model never saw during training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Encode as an all-zero one-hot block.
    Ignore,
}

/// Preprocessing step for one input column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    Categorical {
        column: String,
        categories: Vec<String>,
    },
    Numeric {
        column: String,
        mean: f64,
        scale: f64,
    },
}

impl FeatureSpec {
    pub fn column(&self) -> &str {
        match self {
            Self::Categorical { column, .. } | Self::Numeric { column, .. } => column,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Self::Categorical { categories, .. } => categories.len(),
            Self::Numeric { .. } => 1,
        }
    }
}

/// Contents of the artifact's `config.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtifactConfig {
    /// Class code for each output logit, in order.
    pub classes: Vec<i64>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
    pub features: Vec<FeatureSpec>,
}

impl ArtifactConfig {
    pub fn input_width(&self) -> usize {
        self.features.iter().map(FeatureSpec::width).sum()
    }

    /// Checks that every feature refers to a request column of the right
    /// kind, so a loaded model can always build its row.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.classes.is_empty(), "model declares no classes");
        ensure!(!self.features.is_empty(), "model declares no features");

        let mut seen = HashSet::new();
        for feature in &self.features {
            let column = feature.column();
            ensure!(
                CreditApplication::COLUMNS.iter().any(|known| *known == column),
                "unknown feature column {column:?}"
            );
            ensure!(seen.insert(column), "feature column {column:?} listed twice");

            let categorical = CategoricalField::from_key(column).is_some();
            match feature {
                FeatureSpec::Categorical { categories, .. } => {
                    ensure!(categorical, "column {column:?} is numeric, not categorical");
                    ensure!(!categories.is_empty(), "column {column:?} has no categories");
                }
                FeatureSpec::Numeric { mean, scale, .. } => {
                    ensure!(!categorical, "column {column:?} is categorical, not numeric");
                    ensure!(
                        mean.is_finite() && scale.is_finite() && *scale != 0.0,
                        "column {column:?} has an invalid scaler (mean={mean}, scale={scale})"
                    );
                }
            }
        }
        Ok(())
    }

    /// Builds the model input row: one-hot blocks for categorical columns,
    /// standardized values for numeric ones, in feature order.
    pub fn encode(&self, application: &CreditApplication) -> Result<Vec<f32>> {
        let mut row = Vec::with_capacity(self.input_width());

        for feature in &self.features {
            let column = feature.column();
            let cell = application
                .cell(column)
                .with_context(|| format!("application has no column {column:?}"))?;

            match (feature, cell) {
                (FeatureSpec::Categorical { categories, .. }, Cell::Code(code)) => {
                    let hit = categories.iter().position(|category| category == code);
                    if hit.is_none() && self.handle_unknown == HandleUnknown::Error {
                        bail!("Found unknown category {code:?} in column {column:?} during transform");
                    }
                    row.extend((0..categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
                }
                (FeatureSpec::Numeric { mean, scale, .. }, Cell::Number(value)) => {
                    ensure!(value.is_finite(), "column {column:?} is not a finite number");
                    row.push(((value - mean) / scale) as f32);
                }
                _ => bail!("column {column:?} does not match its feature kind"),
            }
        }

        Ok(row)
    }
}

#[derive(Debug, Clone)]
pub struct TabularConfig {
    pub model_id: Option<String>,
    pub model_path: Option<PathBuf>,
    pub revision: String,
    pub cpu: bool,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            model_id: None,
            model_path: None,
            revision: "main".to_string(),
            cpu: false,
        }
    }
}

/// Preprocessing plus a linear classifier head, loaded from a
/// `config.json` / `model.safetensors` pair.
pub struct TabularEngine {
    model: Linear,
    artifact: ArtifactConfig,
    device: Device,
}

impl TabularEngine {
    fn device(cpu: bool) -> Result<Device> {
        if cpu {
            Ok(Device::Cpu)
        } else if metal_is_available() {
            tracing::info!("Using metal acceleration");
            Ok(Device::new_metal(0)?)
        } else if cuda_is_available() {
            tracing::info!("Using CUDA GPU acceleration");
            Ok(Device::new_cuda(0)?)
        } else {
            tracing::info!(
                "CUDA not available, running on CPU. To run on GPU, build with `--features cuda`"
            );
            Ok(Device::Cpu)
        }
    }

    #[tracing::instrument(skip(config), fields(model_id = ?config.model_id, model_path = ?config.model_path, cpu = config.cpu))]
    pub async fn new(config: TabularConfig) -> Result<Self> {
        let device = Self::device(config.cpu)?;

        // Get files from either the HuggingFace API, or from a specified local directory
        let (config_file, weights_file) = match (&config.model_path, &config.model_id) {
            (Some(base_path), _) => {
                if !base_path.is_dir() {
                    bail!("Model path {} is not a directory.", base_path.display());
                }
                (base_path.join(CONFIG_FILE), base_path.join(WEIGHTS_FILE))
            }
            (None, Some(model_id)) => {
                let repo = Repo::with_revision(
                    model_id.clone(),
                    RepoType::Model,
                    config.revision.clone(),
                );
                let api = Api::new()?.repo(repo);
                let config_file = api
                    .get(CONFIG_FILE)
                    .await
                    .with_context(|| format!("failed to fetch {CONFIG_FILE} from {model_id}"))?;
                let weights_file = api
                    .get(WEIGHTS_FILE)
                    .await
                    .with_context(|| format!("failed to fetch {WEIGHTS_FILE} from {model_id}"))?;
                (config_file, weights_file)
            }
            (None, None) => bail!("Either model_id or model_path must be specified"),
        };

        Self::from_files(&config_file, &weights_file, device)
    }

    pub fn from_files(config_file: &Path, weights_file: &Path, device: Device) -> Result<Self> {
        let raw = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read {}", config_file.display()))?;
        let artifact: ArtifactConfig = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", config_file.display()))?;
        artifact
            .validate()
            .with_context(|| format!("invalid model config {}", config_file.display()))?;

        if !weights_file.is_file() {
            bail!("Model weights {} not found.", weights_file.display());
        }

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_file], DType::F32, &device)?
        };
        let model = candle_nn::linear(
            artifact.input_width(),
            artifact.classes.len(),
            vb.pp("classifier"),
        )
        .with_context(|| format!("failed to load classifier from {}", weights_file.display()))?;

        tracing::debug!(
            input_width = artifact.input_width(),
            classes = ?artifact.classes,
            "Classifier loaded"
        );

        Ok(Self {
            model,
            artifact,
            device,
        })
    }

    pub fn artifact(&self) -> &ArtifactConfig {
        &self.artifact
    }

    /// Runs the classifier on one row and returns the winning class code.
    pub fn classify(&self, application: &CreditApplication) -> Result<i64> {
        let row = self.artifact.encode(application)?;
        let width = row.len();
        let input = Tensor::from_vec(row, (1, width), &self.device)?;

        let logits = self.model.forward(&input)?;
        let winner = logits
            .argmax(1)?
            .to_vec1::<u32>()?
            .first()
            .copied()
            .context("model produced no output")?;

        self.artifact
            .classes
            .get(winner as usize)
            .copied()
            .with_context(|| format!("model produced class index {winner} outside its label space"))
    }
}

#[async_trait]
impl Engine for TabularEngine {
    #[tracing::instrument(skip(self, application))]
    async fn predict(&self, application: &CreditApplication) -> Result<i64> {
        self.classify(application)
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            classes: self.artifact.classes.clone(),
            columns: self
                .artifact
                .features
                .iter()
                .map(|feature| feature.column().to_string())
                .collect(),
            input_width: self.artifact.input_width(),
        }
    }
}
