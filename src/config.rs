use clap::Parser;
use std::path::PathBuf;

use crate::tabular_engine::TabularConfig;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Server port to bind to
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Model ID from Hugging Face Hub
    #[arg(long, env = "MODEL_ID")]
    pub model_id: Option<String>,

    /// Local path to model directory (config.json + model.safetensors)
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Model revision/branch on Hugging Face
    #[arg(long, env = "MODEL_REVISION", default_value = "main")]
    pub model_revision: String,

    /// Run on CPU instead of GPU
    #[arg(long, env = "CPU_ONLY")]
    pub cpu_only: bool,

    /// Reject applications with out-of-set codes or out-of-range numbers
    /// before they reach the model
    #[arg(
        long,
        env = "STRICT_VALIDATION",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub strict_validation: bool,
}

impl From<&Config> for TabularConfig {
    fn from(config: &Config) -> Self {
        Self {
            model_id: config.model_id.clone(),
            model_path: config.model_path.clone(),
            revision: config.model_revision.clone(),
            cpu: config.cpu_only,
        }
    }
}

impl Config {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
