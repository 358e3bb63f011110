use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SummarizeError};
use crate::model::GenerationParams;

pub const DEFAULT_MODEL: &str = "facebook/bart-large-xsum";
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";
const DEFAULT_CONFIG_NAME: &str = "para_summarizer";
const ENV_PREFIX: &str = "SUMMARIZER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub model: String,
    pub endpoint: String,
    #[serde(default)]
    pub api_token: Option<String>,
    /// Per-request timeout. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    pub num_beams: u32,
    pub max_length: u32,
    pub early_stopping: bool,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub num_beams: Option<u32>,
    pub max_length: Option<u32>,
    pub early_stopping: Option<bool>,
}

impl Settings {
    /// Layering: defaults, config file, `SUMMARIZER_*` env, CLI overrides.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let defaults = GenerationParams::default();
        let built = Config::builder()
            .set_default("model", DEFAULT_MODEL)?
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("num_beams", i64::from(defaults.num_beams))?
            .set_default("max_length", i64::from(defaults.max_length))?
            .set_default("early_stopping", defaults.early_stopping)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("model", overrides.model.clone())?
            .set_override_option("endpoint", overrides.endpoint.clone())?
            .set_override_option("num_beams", overrides.num_beams.map(i64::from))?
            .set_override_option("max_length", overrides.max_length.map(i64::from))?
            .set_override_option("early_stopping", overrides.early_stopping)?
            .build()?;

        let mut settings: Settings = built.try_deserialize()?;
        if settings.api_token.is_none() {
            settings.api_token = std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty());
        }
        settings.validate()?;
        debug!(model = %settings.model, endpoint = %settings.endpoint, "settings loaded");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(SummarizeError::Config("model id cannot be empty".into()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(SummarizeError::Config(format!(
                "endpoint must start with http:// or https://, got {:?}",
                self.endpoint
            )));
        }
        if self.num_beams == 0 {
            return Err(SummarizeError::Config("num_beams must be at least 1".into()));
        }
        if self.max_length == 0 {
            return Err(SummarizeError::Config("max_length must be at least 1".into()));
        }
        Ok(())
    }

    pub fn generation(&self) -> GenerationParams {
        GenerationParams {
            num_beams: self.num_beams,
            max_length: self.max_length,
            early_stopping: self.early_stopping,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
