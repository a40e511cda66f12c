use crate::domain::catalog::Catalog;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AppError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Built-in configuration; secrets come from `SCALEDOWN_API_KEY` and `GEMINI_API_KEY`.
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

pub const DEFAULT_INSTRUCTION: &str = "Analyze the resume and goal. Create a 6-month roadmap using ONLY the provided courses. Include a skill gap analysis, weekly schedule, and projects.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub compression: CompressionConfig,
    pub generation: GenerationConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    pub rate: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub endpoint: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_seconds: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_delay_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    pub instruction: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            instruction: DEFAULT_INSTRUCTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file replacing the embedded course list.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is
    /// so validation can name the missing setting.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        self.validate_settings()?;
        self.validate_secrets()
    }

    /// Everything except the API keys, for runs that never call a remote service.
    pub fn validate_settings(&self) -> Result<()> {
        validation::validate_url("generation.endpoint", &self.generation.endpoint)?;
        validation::validate_non_empty_string("generation.model", &self.generation.model)?;
        validation::validate_positive_number(
            "generation.timeout_seconds",
            self.generation.timeout_seconds.unwrap_or(120),
            1,
        )?;
        validation::validate_range("generation.retry_attempts", self.retry_attempts(), 0, 3)?;

        if self.compression.enabled {
            validation::validate_url("compression.endpoint", &self.compression.endpoint)?;
            validation::validate_positive_number(
                "compression.timeout_seconds",
                self.compression.timeout_seconds.unwrap_or(10),
                1,
            )?;
        }

        validation::validate_non_empty_string("prompt.instruction", &self.prompt.instruction)?;
        validation::validate_path("output.path", &self.output.path)?;
        if let Some(path) = &self.catalog.path {
            validation::validate_path("catalog.path", path)?;
        }

        Ok(())
    }

    fn validate_secrets(&self) -> Result<()> {
        validation::validate_secret("generation.api_key", &self.generation.api_key)?;
        if self.compression.enabled {
            validation::validate_secret("compression.api_key", &self.compression.api_key)?;
        }
        Ok(())
    }

    pub fn compression_timeout(&self) -> Duration {
        Duration::from_secs(self.compression.timeout_seconds.unwrap_or(10))
    }

    pub fn compression_rate(&self) -> &str {
        self.compression.rate.as_deref().unwrap_or("auto")
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation.timeout_seconds.unwrap_or(120))
    }

    pub fn retry_attempts(&self) -> u32 {
        self.generation.retry_attempts.unwrap_or(1)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.generation.retry_delay_seconds.unwrap_or(2))
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::from_file(path),
            None => Catalog::embedded(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn system_instruction(&self) -> &str {
        &self.prompt.instruction
    }

    fn compression_enabled(&self) -> bool {
        self.compression.enabled
    }

    fn model(&self) -> &str {
        &self.generation.model
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
