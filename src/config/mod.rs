pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "learnpath")]
#[command(about = "Generate a personalized learning roadmap from a resume and a career goal")]
pub struct CliArgs {
    /// Resume to analyze (PDF)
    #[arg(short, long)]
    pub resume: String,

    /// Career goal, e.g. "Become a GenAI Engineer in 6 months"
    #[arg(short, long)]
    pub goal: String,

    /// Path to TOML configuration file (defaults to the built-in configuration)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for the generated roadmap file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the generation model from config
    #[arg(long)]
    pub model: Option<String>,

    /// Skip the prompt-compression service
    #[arg(long)]
    pub no_compress: bool,

    /// Extract and compose the prompt without calling any remote service
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliArgs {
    /// Loads the config file (or the built-in one) and applies command-line overrides.
    pub fn load_config(&self) -> crate::utils::error::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::embedded()?,
        };

        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(model) = &self.model {
            config.generation.model = model.clone();
        }
        if self.no_compress {
            config.compression.enabled = false;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_apply() {
        let args = CliArgs::parse_from([
            "learnpath",
            "--resume",
            "cv.pdf",
            "--goal",
            "Become a cloud engineer",
            "--output",
            "/tmp/roadmaps",
            "--model",
            "gemini-2.5-pro",
            "--no-compress",
        ]);

        let config = args.load_config().unwrap();
        assert_eq!(config.output.path, "/tmp/roadmaps");
        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert!(!config.compression.enabled);
    }

    #[test]
    fn test_resume_and_goal_are_required() {
        assert!(CliArgs::try_parse_from(["learnpath", "--goal", "x"]).is_err());
        assert!(CliArgs::try_parse_from(["learnpath", "--resume", "cv.pdf"]).is_err());
    }
}
