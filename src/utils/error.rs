use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Document parse error: {message}")]
    DocumentParseError { message: String },

    #[error("Gemini API Error: {message}")]
    GenerationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Document,
    Network,
    Generation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ConfigError { .. }
            | AppError::MissingConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AppError::ValidationError { .. } => ErrorCategory::Input,
            AppError::DocumentParseError { .. } => ErrorCategory::Document,
            AppError::ApiError(_) => ErrorCategory::Network,
            AppError::GenerationError { .. } => ErrorCategory::Generation,
            AppError::IoError(_) | AppError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Document => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Message printed to the terminal; avoids leaking internal detail for system errors.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            AppError::DocumentParseError { message } => {
                format!("Could not read the resume as a PDF: {}", message)
            }
            AppError::GenerationError { .. } => self.to_string(),
            AppError::IoError(e) => format!("File system error: {}", e),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AppError::MissingConfigError { field } if field.ends_with("api_key") => format!(
                "Set {} in your config file, or export the environment variable it references",
                field
            ),
            AppError::MissingConfigError { .. }
            | AppError::ConfigError { .. }
            | AppError::InvalidConfigValueError { .. } => {
                "Check the configuration file and command-line flags".to_string()
            }
            AppError::ValidationError { .. } => {
                "Provide both a resume PDF and a non-empty career goal".to_string()
            }
            AppError::DocumentParseError { .. } => {
                "Make sure the file is a valid, unencrypted PDF".to_string()
            }
            AppError::GenerationError { .. } => {
                "Check if your API key is correct and has access to the configured model"
                    .to_string()
            }
            AppError::ApiError(_) => "Check your network connection and try again".to_string(),
            AppError::IoError(_) => "Check file paths and permissions".to_string(),
            AppError::SerializationError(_) => "Report this issue with the input used".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
