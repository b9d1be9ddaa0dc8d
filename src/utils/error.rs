use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Form submission request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Response decoding failed: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Response,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::HttpError(_) => ErrorCategory::Network,
            FormError::DecodeError(_) => ErrorCategory::Response,
            FormError::IoError(_) => ErrorCategory::System,
            FormError::TomlError(_)
            | FormError::MissingConfigError { .. }
            | FormError::InvalidConfigValueError { .. }
            | FormError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Response => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::HttpError(e) if e.is_connect() => {
                "Could not reach the forms endpoint".to_string()
            }
            FormError::HttpError(_) => "The form could not be sent".to_string(),
            FormError::DecodeError(_) => "The forms endpoint returned an unreadable reply".to_string(),
            FormError::IoError(e) => format!("File access failed: {}", e),
            FormError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            FormError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            FormError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            FormError::ConfigError { message } => message.clone(),
        }
    }

    /// Message of the underlying error, without this type's own prefix.
    pub fn detail(&self) -> String {
        match self {
            FormError::HttpError(e) => e.to_string(),
            FormError::DecodeError(e) => e.to_string(),
            FormError::IoError(e) => e.to_string(),
            FormError::TomlError(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the endpoint URL, then submit again",
            ErrorCategory::Response => "Verify that the endpoint is a Web3Forms-compatible JSON API",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
