use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Classification service returned status {status}: {message}")]
    ServiceError { status: u16, message: String },

    #[error("Malformed classification response: {message}")]
    MalformedResponse { message: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Missing columns in {source_name}: {}", missing.join(", "))]
    SchemaError {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("Row {index} is out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Service,
    Data,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClassifyError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::ServiceError { .. } | Self::MalformedResponse { .. } => ErrorCategory::Service,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::SchemaError { .. }
            | Self::RowOutOfRange { .. } => ErrorCategory::Data,
            Self::IoError(_) | Self::InputNotFound { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Recovered per row by the classifier fallback.
            ErrorCategory::Network | ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "Check the input path and try again",
            Self::SchemaError { .. } => {
                "Pass the matching --*-column flags or fix the [columns] table in the config file"
            }
            Self::MissingConfigError { .. } => {
                "Set the value on the command line, in the config file, or via OPENAI_API_KEY"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => "Review the configuration values and rerun",
            Self::ApiError(_) => "Check network connectivity and the API endpoint",
            Self::ServiceError { status: 401, .. } | Self::ServiceError { status: 403, .. } => {
                "Check the API key"
            }
            Self::ServiceError { status: 429, .. } => "Increase --delay-ms to slow down requests",
            Self::ServiceError { .. } | Self::MalformedResponse { .. } => {
                "Rerun later; the row will be classified again on resume"
            }
            Self::CsvError(_) | Self::SerializationError(_) | Self::RowOutOfRange { .. } => {
                "Check that the input file is a well-formed CSV with a header row"
            }
            Self::IoError(_) => {
                "Check disk space and permissions, then rerun to resume from the checkpoint"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputNotFound { path } => format!("File not found at path: {}", path),
            Self::SchemaError {
                source_name,
                missing,
            } => format!(
                "{} does not contain the expected columns: {}",
                source_name,
                missing.join(", ")
            ),
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
