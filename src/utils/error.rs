use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceListError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Network,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceListError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PriceListError::IoError(_) | PriceListError::ZipError(_) => ErrorCategory::Io,
            PriceListError::SerializationError(_) => ErrorCategory::Data,
            PriceListError::HttpError(_) => ErrorCategory::Network,
            PriceListError::ConfigError { .. }
            | PriceListError::ConfigValidationError { .. }
            | PriceListError::InvalidConfigValueError { .. }
            | PriceListError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PriceListError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PriceListError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file exists and the path is relative to the working directory".to_string()
            }
            PriceListError::IoError(_) => {
                "Check file permissions and available disk space for the output path".to_string()
            }
            PriceListError::SerializationError(_) => {
                "The saved document is not valid JSON; delete it or re-export it".to_string()
            }
            PriceListError::ZipError(_) => {
                "Run without --bundle or choose another output path".to_string()
            }
            PriceListError::HttpError(_) => {
                "Check network connectivity and the notification endpoint, then retry".to_string()
            }
            PriceListError::ConfigError { .. } | PriceListError::ConfigValidationError { .. } => {
                "Review the TOML configuration file for syntax errors".to_string()
            }
            PriceListError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            PriceListError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration or pass it on the command line", field)
            }
            PriceListError::ValidationError { .. } => {
                "Fill in the customer name and add at least one item".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PriceListError::IoError(e) => format!("Could not read or write a file: {}", e),
            PriceListError::SerializationError(_) => "A saved document could not be read".to_string(),
            PriceListError::ZipError(_) => "The export bundle could not be created".to_string(),
            PriceListError::HttpError(_) => "The notification service could not be reached".to_string(),
            PriceListError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceListError>;
