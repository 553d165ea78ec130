use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to parse {source_name}: {message}")]
    ConfigParse { source_name: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Operation aborted: {message}")]
    Aborted { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LinkError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LinkError::Http(_) => ErrorCategory::Network,
            LinkError::Io(_) => ErrorCategory::Storage,
            LinkError::Serialization(_) | LinkError::Catalog { .. } => ErrorCategory::Data,
            LinkError::ConfigParse { .. }
            | LinkError::Config { .. }
            | LinkError::InvalidConfigValue { .. }
            | LinkError::MissingConfig { .. } => ErrorCategory::Configuration,
            LinkError::Aborted { .. } => ErrorCategory::Operator,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LinkError::Aborted { .. } => ErrorSeverity::Low,
            LinkError::Http(_) => ErrorSeverity::Medium,
            LinkError::ConfigParse { .. }
            | LinkError::Config { .. }
            | LinkError::InvalidConfigValue { .. }
            | LinkError::MissingConfig { .. } => ErrorSeverity::High,
            LinkError::Io(_) | LinkError::Serialization(_) | LinkError::Catalog { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Storage => "Make sure the catalog file exists and is writable",
            ErrorCategory::Data => {
                "Fix the catalog JSON (every entry needs id, title, description, url, emotion, type)"
            }
            ErrorCategory::Configuration => "Review the TOML files and command line flags",
            ErrorCategory::Operator => "Nothing was written; rerun when ready",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LinkError::Io(e) => format!("Could not access the catalog file: {}", e),
            LinkError::Serialization(e) => format!("The catalog is not valid JSON: {}", e),
            LinkError::Aborted { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
