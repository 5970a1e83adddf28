use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Search request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed score list '{input}' at element {position}: {reason}")]
    ScoreListParseError {
        input: String,
        position: usize,
        reason: String,
    },

    #[error("Search index '{index}' returned HTTP {status}: {message}")]
    SearchIndexError {
        index: String,
        status: u16,
        message: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScoreError::ApiError(_) | ScoreError::SearchIndexError { .. } => ErrorCategory::Network,
            ScoreError::CsvError(_) | ScoreError::IoError(_) => ErrorCategory::Storage,
            ScoreError::UrlError(_)
            | ScoreError::ConfigError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ScoreError::SerializationError(_)
            | ScoreError::ScoreListParseError { .. }
            | ScoreError::ValidationError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重試
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScoreError::ApiError(_) => "Check that the search endpoint is reachable",
            ScoreError::SearchIndexError { .. } => {
                "Inspect the search server logs or recreate the index"
            }
            ScoreError::CsvError(_) | ScoreError::ScoreListParseError { .. } => {
                "Delete the cached CSV file or rerun with --refresh"
            }
            ScoreError::IoError(_) => "Check that the output directory exists and is writable",
            ScoreError::SerializationError(_) => "Check the format of the stored data",
            ScoreError::UrlError(_) => "Use an http:// or https:// search endpoint",
            ScoreError::ConfigError { .. }
            | ScoreError::ConfigValidationError { .. }
            | ScoreError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            ScoreError::ValidationError { .. } => "Check the input scores",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not talk to the search index: {}", self),
            ErrorCategory::Storage => format!("Could not read or write score files: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Invalid score data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
