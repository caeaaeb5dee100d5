use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("Database schema error: {message}")]
    SchemaError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Course not found: {number}")]
    CourseNotFound { number: String },

    #[error("No course data has been loaded")]
    NotLoaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Storage,
    Configuration,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::IoError(_) => ErrorCategory::Io,
            PlannerError::CsvError(_) | PlannerError::SerializationError(_) => ErrorCategory::Data,
            PlannerError::SqliteError(_) | PlannerError::SchemaError { .. } => {
                ErrorCategory::Storage
            }
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlannerError::CourseNotFound { .. } | PlannerError::NotLoaded => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlannerError::CourseNotFound { .. } | PlannerError::NotLoaded => ErrorSeverity::Low,
            PlannerError::IoError(_) | PlannerError::CsvError(_) => ErrorSeverity::Medium,
            PlannerError::SerializationError(_)
            | PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorSeverity::High,
            PlannerError::SqliteError(_) | PlannerError::SchemaError { .. } => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::IoError(_) => "Check that the file exists and is readable",
            PlannerError::CsvError(_) => {
                "Check that the file is a comma-separated list of number,title[,prerequisite]* lines"
            }
            PlannerError::SqliteError(_) | PlannerError::SchemaError { .. } => {
                "Check the database path, or delete the database file to recreate it"
            }
            PlannerError::SerializationError(_) => "Try the text output format instead",
            PlannerError::ConfigError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
            PlannerError::CourseNotFound { .. } => {
                "Use option 2 to see the available course numbers"
            }
            PlannerError::NotLoaded => "Load data first using option 1",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::IoError(_) => "File not found or could not be opened".to_string(),
            PlannerError::CourseNotFound { .. } => "Course not found".to_string(),
            PlannerError::NotLoaded => "Please load data first using option 1.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
