use thiserror::Error;

#[derive(Error, Debug)]
pub enum LunchError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid date '{value}', expected yyyy-MM-dd: {source}")]
    DateParseError {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid date '{value}', expected zero-padded yyyy-MM-dd")]
    InvalidDate { value: String },

    #[error("Malformed row {line} in {file}: {reason}")]
    MalformedRow {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Resource not found: {name}")]
    ResourceNotFound { name: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("No {what} at position {index} (have {len})")]
    InvalidSelection {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("The schedule is empty")]
    EmptySchedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Parse,
    ResourceNotFound,
    Config,
    Request,
}

impl LunchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LunchError::CsvError(e) if e.is_io_error() => ErrorCategory::Io,
            LunchError::CsvError(_) => ErrorCategory::Parse,
            LunchError::IoError(_) | LunchError::FileAccess { .. } => ErrorCategory::Io,
            LunchError::DateParseError { .. }
            | LunchError::InvalidDate { .. }
            | LunchError::MalformedRow { .. } => ErrorCategory::Parse,
            LunchError::ResourceNotFound { .. } => ErrorCategory::ResourceNotFound,
            LunchError::ConfigError { .. }
            | LunchError::ConfigValidationError { .. }
            | LunchError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            LunchError::ValidationError { .. }
            | LunchError::InvalidSelection { .. }
            | LunchError::EmptySchedule => ErrorCategory::Request,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Request => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::Parse => 4,
            ErrorCategory::ResourceNotFound => 5,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Cannot load or save lunch data: {}", self),
            ErrorCategory::Parse => format!("Lunch data is corrupted: {}", self),
            ErrorCategory::ResourceNotFound => {
                format!("{}. Check the data directory setting.", self)
            }
            ErrorCategory::Config => format!("Bad configuration: {}", self),
            ErrorCategory::Request => self.to_string(),
        }
    }

    pub(crate) fn file_access(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        LunchError::FileAccess {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LunchError>;
