use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeederError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Login response did not contain a token")]
    MissingToken,

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

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{operation} is not supported for {target}")]
    Unsupported { target: String, operation: String },

    #[error("External services are disabled")]
    ServicesUnavailable,
}

/// Failure classes reported on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connectivity,
    Remote,
    MalformedResponse,
    Input,
    Configuration,
}

impl SeederError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeederError::HttpError(e) if e.is_decode() => ErrorCategory::MalformedResponse,
            SeederError::DatabaseError(e) => database_category(e),
            SeederError::HttpError(_)
            | SeederError::IoError(_)
            | SeederError::ServicesUnavailable => ErrorCategory::Connectivity,
            SeederError::UnexpectedStatus { .. } => ErrorCategory::Remote,
            SeederError::MissingToken | SeederError::SerializationError(_) => {
                ErrorCategory::MalformedResponse
            }
            SeederError::InvalidInput { .. }
            | SeederError::CsvError(_)
            | SeederError::Unsupported { .. } => ErrorCategory::Input,
            SeederError::ConfigError { .. }
            | SeederError::ConfigValidationError { .. }
            | SeederError::InvalidConfigValueError { .. }
            | SeederError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Connectivity => format!("Could not reach the target: {}", self),
            ErrorCategory::Remote => format!("The service rejected the request: {}", self),
            ErrorCategory::MalformedResponse => {
                format!("The service returned an unexpected response: {}", self)
            }
            ErrorCategory::Input => format!("Invalid input: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Connectivity => {
                "Start the database/service containers or check the connection settings"
            }
            ErrorCategory::Remote => "Check the service logs; the record may already exist",
            ErrorCategory::MalformedResponse => "Check that the service version matches this tool",
            ErrorCategory::Input => "Correct the input and try again",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }
}

/// Server-side rejections (constraint violations, bad SQL) are remote
/// failures; transport and pool failures are connectivity failures.
fn database_category(error: &sqlx::Error) -> ErrorCategory {
    match error {
        sqlx::Error::Database(_) => ErrorCategory::Remote,
        sqlx::Error::Configuration(_) => ErrorCategory::Configuration,
        sqlx::Error::RowNotFound
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => ErrorCategory::MalformedResponse,
        _ => ErrorCategory::Connectivity,
    }
}

pub type Result<T> = std::result::Result<T, SeederError>;
