use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid credentials: Okta rejected the API token (HTTP {status})")]
    AuthError { status: u16 },

    #[error("Okta API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Group not found: {query}")]
    GroupNotFound { query: String },

    #[error("Invalid group choice: {input}")]
    InvalidChoice { input: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl ExportError {
    /// Exit code reported to the shell. Config/validation problems get their
    /// own code so wrappers can tell user error from provider failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::ConfigError { .. } | ExportError::ValidationError { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
