//! Error types for the skillpath client library.

use std::path::PathBuf;

use thiserror::Error;

/// Fallback shown when a failed request carries no readable message.
const DEFAULT_FAILURE: &str = "Request failed";

/// Comprehensive error type for all client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local validation failure, raised before any network call
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The request never produced a response (DNS, refused, timeout)
    #[error("Network error: {message}")]
    Network { message: String },
    /// The backend answered with a non-2xx status
    #[error("Server returned status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },
    /// The response body did not have the expected shape
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },
    /// Plan not found for the given ID
    #[error("Learning plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// No user record in the local store
    #[error("Not logged in")]
    NotLoggedIn,
    /// The owning scope was cancelled before the operation finished
    #[error("Operation cancelled")]
    Cancelled,
    /// Local store errors
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ClientError {
        ClientError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating store errors with context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ClientError {
        ClientError::Store {
            message: self.message,
            source,
        }
    }
}

impl ClientError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Maps a transport-level reqwest failure.
    pub fn network(source: &reqwest::Error) -> Self {
        Self::Network {
            message: source.to_string(),
        }
    }

    /// Returns true for failures that happened before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Human-readable text suitable for an inline banner.
    pub fn user_message(&self) -> String {
        self.user_message_or(DEFAULT_FAILURE)
    }

    /// Human-readable text, using `fallback` when a server error carries no
    /// message of its own.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::InvalidInput { reason, .. } => reason.clone(),
            Self::Network { .. } => {
                "No response from server. Please check your network connection.".to_string()
            }
            Self::Status { status, message } => format!(
                "Server error ({status}): {}",
                message.as_deref().unwrap_or(fallback)
            ),
            Self::MalformedResponse { .. } => "Error: Invalid response format".to_string(),
            Self::PlanNotFound { id } => format!("Learning plan {id} no longer exists."),
            Self::NotLoggedIn => "Please log in first.".to_string(),
            Self::Cancelled => "The operation was cancelled.".to_string(),
            other => format!("Error: {other}"),
        }
    }
}

/// Specialized extension trait for store-related Results.
pub trait StoreResultExt<T> {
    /// Map store errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ClientError::store(message).with_source(e))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
