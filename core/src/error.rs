//! Error types for the todo API client.
//!
//! # Design
//! Two layers. `ApiError` is what `TodoClient::parse_*` and transports
//! produce: raw status codes and bodies. `SyncError` is what the
//! `Synchronizer` records as user-facing state; it is built from an
//! `ApiError` plus the operation that failed, so every message is readable
//! without the HTTP details.

use std::fmt;

use crate::http::TransportError;
use crate::types::TodoId;

/// Errors returned by `TodoClient` parse methods and transports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// No response was obtained.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        ApiError::Transport(value.message().to_string())
    }
}

/// Synchronizer operation, used to pick fallback error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Toggle,
    Delete,
}

impl Operation {
    /// Message shown when the server gives no usable reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Failed to load todos",
            Operation::Add => "Failed to add todo",
            Operation::Toggle => "Failed to update todo",
            Operation::Delete => "Failed to delete todo",
        }
    }
}

/// Last error recorded by the `Synchronizer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The remote store has no todo with this id.
    NotFound { id: TodoId },

    /// The remote store rejected the call with a non-404 error status.
    Remote(String),

    /// The store was unreachable or answered with something unreadable.
    Transport(String),
}

impl SyncError {
    /// Translates a request-layer failure. `target` is the id the operation
    /// addressed; only id-addressed calls produce [`SyncError::NotFound`].
    pub fn from_api(err: ApiError, op: Operation, target: Option<TodoId>) -> Self {
        match (err, target) {
            (ApiError::NotFound, Some(id)) => SyncError::NotFound { id },
            (ApiError::NotFound, None) => SyncError::Remote(op.failure_message().to_string()),
            (ApiError::HttpError { body, .. }, _) => {
                SyncError::Remote(error_field(&body).unwrap_or_else(|| op.failure_message().to_string()))
            }
            (
                ApiError::DeserializationError(msg) | ApiError::SerializationError(msg) | ApiError::Transport(msg),
                _,
            ) => SyncError::Transport(format!("{}: {msg}", op.failure_message())),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NotFound { id } => write!(f, "Todo with id {id} not found"),
            SyncError::Remote(msg) | SyncError::Transport(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for SyncError {}

/// Pulls a non-empty `"error"` string out of a JSON error body.
fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("error")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}
