//! Error types for the navigation client.
//!
//! [`ApiError`] is what the remote gateway produces. [`NavError`] is what the
//! navigation controller hands back to the UI layer; it wraps gateway failures
//! together with the locally detected precondition and reorder errors.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// A failed call to the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// A successful response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The backend rejected the request with a single message.
    #[error("backend error ({status}): {message}")]
    Message { status: u16, message: String },

    /// The backend rejected the request with field-level errors.
    #[error("validation failed ({status}): {}", render_fields(.fields))]
    Validation {
        status: u16,
        fields: BTreeMap<String, Vec<String>>,
    },
}

fn render_fields(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Builds an error from a non-2xx response body.
    ///
    /// The backend answers either `{"message": ".."}` / `{"detail": ".."}` or an
    /// object mapping field names to lists of messages. Anything else is kept
    /// verbatim as the message.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();

        let Some(Value::Object(map)) = parsed else {
            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            };
            return Self::Message { status, message };
        };

        for key in ["message", "detail", "error"] {
            if let Some(Value::String(message)) = map.get(key) {
                return Self::Message {
                    status,
                    message: message.clone(),
                };
            }
        }

        let mut fields = BTreeMap::new();
        for (field, value) in &map {
            let messages = match value {
                Value::String(s) => vec![s.clone()],
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
                other => vec![other.to_string()],
            };
            fields.insert(field.clone(), messages);
        }

        if fields.is_empty() {
            return Self::Message {
                status,
                message: format!("HTTP {}", status),
            };
        }

        Self::Validation { status, fields }
    }

    /// HTTP status of the failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Message { status, .. } | Self::Validation { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

/// An operation was attempted without the selections it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("cannot open {requested} while browsing {current}")]
    WrongLevel {
        requested: &'static str,
        current: &'static str,
    },

    #[error("no {0} is selected")]
    MissingSelection(&'static str),

    #[error("only chapters and topics can be reordered, current listing is {0}")]
    NotReorderable(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors surfaced by the navigation controller.
#[derive(Debug, Clone, Error)]
pub enum NavError {
    #[error(transparent)]
    Gateway(#[from] ApiError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error("invalid update: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl NavError {
    /// A short message suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Gateway(ApiError::Transport(_)) => {
                "Could not reach the server. Please check your connection."
            }
            Self::Gateway(ApiError::Validation { .. }) => "The server rejected the change.",
            Self::Gateway(_) => "The server could not complete the request.",
            Self::Precondition(_) => "Please pick a parent item first.",
            Self::Reorder(_) => "That move is not possible.",
            Self::Validation(_) => "Some values are invalid.",
        }
    }

    /// Whether re-invoking the same operation might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Gateway(ApiError::Transport(_)) => true,
            Self::Gateway(err) => err.status().is_some_and(|s| s >= 500),
            Self::Precondition(_) | Self::Reorder(_) | Self::Validation(_) => false,
        }
    }
}
