//! Client error handling.
//!
//! Every failure surfaced by actions, the sanitizer or the cache is a
//! [`ClientError`]. [`ErrorHandler`] turns any of them into one user-facing
//! message and hands it to a [`Notifier`].

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use domain::missing_fields_message;

use crate::navigation::Notifier;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rejected by the sanitizer before sending
    #[error("{0}")]
    Validation(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The fetch was aborted by a cache cancellation
    #[error("Query cancelled")]
    Cancelled,

    #[error("Query disabled")]
    Disabled,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status when the server produced this error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Validation(message) => message.clone(),
            ClientError::MissingFields(fields) => missing_fields_message(fields),
            ClientError::Http(e) if e.is_timeout() => {
                "The server took too long to respond".to_string()
            }
            ClientError::Http(_) => "Could not reach the server".to_string(),
            ClientError::Decode(_) => "Something went wrong".to_string(),
            ClientError::Cancelled | ClientError::Disabled => String::new(),
        }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .next()
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.as_ref())
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| "Validation failed".to_string());
        ClientError::Validation(message)
    }
}

/// Shared failure path of every mutation.
#[derive(Clone)]
pub struct ErrorHandler {
    notifier: Arc<dyn Notifier>,
}

impl ErrorHandler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Log and notify; cancellations stay silent.
    pub fn handle(&self, error: &ClientError) {
        if matches!(error, ClientError::Cancelled | ClientError::Disabled) {
            return;
        }
        warn!("Mutation failed: {}", error);
        self.notifier.error(&error.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_is_passed_through() {
        let err = ClientError::Api {
            status: 409,
            code: "CONFLICT".into(),
            message: "A property with this location already exists".into(),
        };
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.user_message(), "A property with this location already exists");
    }

    #[test]
    fn test_missing_fields_message() {
        let err = ClientError::MissingFields(vec!["name", "email"]);
        assert_eq!(err.user_message(), "Missing required fields: name, email");
    }
}
