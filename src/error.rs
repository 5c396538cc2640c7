use thiserror::Error;

use crate::form::FieldErrors;

/// Failure of a single call against the remote profile API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Authentication rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Auth { status: u16, message: Option<String> },

    #[error("Request rejected ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Validation { status: u16, message: Option<String> },

    #[error("Remote error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Remote { status: u16, message: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx status, keeping the backend's `message` field if it sent one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => ApiError::Auth { status, message },
            400 | 409 | 422 => ApiError::Validation { status, message },
            _ => ApiError::Remote { status, message },
        }
    }

    /// The message the backend put in its error payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Auth { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Remote { message, .. } => message.as_deref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }

    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.to_string()
    }
}

/// Why a form submission did not succeed. This is what a form renders inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("A submission is already in progress")]
    Busy,

    #[error("{}", .0.first_message().unwrap_or("Invalid form"))]
    Validation(FieldErrors),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Remote(String),
}

impl From<FormError> for String {
    fn from(err: FormError) -> Self {
        err.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage write failed: {0}")]
    Write(String),
}

impl From<StorageError> for String {
    fn from(err: StorageError) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::from_status(401, None).is_auth_rejection());
        assert!(ApiError::from_status(403, None).is_auth_rejection());
        assert!(matches!(
            ApiError::from_status(409, None),
            ApiError::Validation { status: 409, .. }
        ));
        assert!(matches!(
            ApiError::from_status(500, None),
            ApiError::Remote { status: 500, .. }
        ));
    }

    #[test]
    fn test_server_message_only_from_responses() {
        let err = ApiError::from_status(400, Some("User already exists".to_string()));
        assert_eq!(err.server_message(), Some("User already exists"));
        assert_eq!(ApiError::Transport("offline".into()).server_message(), None);
        assert_eq!(ApiError::Decode("bad json".into()).server_message(), None);
    }
}
