//! Error taxonomy shared by every service operation.
//!
//! Services never panic or throw across their boundary: each operation
//! returns `Result<T, ServiceError>`, and the REST layer turns the error into
//! a status code plus a failure envelope.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Upload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// A validation failure carrying a single message
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::NotFound { .. } => true,
            ServiceError::Http { status, .. } => *status == 404,
            _ => false,
        }
    }

    /// Transport failures and server-side 5xx responses may succeed if retried
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Network(_) => true,
            ServiceError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Field-level messages for the envelope's `errors` list
    pub fn field_errors(&self) -> Vec<String> {
        match self {
            ServiceError::Validation(messages) => messages.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<csv::Error> for ServiceError {
    fn from(error: csv::Error) -> Self {
        ServiceError::Storage(format!("CSV export failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_uses_label() {
        let error = ServiceError::not_found("Group", "group_1");
        assert_eq!(error.to_string(), "Group not found");
        assert!(error.is_not_found());
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_validation_lists_every_message() {
        let error = ServiceError::Validation(vec![
            "Name is required".to_string(),
            "Category is required".to_string(),
        ]);
        assert_eq!(
            error.to_string(),
            "Validation failed: Name is required; Category is required"
        );
        assert_eq!(error.field_errors().len(), 2);
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ServiceError::Network("connection refused".into()).is_retryable());
        assert!(ServiceError::Http { status: 503, message: "down".into() }.is_retryable());
        assert!(!ServiceError::Http { status: 400, message: "bad".into() }.is_retryable());
        assert!(!ServiceError::validation("bad").is_retryable());
    }
}
