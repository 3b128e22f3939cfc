// Profile backend seam
//
// The controller only talks to this trait. Production uses `HttpProfileService`; tests use
// in-memory stubs that count calls.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::requests::ConnectPayload;
use crate::models::responses::{ApiResponse, ConnectResponse, ProfileRecord};

/// Failure to get a usable reply from the backend.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply; `message` is the body's `message` field when it had one.
    #[error("server returned HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Server-supplied message carried by the error, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }
}

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Look up the public profile behind a shared link.
    async fn fetch_profile(&self, view_id: &str)
        -> Result<ApiResponse<ProfileRecord>, ServiceError>;

    /// Count one view. Fire-and-forget: the reply body is not used.
    async fn increment_views(&self, profile_id: &str) -> Result<(), ServiceError>;

    /// Share the visitor's contact details with the profile owner.
    async fn connect(&self, payload: &ConnectPayload) -> Result<ConnectResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_exposes_server_message() {
        let err = ServiceError::Status {
            status: 409,
            message: Some("Already connected".to_string()),
        };
        assert_eq!(err.server_message(), Some("Already connected"));
        assert_eq!(err.to_string(), "server returned HTTP 409");
    }

    #[test]
    fn decode_error_has_no_server_message() {
        let err = ServiceError::Decode("expected value".to_string());
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn blank_server_message_is_ignored() {
        let err = ServiceError::Status {
            status: 500,
            message: Some(String::new()),
        };
        assert_eq!(err.server_message(), None);
    }
}
