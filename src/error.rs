use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Service {service} returned {status}")]
    BackendStatus {
        service: String,
        status: StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task submission failed with {status}")]
    TaskSubmission { status: StatusCode, body: String },

    #[error("Timed out after {elapsed_ms}ms waiting for backends")]
    Timeout { elapsed_ms: u64 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn backend_status(
        service: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        GatewayError::BackendStatus {
            service: service.into(),
            status,
            body: body.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        GatewayError::Config(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        GatewayError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        GatewayError::Internal(msg.into())
    }

    /// A backend that answers 404 for its installed plugins endpoint simply
    /// does not expose one. Every other failure is a real error.
    pub fn is_capability_absent(&self) -> bool {
        match self {
            GatewayError::BackendStatus { status, .. } => *status == StatusCode::NOT_FOUND,
            GatewayError::Network(err) => err.status() == Some(StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
