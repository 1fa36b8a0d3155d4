use poem_openapi::types::{ParseFromJSON, ToJSON};
use poem_openapi::Object;

/// Uniform response envelope wrapping every successful payload
#[derive(Object, Debug)]
pub struct Envelope<T: ParseFromJSON + ToJSON> {
    /// Whether the request succeeded
    pub success: bool,

    /// Payload, absent for message-only responses
    pub data: Option<T>,

    /// Error description, absent on success
    pub errors: Option<String>,

    /// Human-readable status message
    pub message: String,
}

impl<T: ParseFromJSON + ToJSON> Envelope<T> {
    /// Successful response carrying a payload
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            errors: None,
            message: message.into(),
        }
    }

    /// Successful response with a message but no payload
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            errors: None,
            message: message.into(),
        }
    }
}

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}
