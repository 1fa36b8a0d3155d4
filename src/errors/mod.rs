// Errors layer - Error type definitions
pub mod auth;
pub mod booking;
pub mod clinic;
pub mod internal;
pub mod review;
pub mod user;

pub use auth::AuthError;
pub use booking::BookingError;
pub use clinic::ClinicError;
pub use internal::StoreError;
pub use review::ReviewError;
pub use user::UserError;

use poem_openapi::Object;

/// Standardized error payload carried by every API error response
#[derive(Object, Debug)]
pub struct ErrorBody {
    /// Error category label
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

impl ErrorBody {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
        }
    }
}
