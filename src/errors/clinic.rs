use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::{ErrorBody, StoreError};

/// Clinic directory error types
#[derive(ApiResponse, Debug)]
pub enum ClinicError {
    /// No clinic matches the requested id
    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl ClinicError {
    pub fn not_found() -> Self {
        ClinicError::NotFound(Json(ErrorBody::new("not_found", "Clinic not found", 404)))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ClinicError::InternalError(Json(ErrorBody::new("internal_error", message, 500)))
    }
}

impl From<StoreError> for ClinicError {
    fn from(err: StoreError) -> Self {
        ClinicError::internal_error(err.to_string())
    }
}
