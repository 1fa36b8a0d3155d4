use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::{ErrorBody, StoreError};

/// Review endpoint error types
#[derive(ApiResponse, Debug)]
pub enum ReviewError {
    /// Review target clinic does not resolve
    #[oai(status = 404)]
    ClinicNotFound(Json<ErrorBody>),

    /// No review matches the requested id
    #[oai(status = 400)]
    NotFound(Json<ErrorBody>),

    /// Malformed request parameters
    #[oai(status = 400)]
    ValidationError(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl ReviewError {
    pub fn clinic_not_found() -> Self {
        ReviewError::ClinicNotFound(Json(ErrorBody::new(
            "clinic_not_found",
            "Clinic not found",
            404,
        )))
    }

    pub fn not_found() -> Self {
        ReviewError::NotFound(Json(ErrorBody::new("not_found", "Review not found", 400)))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ReviewError::ValidationError(Json(ErrorBody::new("validation_error", message, 400)))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        ReviewError::InternalError(Json(ErrorBody::new("internal_error", message, 500)))
    }
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        ReviewError::internal_error(err.to_string())
    }
}
