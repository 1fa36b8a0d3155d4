use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::{ErrorBody, StoreError};

/// Booking lifecycle error types
#[derive(ApiResponse, Debug)]
pub enum BookingError {
    /// Booking target clinic does not resolve
    #[oai(status = 400)]
    ClinicNotFound(Json<ErrorBody>),

    /// No booking matches the id in the required current state
    #[oai(status = 404)]
    BookingNotFound(Json<ErrorBody>),

    /// Missing, malformed or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl BookingError {
    pub fn clinic_not_found() -> Self {
        BookingError::ClinicNotFound(Json(ErrorBody::new(
            "clinic_not_found",
            "Clinic not found",
            400,
        )))
    }

    pub fn booking_not_found() -> Self {
        BookingError::BookingNotFound(Json(ErrorBody::new(
            "booking_not_found",
            "Booking request not found",
            404,
        )))
    }

    pub fn unauthorized() -> Self {
        BookingError::Unauthorized(Json(ErrorBody::new(
            "unauthorized",
            "Valid bearer token required",
            401,
        )))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        BookingError::InternalError(Json(ErrorBody::new("internal_error", message, 500)))
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        BookingError::internal_error(err.to_string())
    }
}
