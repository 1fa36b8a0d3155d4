use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::{ErrorBody, StoreError};

/// User endpoint error types
#[derive(ApiResponse, Debug)]
pub enum UserError {
    /// Registration email is already taken
    #[oai(status = 400)]
    AlreadyExists(Json<ErrorBody>),

    /// No user or clinic matches the requested id
    #[oai(status = 400)]
    NotFound(Json<ErrorBody>),

    /// Missing, malformed or expired bearer token
    #[oai(status = 401)]
    Unauthorized(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl UserError {
    pub fn already_exists() -> Self {
        UserError::AlreadyExists(Json(ErrorBody::new(
            "already_exists",
            "User already exists",
            400,
        )))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        UserError::NotFound(Json(ErrorBody::new("not_found", message, 400)))
    }

    pub fn unauthorized() -> Self {
        UserError::Unauthorized(Json(ErrorBody::new(
            "unauthorized",
            "Valid bearer token required",
            401,
        )))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        UserError::InternalError(Json(ErrorBody::new("internal_error", message, 500)))
    }
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => UserError::already_exists(),
            other => UserError::internal_error(other.to_string()),
        }
    }
}
