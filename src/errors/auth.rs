use poem_openapi::{payload::Json, ApiResponse};

use crate::errors::{ErrorBody, StoreError};

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// No principal matches the supplied email
    #[oai(status = 400)]
    InvalidCredentials(Json<ErrorBody>),

    /// Principal exists but the password does not match
    #[oai(status = 400)]
    WrongPassword(Json<ErrorBody>),

    /// Invalid or malformed bearer token
    #[oai(status = 401)]
    InvalidToken(Json<ErrorBody>),

    /// Bearer token has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorBody>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorBody::new(
            "invalid_credentials",
            "Invalid credentials",
            400,
        )))
    }

    pub fn wrong_password() -> Self {
        AuthError::WrongPassword(Json(ErrorBody::new(
            "wrong_password",
            "Wrong password",
            400,
        )))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorBody::new(
            "invalid_token",
            "Invalid or malformed token",
            401,
        )))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorBody::new(
            "expired_token",
            "Token has expired",
            401,
        )))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        AuthError::InternalError(Json(ErrorBody::new("internal_error", message, 500)))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::internal_error(err.to_string())
    }
}
