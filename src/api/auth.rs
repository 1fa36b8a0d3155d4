use std::sync::Arc;

use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::auth::AuthError;
use crate::services::AuthService;
use crate::types::dto::auth::{LoginData, LoginRequest, SocialLoginRequest};
use crate::types::dto::common::Envelope;

/// Authentication API endpoints
pub struct AuthApi {
    auth_service: Arc<AuthService>,
}

impl AuthApi {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }
}

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with email and password
    ///
    /// Users and clinics share this endpoint; the response flags clinic
    /// principals with `is_admin`.
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<Envelope<LoginData>>, AuthError> {
        let outcome = self
            .auth_service
            .login_with_credentials(&body.email, &body.password)
            .await?;

        Ok(Json(Envelope::ok(
            LoginData {
                user: (&outcome.principal).into(),
                access_token: outcome.access_token,
            },
            "Login successful",
        )))
    }

    /// Login with a verified social profile
    ///
    /// The upstream middleware has already verified the profile with the
    /// identity provider; a first-time email creates a user account.
    #[oai(
        path = "/login/social",
        method = "post",
        tag = "AuthTags::Authentication"
    )]
    async fn login_social(
        &self,
        body: Json<SocialLoginRequest>,
    ) -> Result<Json<Envelope<LoginData>>, AuthError> {
        let outcome = self.auth_service.login_with_federated_profile(body.0).await?;

        Ok(Json(Envelope::ok(
            LoginData {
                user: (&outcome.principal).into(),
                access_token: outcome.access_token,
            },
            "Login successful",
        )))
    }
}
