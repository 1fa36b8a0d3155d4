use std::sync::Arc;

use poem_openapi::param::Query;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::user::UserError;
use crate::services::{credentials, TokenService};
use crate::stores::identity_store::ProfileChanges;
use crate::stores::IdentityStore;
use crate::types::dto::auth::{LoginData, PrincipalDto};
use crate::types::dto::common::Envelope;
use crate::types::dto::user::{EditProfileRequest, RegisterRequest, UserDto, UserListData};
use crate::types::internal::Principal;

const DEFAULT_PAGE_SIZE: u64 = 10;

/// User API endpoints
pub struct UsersApi {
    identity_store: Arc<IdentityStore>,
    token_service: Arc<TokenService>,
}

impl UsersApi {
    pub fn new(identity_store: Arc<IdentityStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            identity_store,
            token_service,
        }
    }

    fn principal_id(&self, auth: &BearerAuth) -> Result<String, UserError> {
        let claims = self
            .token_service
            .validate_token(&auth.0.token)
            .map_err(|_| UserError::unauthorized())?;
        Ok(claims.sub)
    }
}

/// API tags for user endpoints
#[derive(Tags)]
enum UserTags {
    /// User management endpoints
    Users,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// Register a new user account
    #[oai(path = "/", method = "post", tag = "UserTags::Users")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<Envelope<LoginData>>, UserError> {
        let body = body.0;
        let password_hash = credentials::hash_password(&body.password)
            .map_err(|e| UserError::internal_error(format!("Password hashing error: {}", e)))?;

        let user = self
            .identity_store
            .create_user(body.name, body.email, password_hash, body.avatar_url)
            .await?;

        let access_token = self
            .token_service
            .generate_token(&user.id)
            .map_err(|_| UserError::internal_error("Failed to generate token"))?;

        Ok(Json(Envelope::ok(
            LoginData {
                user: (&Principal::User(user)).into(),
                access_token,
            },
            "Create user successful",
        )))
    }

    /// Current principal profile
    ///
    /// Resolves the bearer token's subject against users then clinics and
    /// flags clinic principals with `is_admin`.
    #[oai(path = "/me", method = "get", tag = "UserTags::Users")]
    async fn current(&self, auth: BearerAuth) -> Result<Json<Envelope<PrincipalDto>>, UserError> {
        let principal_id = self.principal_id(&auth)?;

        let principal = self
            .identity_store
            .find_principal_by_id(&principal_id)
            .await?
            .ok_or_else(|| UserError::not_found("User not found"))?;

        Ok(Json(Envelope::ok(
            (&principal).into(),
            "Get current user successful",
        )))
    }

    /// Edit the current user's profile
    #[oai(path = "/me", method = "put", tag = "UserTags::Users")]
    async fn edit_profile(
        &self,
        auth: BearerAuth,
        body: Json<EditProfileRequest>,
    ) -> Result<Json<Envelope<UserDto>>, UserError> {
        let principal_id = self.principal_id(&auth)?;
        let body = body.0;

        let updated = self
            .identity_store
            .edit_profile(
                &principal_id,
                ProfileChanges {
                    name: body.name,
                    gender: body.gender,
                    blood_type: body.blood_type,
                    passport_num: body.passport_num,
                    job: body.job,
                },
            )
            .await?
            .ok_or_else(|| UserError::not_found("Profile not found"))?;

        Ok(Json(Envelope::ok(updated.into(), "Update profile success")))
    }

    /// List users, paginated
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Envelope<UserListData>>, UserError> {
        self.principal_id(&auth)?;

        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let (users, total) = self.identity_store.list_users(page, limit).await?;
        let total_pages = total.div_ceil(limit);

        Ok(Json(Envelope::ok(
            UserListData {
                users: users.into_iter().map(Into::into).collect(),
                total_pages,
            },
            "",
        )))
    }
}
