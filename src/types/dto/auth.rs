use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::internal::Principal;

/// Request model for credential login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email (users and clinics share the login surface)
    pub email: String,

    /// Password for authentication
    pub password: String,
}

/// Trusted profile forwarded by the social-login middleware.
///
/// The identity provider has already verified this profile; no password
/// check happens on this path.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct SocialLoginRequest {
    /// Display name from the provider
    pub name: String,

    /// Email from the provider
    pub email: String,

    /// Avatar URL from the provider
    pub avatar_url: Option<String>,
}

/// Credential-stripped view of an authenticated principal
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PrincipalDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,

    /// Clinic address, absent for user principals
    pub address: Option<String>,

    /// True exactly for clinic principals
    pub is_admin: bool,
}

impl From<&Principal> for PrincipalDto {
    fn from(principal: &Principal) -> Self {
        match principal {
            Principal::User(u) => PrincipalDto {
                id: u.id.clone(),
                name: u.name.clone(),
                email: u.email.clone(),
                avatar_url: u.avatar_url.clone(),
                address: None,
                is_admin: false,
            },
            Principal::Clinic(c) => PrincipalDto {
                id: c.id.clone(),
                name: c.name.clone(),
                email: c.email.clone(),
                avatar_url: None,
                address: Some(c.address.clone()),
                is_admin: true,
            },
        }
    }
}

/// Response payload for both login flows and registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginData {
    pub user: PrincipalDto,

    /// Signed bearer token, valid for one day
    pub access_token: String,
}
