use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::user;

/// Request model for user registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar_url: Option<String>,
}

/// Request model for profile edit; absent fields are left unchanged
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct EditProfileRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub passport_num: Option<String>,
    pub job: Option<String>,
}

/// Credential-stripped user record
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub passport_num: Option<String>,
    pub job: Option<String>,
}

impl From<user::Model> for UserDto {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar_url: u.avatar_url,
            gender: u.gender,
            blood_type: u.blood_type,
            passport_num: u.passport_num,
            job: u.job,
        }
    }
}

/// Paginated user listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserListData {
    pub users: Vec<UserDto>,
    pub total_pages: u64,
}
