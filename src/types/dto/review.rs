use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{clinic, review, user};

/// Request model for review creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    /// Reviewing user, optional for anonymous reviews
    pub user_id: Option<String>,
    pub content: String,
    /// 1 to 5
    pub rating: i32,
}

/// Request model for review edit
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateReviewRequest {
    pub content: String,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewDto {
    pub id: String,
    pub clinic_id: String,
    pub user_id: Option<String>,
    pub content: String,
    pub rating: i32,
    pub created_at: i64,
}

impl From<review::Model> for ReviewDto {
    fn from(r: review::Model) -> Self {
        Self {
            id: r.id,
            clinic_id: r.clinic_id,
            user_id: r.user_id,
            content: r.content,
            rating: r.rating,
            created_at: r.created_at,
        }
    }
}

/// Reviewer shown alongside a review
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAuthorDto {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<user::Model> for ReviewAuthorDto {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            avatar_url: u.avatar_url,
        }
    }
}

/// Clinic shown alongside a review in the all-reviews feed
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ReviewClinicDto {
    pub id: String,
    pub name: String,
    pub address: String,
}

impl From<clinic::Model> for ReviewClinicDto {
    fn from(c: clinic::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            address: c.address,
        }
    }
}

/// Review with its author (and, in the feed view, its clinic) populated
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedReviewDto {
    pub id: String,
    pub content: String,
    pub rating: i32,
    pub created_at: i64,
    pub user: Option<ReviewAuthorDto>,
    pub clinic: Option<ReviewClinicDto>,
}

/// Paginated reviews of one clinic
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ReviewListData {
    pub reviews: Vec<ReviewDto>,
    pub total_pages: u64,
}
