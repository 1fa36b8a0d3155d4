use sea_orm::entity::prelude::*;

/// Clinic account and directory entry.
///
/// `password` holds the clinic's credential material: a PHC-format Argon2id
/// hash for migrated rows, or a legacy plaintext value for rows created
/// before hashing was introduced. `avg_rating` and `review_count` are
/// derived from the reviews collection and refreshed after review writes.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clinics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub address: String,
    pub start_working_time: String,
    pub end_working_time: String,

    /// JSON array of supported languages
    pub languages: String,
    pub register_number: String,
    pub statement: String,

    /// JSON array of image URLs
    pub images: String,

    pub avg_rating: f64,
    pub review_count: i32,
    pub latitude: String,
    pub longitude: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
