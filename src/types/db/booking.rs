use sea_orm::entity::prelude::*;

/// Lifecycle state of a booking.
///
/// Valid transitions are Pending -> Accepted, Pending -> Cancelled and
/// Accepted -> Cancelled. Nothing currently transitions a booking to Done;
/// the value exists for forward compatibility with a completion flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BookingStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Accepted")]
    Accepted,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
    #[sea_orm(string_value = "Done")]
    Done,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub doctor_id: String,
    pub clinic_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: BookingStatus,
    pub reason: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
