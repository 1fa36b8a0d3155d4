use poem_openapi::Object;
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

use crate::types::db::booking;
use crate::types::dto::clinic::ClinicDto;
use crate::types::dto::user::UserDto;

/// Request model for booking creation; the user comes from the bearer token
/// and the clinic from the path.
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub doctor: String,
    /// Unix timestamp
    pub start_time: i64,
    /// Unix timestamp
    pub end_time: i64,
    pub reason: String,
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct BookingDto {
    pub id: String,
    pub user_id: String,
    pub doctor_id: String,
    pub clinic_id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: String,
    pub reason: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<booking::Model> for BookingDto {
    fn from(b: booking::Model) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            doctor_id: b.doctor_id,
            clinic_id: b.clinic_id,
            start_time: b.start_time,
            end_time: b.end_time,
            status: b.status.to_value(),
            reason: b.reason,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Doctor summary shown inside a populated booking
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct BookingDoctorDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

/// Booking with its referenced records populated for display
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct PopulatedBookingDto {
    pub id: String,
    pub start_time: i64,
    pub end_time: i64,
    pub status: String,
    pub reason: String,
    pub created_at: i64,
    pub doctor: Option<BookingDoctorDto>,
    pub user: Option<UserDto>,
    pub clinic: Option<ClinicDto>,
}
