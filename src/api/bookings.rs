use std::sync::Arc;

use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::api::BearerAuth;
use crate::errors::booking::BookingError;
use crate::services::TokenService;
use crate::stores::booking_store::BookingRecord;
use crate::stores::{BookingStore, ClinicStore};
use crate::types::dto::booking::{
    BookingDoctorDto, BookingDto, CreateBookingRequest, PopulatedBookingDto,
};
use crate::types::dto::clinic::ClinicDto;
use crate::types::dto::common::Envelope;

/// Booking lifecycle API endpoints
pub struct BookingsApi {
    booking_store: Arc<BookingStore>,
    clinic_store: Arc<ClinicStore>,
    token_service: Arc<TokenService>,
}

impl BookingsApi {
    pub fn new(
        booking_store: Arc<BookingStore>,
        clinic_store: Arc<ClinicStore>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            booking_store,
            clinic_store,
            token_service,
        }
    }
}

/// API tags for booking endpoints
#[derive(Tags)]
enum BookingTags {
    /// Booking lifecycle endpoints
    Bookings,
}

fn record_to_dto(record: BookingRecord) -> PopulatedBookingDto {
    let BookingRecord {
        booking,
        doctor,
        user,
        clinic,
        clinic_specializations,
    } = record;
    let booking: BookingDto = booking.into();

    PopulatedBookingDto {
        id: booking.id,
        start_time: booking.start_time,
        end_time: booking.end_time,
        status: booking.status,
        reason: booking.reason,
        created_at: booking.created_at,
        doctor: doctor.map(|d| BookingDoctorDto {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            avatar_url: d.avatar_url,
        }),
        user: user.map(Into::into),
        clinic: clinic.map(|c| ClinicDto::from_parts(c, clinic_specializations, Vec::new())),
    }
}

#[OpenApi(prefix_path = "/bookings")]
impl BookingsApi {
    /// Create a booking request with a clinic
    ///
    /// The booking starts in the Pending state; the clinic accepts or
    /// cancels it later.
    #[oai(path = "/:clinic_id", method = "post", tag = "BookingTags::Bookings")]
    async fn create(
        &self,
        auth: BearerAuth,
        clinic_id: Path<String>,
        body: Json<CreateBookingRequest>,
    ) -> Result<Json<Envelope<BookingDto>>, BookingError> {
        let claims = self
            .token_service
            .validate_token(&auth.0.token)
            .map_err(|_| BookingError::unauthorized())?;
        let body = body.0;

        if self
            .clinic_store
            .find_by_id(&clinic_id.0)
            .await
            .map_err(BookingError::from)?
            .is_none()
        {
            return Err(BookingError::clinic_not_found());
        }

        let booking = self
            .booking_store
            .create(
                claims.sub,
                clinic_id.0,
                body.doctor,
                body.start_time,
                body.end_time,
                body.reason,
            )
            .await?;

        Ok(Json(Envelope::ok(booking.into(), "Request has been sent")))
    }

    /// List bookings where the principal is either side
    #[oai(path = "/:principal_id", method = "get", tag = "BookingTags::Bookings")]
    async fn list(
        &self,
        principal_id: Path<String>,
    ) -> Result<Json<Envelope<Vec<PopulatedBookingDto>>>, BookingError> {
        let records = self.booking_store.list_for_principal(&principal_id.0).await?;

        Ok(Json(Envelope::ok(
            records.into_iter().map(record_to_dto).collect(),
            "",
        )))
    }

    /// Accept a pending booking request
    #[oai(path = "/:id", method = "put", tag = "BookingTags::Bookings")]
    async fn accept(&self, id: Path<String>) -> Result<Json<Envelope<BookingDto>>, BookingError> {
        let booking = self
            .booking_store
            .accept(&id.0)
            .await?
            .ok_or_else(BookingError::booking_not_found)?;

        Ok(Json(Envelope::ok(
            booking.into(),
            "Booking has been accepted",
        )))
    }

    /// Cancel a pending or accepted booking
    #[oai(path = "/manage/:id", method = "post", tag = "BookingTags::Bookings")]
    async fn cancel(&self, id: Path<String>) -> Result<Json<Envelope<BookingDto>>, BookingError> {
        let booking = self
            .booking_store
            .cancel(&id.0)
            .await?
            .ok_or_else(BookingError::booking_not_found)?;

        Ok(Json(Envelope::ok(
            booking.into(),
            "Booking has been cancelled",
        )))
    }
}
