use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::types::db::booking::{self, BookingStatus};
use crate::types::db::{clinic, clinic_specialization, doctor, specialization, user};

/// Booking with its referenced records resolved for display
#[derive(Debug)]
pub struct BookingRecord {
    pub booking: booking::Model,
    pub doctor: Option<doctor::Model>,
    pub user: Option<user::Model>,
    pub clinic: Option<clinic::Model>,
    pub clinic_specializations: Vec<specialization::Model>,
}

/// BookingStore drives the booking lifecycle.
///
/// State transitions are single conditional updates: the row must match the
/// id AND the expected current status for the write to apply, so two
/// concurrent transitions on the same booking cannot both win.
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new booking in the Pending state. The caller is responsible
    /// for resolving the clinic reference first.
    pub async fn create(
        &self,
        user_id: String,
        clinic_id: String,
        doctor_id: String,
        start_time: i64,
        end_time: i64,
        reason: String,
    ) -> Result<booking::Model, StoreError> {
        let now = Utc::now().timestamp();
        let new_booking = booking::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            doctor_id: Set(doctor_id),
            clinic_id: Set(clinic_id),
            start_time: Set(start_time),
            end_time: Set(end_time),
            status: Set(BookingStatus::Pending),
            reason: Set(reason),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_booking
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::database("create_booking", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<booking::Model>, StoreError> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_booking_by_id", e))
    }

    /// Pending -> Accepted. Returns `None` when no booking with that id is
    /// currently Pending; an already-Accepted booking is NOT a no-op.
    pub async fn accept(&self, id: &str) -> Result<Option<booking::Model>, StoreError> {
        self.transition(id, &[BookingStatus::Pending], BookingStatus::Accepted)
            .await
    }

    /// Pending/Accepted -> Cancelled. Returns `None` when no booking with
    /// that id is in a cancellable state.
    pub async fn cancel(&self, id: &str) -> Result<Option<booking::Model>, StoreError> {
        self.transition(
            id,
            &[BookingStatus::Pending, BookingStatus::Accepted],
            BookingStatus::Cancelled,
        )
        .await
    }

    /// Conditionally move a booking from one of `from` to `to` in a single
    /// statement, then re-read the row for the caller.
    async fn transition(
        &self,
        id: &str,
        from: &[BookingStatus],
        to: BookingStatus,
    ) -> Result<Option<booking::Model>, StoreError> {
        let result = booking::Entity::update_many()
            .col_expr(booking::Column::Status, Expr::value(to))
            .col_expr(
                booking::Column::UpdatedAt,
                Expr::value(Utc::now().timestamp()),
            )
            .filter(booking::Column::Id.eq(id))
            .filter(booking::Column::Status.is_in(from.iter().copied()))
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::database("transition_booking", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// All bookings where the principal is either the user or the clinic
    /// side, populated with doctor, user and clinic(+specializations).
    pub async fn list_for_principal(
        &self,
        principal_id: &str,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let bookings = booking::Entity::find()
            .filter(
                Condition::any()
                    .add(booking::Column::UserId.eq(principal_id))
                    .add(booking::Column::ClinicId.eq(principal_id)),
            )
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?;

        let doctor_ids: Vec<String> = bookings.iter().map(|b| b.doctor_id.clone()).collect();
        let user_ids: Vec<String> = bookings.iter().map(|b| b.user_id.clone()).collect();
        let clinic_ids: Vec<String> = bookings.iter().map(|b| b.clinic_id.clone()).collect();

        let doctors: HashMap<String, doctor::Model> = doctor::Entity::find()
            .filter(doctor::Column::Id.is_in(doctor_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?
            .into_iter()
            .map(|d| (d.id.clone(), d))
            .collect();

        let users: HashMap<String, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let clinics: HashMap<String, clinic::Model> = clinic::Entity::find()
            .filter(clinic::Column::Id.is_in(clinic_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let spec_links = clinic_specialization::Entity::find()
            .filter(clinic_specialization::Column::ClinicId.is_in(clinic_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?;
        let spec_ids: Vec<String> = spec_links
            .iter()
            .map(|l| l.specialization_id.clone())
            .collect();
        let specs: HashMap<String, specialization::Model> = specialization::Entity::find()
            .filter(specialization::Column::Id.is_in(spec_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_principal", e))?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let mut specs_per_clinic: HashMap<String, Vec<specialization::Model>> = HashMap::new();
        for link in spec_links {
            if let Some(spec) = specs.get(&link.specialization_id) {
                specs_per_clinic
                    .entry(link.clinic_id)
                    .or_default()
                    .push(spec.clone());
            }
        }

        Ok(bookings
            .into_iter()
            .map(|b| BookingRecord {
                doctor: doctors.get(&b.doctor_id).cloned(),
                user: users.get(&b.user_id).cloned(),
                clinic: clinics.get(&b.clinic_id).cloned(),
                clinic_specializations: specs_per_clinic
                    .get(&b.clinic_id)
                    .cloned()
                    .unwrap_or_default(),
                booking: b,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> BookingStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        BookingStore::new(db)
    }

    async fn seed_booking(store: &BookingStore) -> booking::Model {
        store
            .create(
                "user-1".to_string(),
                "clinic-1".to_string(),
                "doctor-1".to_string(),
                1_700_000_000,
                1_700_003_600,
                "Checkup".to_string(),
            )
            .await
            .expect("Failed to create booking")
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let store = setup().await;

        let booking = seed_booking(&store).await;

        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_accept_pending_booking() {
        let store = setup().await;
        let booking = seed_booking(&store).await;

        let accepted = store.accept(&booking.id).await.unwrap().unwrap();

        assert_eq!(accepted.status, BookingStatus::Accepted);
    }

    #[tokio::test]
    async fn test_accept_twice_fails_second_time() {
        let store = setup().await;
        let booking = seed_booking(&store).await;

        store.accept(&booking.id).await.unwrap().unwrap();
        let second = store.accept(&booking.id).await.unwrap();

        // Not a silent no-op: the gate rejects a non-Pending booking
        assert!(second.is_none());
        let current = store.find_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(current.status, BookingStatus::Accepted);
    }

    #[tokio::test]
    async fn test_cancel_from_pending_and_accepted() {
        let store = setup().await;

        let pending = seed_booking(&store).await;
        let cancelled = store.cancel(&pending.id).await.unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let accepted = seed_booking(&store).await;
        store.accept(&accepted.id).await.unwrap().unwrap();
        let cancelled = store.cancel(&accepted.id).await.unwrap().unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_fails_from_cancelled() {
        let store = setup().await;
        let booking = seed_booking(&store).await;
        store.cancel(&booking.id).await.unwrap().unwrap();

        let again = store.cancel(&booking.id).await.unwrap();

        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_accept_unknown_booking_fails() {
        let store = setup().await;

        let result = store.accept("no-such-booking").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_for_principal_matches_either_side() {
        let store = setup().await;
        let booking = seed_booking(&store).await;

        let as_user = store.list_for_principal("user-1").await.unwrap();
        let as_clinic = store.list_for_principal("clinic-1").await.unwrap();
        let unrelated = store.list_for_principal("someone-else").await.unwrap();

        assert_eq!(as_user.len(), 1);
        assert_eq!(as_user[0].booking.id, booking.id);
        assert_eq!(as_clinic.len(), 1);
        assert!(unrelated.is_empty());
    }
}
