use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::types::db::{clinic, user};
use crate::types::internal::Principal;

/// Profile fields a user may edit; `None` leaves the stored value unchanged
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub passport_num: Option<String>,
    pub job: Option<String>,
}

/// IdentityStore persists the two principal collections (users, clinics).
///
/// Email uniqueness is enforced per collection; across collections the user
/// record wins lookup ties.
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>, StoreError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_user_by_email", e))
    }

    pub async fn find_clinic_by_email(
        &self,
        email: &str,
    ) -> Result<Option<clinic::Model>, StoreError> {
        clinic::Entity::find()
            .filter(clinic::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_clinic_by_email", e))
    }

    /// Resolve an email against both collections, user first
    pub async fn find_principal_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Principal>, StoreError> {
        if let Some(user) = self.find_user_by_email(email).await? {
            return Ok(Some(Principal::User(user)));
        }
        if let Some(clinic) = self.find_clinic_by_email(email).await? {
            return Ok(Some(Principal::Clinic(clinic)));
        }
        Ok(None)
    }

    /// Resolve a token subject against both collections, user first
    pub async fn find_principal_by_id(&self, id: &str) -> Result<Option<Principal>, StoreError> {
        let user = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_principal_by_id", e))?;
        if let Some(user) = user {
            return Ok(Some(Principal::User(user)));
        }

        let clinic = clinic::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_principal_by_id", e))?;
        Ok(clinic.map(Principal::Clinic))
    }

    /// Insert a new user with already-hashed credential material
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        password_hash: String,
        avatar_url: Option<String>,
    ) -> Result<user::Model, StoreError> {
        if self.find_user_by_email(&email).await?.is_some() {
            return Err(StoreError::DuplicateEmail(email));
        }

        let now = Utc::now().timestamp();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name),
            email: Set(email.clone()),
            password_hash: Set(password_hash),
            avatar_url: Set(avatar_url),
            gender: Set(None),
            blood_type: Set(None),
            passport_num: Set(None),
            job: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            // The pre-check races with concurrent registration; the unique
            // index is the authority.
            if e.to_string().contains("UNIQUE") {
                StoreError::DuplicateEmail(email)
            } else {
                StoreError::database("create_user", e)
            }
        })
    }

    /// Refresh a user's avatar from a federated profile
    pub async fn update_avatar(
        &self,
        user_id: &str,
        avatar_url: Option<String>,
    ) -> Result<Option<user::Model>, StoreError> {
        let Some(existing) = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("update_avatar", e))?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        active.avatar_url = Set(avatar_url);
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| StoreError::database("update_avatar", e))?;
        Ok(Some(updated))
    }

    /// Apply profile edits; returns `None` when the user does not exist
    pub async fn edit_profile(
        &self,
        user_id: &str,
        changes: ProfileChanges,
    ) -> Result<Option<user::Model>, StoreError> {
        let Some(existing) = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("edit_profile", e))?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(gender) = changes.gender {
            active.gender = Set(Some(gender));
        }
        if let Some(blood_type) = changes.blood_type {
            active.blood_type = Set(Some(blood_type));
        }
        if let Some(passport_num) = changes.passport_num {
            active.passport_num = Set(Some(passport_num));
        }
        if let Some(job) = changes.job {
            active.job = Set(Some(job));
        }
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| StoreError::database("edit_profile", e))?;
        Ok(Some(updated))
    }

    /// Paginated user listing, newest first
    pub async fn list_users(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<user::Model>, u64), StoreError> {
        let total = user::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| StoreError::database("list_users", e))?;

        let offset = limit * (page.saturating_sub(1));
        let users = user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_users", e))?;

        Ok((users, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credentials;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> IdentityStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        IdentityStore::new(db)
    }

    async fn seed_clinic(store: &IdentityStore, email: &str, password: &str) -> clinic::Model {
        let now = Utc::now().timestamp();
        let model = clinic::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Clinic X".to_string()),
            email: Set(email.to_string()),
            password: Set(password.to_string()),
            address: Set("1 Main St".to_string()),
            start_working_time: Set("08:00".to_string()),
            end_working_time: Set("17:00".to_string()),
            languages: Set("[\"English\"]".to_string()),
            register_number: Set("R-1".to_string()),
            statement: Set("".to_string()),
            images: Set("[]".to_string()),
            avg_rating: Set(0.0),
            review_count: Set(0),
            latitude: Set("0".to_string()),
            longitude: Set("0".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        model.insert(&store.db).await.expect("Failed to seed clinic")
    }

    #[tokio::test]
    async fn test_create_user_and_lookup_by_email() {
        let store = setup().await;
        let hash = credentials::hash_password("secret").unwrap();

        let created = store
            .create_user(
                "Pat".to_string(),
                "pat@example.com".to_string(),
                hash,
                None,
            )
            .await
            .unwrap();

        let found = store.find_user_by_email("pat@example.com").await.unwrap();
        assert_eq!(found.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = setup().await;
        let hash = credentials::hash_password("secret").unwrap();

        store
            .create_user(
                "Pat".to_string(),
                "pat@example.com".to_string(),
                hash.clone(),
                None,
            )
            .await
            .unwrap();

        let result = store
            .create_user("Pat Again".to_string(), "pat@example.com".to_string(), hash, None)
            .await;

        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
        let (_, total) = store.list_users(1, 10).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_principal_lookup_prefers_user_over_clinic() {
        let store = setup().await;
        let hash = credentials::hash_password("secret").unwrap();

        seed_clinic(&store, "shared@example.com", "pw").await;
        store
            .create_user(
                "Pat".to_string(),
                "shared@example.com".to_string(),
                hash,
                None,
            )
            .await
            .unwrap();

        let principal = store
            .find_principal_by_email("shared@example.com")
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(principal, Principal::User(_)));
        assert!(!principal.is_admin());
    }

    #[tokio::test]
    async fn test_clinic_resolves_as_admin_principal() {
        let store = setup().await;
        let clinic = seed_clinic(&store, "x@example.com", "123").await;

        let principal = store
            .find_principal_by_id(&clinic.id)
            .await
            .unwrap()
            .unwrap();

        assert!(principal.is_admin());
        assert_eq!(principal.id(), clinic.id);
    }

    #[tokio::test]
    async fn test_edit_profile_updates_only_given_fields() {
        let store = setup().await;
        let hash = credentials::hash_password("secret").unwrap();
        let created = store
            .create_user(
                "Pat".to_string(),
                "pat@example.com".to_string(),
                hash,
                Some("http://img/avatar.png".to_string()),
            )
            .await
            .unwrap();

        let updated = store
            .edit_profile(
                &created.id,
                ProfileChanges {
                    blood_type: Some("O+".to_string()),
                    job: Some("Engineer".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Pat");
        assert_eq!(updated.avatar_url.as_deref(), Some("http://img/avatar.png"));
        assert_eq!(updated.blood_type.as_deref(), Some("O+"));
        assert_eq!(updated.job.as_deref(), Some("Engineer"));
    }

    #[tokio::test]
    async fn test_edit_profile_missing_user_returns_none() {
        let store = setup().await;

        let result = store
            .edit_profile("no-such-id", ProfileChanges::default())
            .await
            .unwrap();

        assert!(result.is_none());
    }
}
