use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::{credentials, TokenService};
use crate::stores::IdentityStore;
use crate::types::dto::auth::SocialLoginRequest;
use crate::types::internal::Principal;

/// Result of a successful login: the resolved principal and its bearer token
#[derive(Debug)]
pub struct LoginOutcome {
    pub principal: Principal,
    pub access_token: String,
}

/// Orchestrates the two login flows over the shared identity surface.
///
/// Both flows resolve the email against users and clinics, with the user
/// record taking priority when both exist.
pub struct AuthService {
    identity_store: Arc<IdentityStore>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(identity_store: Arc<IdentityStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            identity_store,
            token_service,
        }
    }

    /// Credential login. The email lookup is case-sensitive on this path;
    /// only the federated path normalizes.
    pub async fn login_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let principal = self
            .identity_store
            .find_principal_by_email(email)
            .await?
            .ok_or_else(AuthError::invalid_credentials)?;

        if !credentials::verify_principal_password(&principal, password) {
            return Err(AuthError::wrong_password());
        }

        let access_token = self.token_service.generate_token(principal.id())?;
        Ok(LoginOutcome {
            principal,
            access_token,
        })
    }

    /// Federated login. The profile is already verified by the identity
    /// provider, so this path never fails on credentials.
    ///
    /// Resolution order: existing user (avatar refreshed from the profile),
    /// existing clinic (reused unchanged), otherwise a new user with a
    /// hashed random numeric password.
    pub async fn login_with_federated_profile(
        &self,
        profile: SocialLoginRequest,
    ) -> Result<LoginOutcome, AuthError> {
        let email = profile.email.to_lowercase();

        let principal = if let Some(user) = self.identity_store.find_user_by_email(&email).await? {
            let updated = self
                .identity_store
                .update_avatar(&user.id, profile.avatar_url)
                .await?
                .ok_or_else(|| AuthError::internal_error("User vanished during avatar update"))?;
            Principal::User(updated)
        } else if let Some(clinic) = self.identity_store.find_clinic_by_email(&email).await? {
            Principal::Clinic(clinic)
        } else {
            let generated = credentials::generate_numeric_password();
            let password_hash = credentials::hash_password(&generated)
                .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?;
            let created = self
                .identity_store
                .create_user(profile.name, email, password_hash, profile.avatar_url)
                .await?;
            Principal::User(created)
        };

        let access_token = self.token_service.generate_token(principal.id())?;
        Ok(LoginOutcome {
            principal,
            access_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::clinic;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use uuid::Uuid;

    async fn setup() -> (DatabaseConnection, AuthService, Arc<IdentityStore>) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let identity_store = Arc::new(IdentityStore::new(db.clone()));
        let token_service = Arc::new(TokenService::new(
            "test-secret-key-minimum-32-characters-long".to_string(),
        ));
        let service = AuthService::new(identity_store.clone(), token_service);
        (db, service, identity_store)
    }

    async fn seed_clinic(db: &DatabaseConnection, email: &str, password: &str) -> clinic::Model {
        let now = Utc::now().timestamp();
        clinic::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set("Clinic X".to_string()),
            email: Set(email.to_string()),
            password: Set(password.to_string()),
            address: Set("1 Main St".to_string()),
            start_working_time: Set("08:00".to_string()),
            end_working_time: Set("17:00".to_string()),
            languages: Set("[]".to_string()),
            register_number: Set("R-1".to_string()),
            statement: Set("".to_string()),
            images: Set("[]".to_string()),
            avg_rating: Set(0.0),
            review_count: Set(0),
            latitude: Set("0".to_string()),
            longitude: Set("0".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .expect("Failed to seed clinic")
    }

    #[tokio::test]
    async fn test_user_login_with_correct_and_wrong_password() {
        let (_db, service, identity_store) = setup().await;
        let hash = credentials::hash_password("secret").unwrap();
        identity_store
            .create_user("Pat".to_string(), "pat@example.com".to_string(), hash, None)
            .await
            .unwrap();

        let outcome = service
            .login_with_credentials("pat@example.com", "secret")
            .await
            .unwrap();
        assert!(!outcome.principal.is_admin());
        assert!(!outcome.access_token.is_empty());

        let wrong = service
            .login_with_credentials("pat@example.com", "not-secret")
            .await;
        assert!(matches!(wrong, Err(AuthError::WrongPassword(_))));
    }

    #[tokio::test]
    async fn test_clinic_plaintext_login_scenario() {
        let (db, service, _) = setup().await;
        seed_clinic(&db, "x@example.com", "123").await;

        let outcome = service
            .login_with_credentials("x@example.com", "123")
            .await
            .unwrap();
        assert!(outcome.principal.is_admin());

        let wrong = service.login_with_credentials("x@example.com", "1234").await;
        assert!(matches!(wrong, Err(AuthError::WrongPassword(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let (_db, service, _) = setup().await;

        let result = service
            .login_with_credentials("nobody@example.com", "whatever")
            .await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn test_federated_login_updates_only_avatar() {
        let (_db, service, identity_store) = setup().await;
        let hash = credentials::hash_password("secret").unwrap();
        let created = identity_store
            .create_user(
                "Pat".to_string(),
                "pat@example.com".to_string(),
                hash.clone(),
                Some("http://img/old.png".to_string()),
            )
            .await
            .unwrap();

        let outcome = service
            .login_with_federated_profile(SocialLoginRequest {
                name: "Different Name".to_string(),
                email: "Pat@Example.com".to_string(),
                avatar_url: Some("http://img/new.png".to_string()),
            })
            .await
            .unwrap();

        let Principal::User(user) = outcome.principal else {
            panic!("Expected user principal");
        };
        assert_eq!(user.id, created.id);
        assert_eq!(user.name, "Pat");
        assert_eq!(user.avatar_url.as_deref(), Some("http://img/new.png"));
        assert_eq!(user.password_hash, hash);
    }

    #[tokio::test]
    async fn test_federated_login_reuses_clinic_unchanged() {
        let (db, service, identity_store) = setup().await;
        let clinic = seed_clinic(&db, "clinic@example.com", "pw").await;

        let outcome = service
            .login_with_federated_profile(SocialLoginRequest {
                name: "Whoever".to_string(),
                email: "Clinic@Example.com".to_string(),
                avatar_url: None,
            })
            .await
            .unwrap();

        assert!(outcome.principal.is_admin());
        assert_eq!(outcome.principal.id(), clinic.id);
        // No user account was created for the clinic's email
        let user = identity_store
            .find_user_by_email("clinic@example.com")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_federated_login_creates_user_with_hashed_password() {
        let (_db, service, identity_store) = setup().await;

        let outcome = service
            .login_with_federated_profile(SocialLoginRequest {
                name: "New Person".to_string(),
                email: "New@Example.com".to_string(),
                avatar_url: Some("http://img/a.png".to_string()),
            })
            .await
            .unwrap();

        let Principal::User(user) = outcome.principal else {
            panic!("Expected user principal");
        };
        assert_eq!(user.email, "new@example.com");
        assert!(credentials::is_phc_hash(&user.password_hash));

        // Exactly one account exists for the email
        let found = identity_store
            .find_user_by_email("new@example.com")
            .await
            .unwrap();
        assert_eq!(found.unwrap().id, user.id);
    }
}
