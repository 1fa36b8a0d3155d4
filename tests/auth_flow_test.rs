mod common;

use std::sync::Arc;

use clinicseek_backend::errors::auth::AuthError;
use clinicseek_backend::services::{credentials, AuthService, TokenService};
use clinicseek_backend::stores::IdentityStore;
use clinicseek_backend::types::dto::auth::SocialLoginRequest;
use clinicseek_backend::types::internal::Principal;

fn build_services(db: sea_orm::DatabaseConnection) -> (Arc<IdentityStore>, Arc<AuthService>, Arc<TokenService>) {
    let identity_store = Arc::new(IdentityStore::new(db));
    let token_service = Arc::new(TokenService::new("integration-test-secret".to_string()));
    let auth_service = Arc::new(AuthService::new(
        identity_store.clone(),
        token_service.clone(),
    ));
    (identity_store, auth_service, token_service)
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let db = common::setup_test_db().await;
    let (identity_store, auth_service, token_service) = build_services(db);

    let password_hash = credentials::hash_password("s3cret-pw").unwrap();
    let created = identity_store
        .create_user(
            "Alex".to_string(),
            "alex@example.com".to_string(),
            password_hash,
            None,
        )
        .await
        .unwrap();

    let outcome = auth_service
        .login_with_credentials("alex@example.com", "s3cret-pw")
        .await
        .unwrap();

    assert_eq!(outcome.principal.id(), created.id);
    assert!(!outcome.principal.is_admin());

    // The issued token resolves back to the same principal
    let claims = token_service.validate_token(&outcome.access_token).unwrap();
    assert_eq!(claims.sub, created.id);
    let resolved = identity_store
        .find_principal_by_id(&claims.sub)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.email(), "alex@example.com");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let db = common::setup_test_db().await;
    let (identity_store, auth_service, _) = build_services(db);

    let password_hash = credentials::hash_password("right-pw").unwrap();
    identity_store
        .create_user(
            "Alex".to_string(),
            "alex@example.com".to_string(),
            password_hash,
            None,
        )
        .await
        .unwrap();

    let err = auth_service
        .login_with_credentials("alex@example.com", "wrong-pw")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::WrongPassword(_)));

    let err = auth_service
        .login_with_credentials("nobody@example.com", "whatever")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials(_)));
}

#[tokio::test]
async fn test_clinic_login_resolves_as_admin() {
    let db = common::setup_test_db().await;
    let (_, auth_service, _) = build_services(db.clone());

    let clinic = common::seed_clinic(&db, "Sunrise Clinic", "clinic-pw").await;

    let outcome = auth_service
        .login_with_credentials(&clinic.email, "clinic-pw")
        .await
        .unwrap();

    assert_eq!(outcome.principal.id(), clinic.id);
    assert!(outcome.principal.is_admin());
    assert!(matches!(outcome.principal, Principal::Clinic(_)));
}

#[tokio::test]
async fn test_social_login_creates_user_on_first_visit() {
    let db = common::setup_test_db().await;
    let (identity_store, auth_service, _) = build_services(db);

    let outcome = auth_service
        .login_with_federated_profile(SocialLoginRequest {
            name: "Sam".to_string(),
            email: "Sam@Example.com".to_string(),
            avatar_url: Some("https://example.com/sam.png".to_string()),
        })
        .await
        .unwrap();

    // The email is normalized to lowercase before lookup and creation
    assert_eq!(outcome.principal.email(), "sam@example.com");

    let user = identity_store
        .find_user_by_email("sam@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.avatar_url.as_deref(), Some("https://example.com/sam.png"));
    // The placeholder password is stored hashed, never in the clear
    assert!(user.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_social_login_refreshes_existing_user_avatar() {
    let db = common::setup_test_db().await;
    let (identity_store, auth_service, _) = build_services(db);

    let password_hash = credentials::hash_password("pw").unwrap();
    let created = identity_store
        .create_user(
            "Sam".to_string(),
            "sam@example.com".to_string(),
            password_hash,
            Some("https://example.com/old.png".to_string()),
        )
        .await
        .unwrap();

    let outcome = auth_service
        .login_with_federated_profile(SocialLoginRequest {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            avatar_url: Some("https://example.com/new.png".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(outcome.principal.id(), created.id);
    let user = identity_store
        .find_user_by_email("sam@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.avatar_url.as_deref(), Some("https://example.com/new.png"));
}
