// Common test utilities for integration tests

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use uuid::Uuid;

use clinicseek_backend::types::db::{clinic, clinic_doctor, doctor};

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Seeds a clinic with the given login password (stored as-is)
pub async fn seed_clinic(db: &DatabaseConnection, name: &str, password: &str) -> clinic::Model {
    let now = Utc::now().timestamp();
    clinic::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name.to_string()),
        email: Set(format!("{}@clinic.example.com", Uuid::new_v4())),
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
    }
    .insert(db)
    .await
    .expect("Failed to seed clinic")
}

/// Seeds a doctor and attaches them to the given clinic
pub async fn seed_doctor(db: &DatabaseConnection, clinic_id: &str) -> doctor::Model {
    let seeded = doctor::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        first_name: Set("Dana".to_string()),
        last_name: Set("Lee".to_string()),
        avatar_url: Set("https://example.com/dana.png".to_string()),
        gender: Set(None),
        status: Set(Some("Working".to_string())),
        qualification_id: Set(Uuid::new_v4().to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to seed doctor");

    clinic_doctor::ActiveModel {
        clinic_id: Set(clinic_id.to_string()),
        doctor_id: Set(seeded.id.clone()),
    }
    .insert(db)
    .await
    .expect("Failed to link doctor to clinic");

    seeded
}
