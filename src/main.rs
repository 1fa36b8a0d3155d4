use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use clinicseek_backend::api::{AuthApi, BookingsApi, ClinicsApi, HealthApi, ReviewsApi, UsersApi};
use clinicseek_backend::config::{init_logging, AppConfig};
use clinicseek_backend::services::{AuthService, TokenService};
use clinicseek_backend::stores::{BookingStore, ClinicStore, IdentityStore, ReviewStore};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let db: DatabaseConnection = match Database::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            std::process::exit(1);
        }
    };
    tracing::info!(database_url = %config.database_url, "Connected to database");

    if let Err(e) = Migrator::up(&db, None).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }
    tracing::info!("Database migrations completed");

    // Wire up stores and services
    let identity_store = Arc::new(IdentityStore::new(db.clone()));
    let clinic_store = Arc::new(ClinicStore::new(db.clone()));
    let booking_store = Arc::new(BookingStore::new(db.clone()));
    let review_store = Arc::new(ReviewStore::new(db.clone()));

    let token_service = Arc::new(TokenService::new(config.jwt_secret));
    let auth_service = Arc::new(AuthService::new(
        identity_store.clone(),
        token_service.clone(),
    ));

    let auth_api = AuthApi::new(auth_service);
    let users_api = UsersApi::new(identity_store, token_service.clone());
    let clinics_api = ClinicsApi::new(clinic_store.clone());
    let bookings_api = BookingsApi::new(booking_store, clinic_store.clone(), token_service);
    let reviews_api = ReviewsApi::new(review_store, clinic_store);

    let api_service = OpenApiService::new(
        (
            HealthApi,
            auth_api,
            users_api,
            clinics_api,
            bookings_api,
            reviews_api,
        ),
        "ClinicSeek API",
        "1.0.0",
    )
    .server("http://localhost:3000/api");

    let ui = api_service.swagger_ui();

    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(addr = %config.bind_addr, "Starting server");
    tracing::info!("Swagger UI available at /swagger, API endpoints under /api");

    Server::new(TcpListener::bind(config.bind_addr)).run(app).await
}
