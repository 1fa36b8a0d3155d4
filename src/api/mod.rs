// API layer - HTTP endpoints
pub mod auth;
pub mod bookings;
pub mod clinics;
pub mod health;
pub mod reviews;
pub mod users;

pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use clinics::ClinicsApi;
pub use health::HealthApi;
pub use reviews::ReviewsApi;
pub use users::UsersApi;

use poem_openapi::{auth::Bearer, SecurityScheme};

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);
