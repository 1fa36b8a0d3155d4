// Stores layer - Data access against the document collections
pub mod booking_store;
pub mod clinic_store;
pub mod identity_store;
pub mod review_store;

pub use booking_store::BookingStore;
pub use clinic_store::ClinicStore;
pub use identity_store::IdentityStore;
pub use review_store::ReviewStore;
