// DTO layer - API request and response models
pub mod auth;
pub mod booking;
pub mod clinic;
pub mod common;
pub mod review;
pub mod user;
