// Database entities - one module per collection
pub mod booking;
pub mod clinic;
pub mod clinic_doctor;
pub mod clinic_service;
pub mod clinic_specialization;
pub mod doctor;
pub mod doctor_specialization;
pub mod qualification;
pub mod review;
pub mod service;
pub mod specialization;
pub mod user;
