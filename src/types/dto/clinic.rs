use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::{clinic, doctor, qualification, service, specialization};
use crate::types::dto::review::PopulatedReviewDto;

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationDto {
    pub id: String,
    pub name: String,
}

impl From<specialization::Model> for SpecializationDto {
    fn from(s: specialization::Model) -> Self {
        Self { id: s.id, name: s.name }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDto {
    pub id: String,
    pub name: String,
}

impl From<service::Model> for ServiceDto {
    fn from(s: service::Model) -> Self {
        Self { id: s.id, name: s.name }
    }
}

#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct QualificationDto {
    pub id: String,
    pub name: String,
}

impl From<qualification::Model> for QualificationDto {
    fn from(q: qualification::Model) -> Self {
        Self { id: q.id, name: q.name }
    }
}

/// Doctor with populated qualification and specializations
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct DoctorDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
    pub gender: Option<String>,
    pub status: Option<String>,
    pub qualification: Option<QualificationDto>,
    pub specializations: Vec<SpecializationDto>,
}

impl DoctorDto {
    pub fn from_parts(
        d: doctor::Model,
        qualification: Option<qualification::Model>,
        specializations: Vec<specialization::Model>,
    ) -> Self {
        Self {
            id: d.id,
            first_name: d.first_name,
            last_name: d.last_name,
            avatar_url: d.avatar_url,
            gender: d.gender,
            status: d.status,
            qualification: qualification.map(Into::into),
            specializations: specializations.into_iter().map(Into::into).collect(),
        }
    }
}

/// Directory view of a clinic, credential material stripped
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct ClinicDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub start_working_time: String,
    pub end_working_time: String,
    pub languages: Vec<String>,
    pub register_number: String,
    pub statement: String,
    pub images: Vec<String>,
    pub avg_rating: f64,
    pub review_count: i32,
    pub latitude: String,
    pub longitude: String,
    pub specializations: Vec<SpecializationDto>,
    pub services: Vec<ServiceDto>,
}

impl ClinicDto {
    pub fn from_parts(
        c: clinic::Model,
        specializations: Vec<specialization::Model>,
        services: Vec<service::Model>,
    ) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            address: c.address,
            start_working_time: c.start_working_time,
            end_working_time: c.end_working_time,
            languages: serde_json::from_str(&c.languages).unwrap_or_default(),
            register_number: c.register_number,
            statement: c.statement,
            images: serde_json::from_str(&c.images).unwrap_or_default(),
            avg_rating: c.avg_rating,
            review_count: c.review_count,
            latitude: c.latitude,
            longitude: c.longitude,
            specializations: specializations.into_iter().map(Into::into).collect(),
            services: services.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full clinic page: directory entry plus doctors and reviews
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ClinicDetailData {
    pub clinic: ClinicDto,
    pub doctors: Vec<DoctorDto>,
    pub reviews: Vec<PopulatedReviewDto>,
}

/// Paginated clinic listing
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ClinicListData {
    pub clinics: Vec<ClinicDto>,
    pub total_clinics: u64,
    pub total_pages: u64,
}
