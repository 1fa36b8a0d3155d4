use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::clinic::ClinicError;
use crate::stores::clinic_store::ClinicRecord;
use crate::stores::ClinicStore;
use crate::types::dto::clinic::{
    ClinicDetailData, ClinicDto, ClinicListData, DoctorDto, SpecializationDto,
};
use crate::types::dto::common::Envelope;
use crate::types::dto::review::PopulatedReviewDto;

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Clinic directory API endpoints
pub struct ClinicsApi {
    clinic_store: Arc<ClinicStore>,
}

impl ClinicsApi {
    pub fn new(clinic_store: Arc<ClinicStore>) -> Self {
        Self { clinic_store }
    }
}

/// API tags for clinic endpoints
#[derive(Tags)]
enum ClinicTags {
    /// Clinic directory endpoints
    Clinics,
}

fn record_to_dto(record: ClinicRecord) -> ClinicDto {
    ClinicDto::from_parts(record.clinic, record.specializations, record.services)
}

#[OpenApi(prefix_path = "/clinic")]
impl ClinicsApi {
    /// List clinics, paginated
    #[oai(path = "/", method = "get", tag = "ClinicTags::Clinics")]
    async fn list(
        &self,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Envelope<ClinicListData>>, ClinicError> {
        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let (records, total) = self.clinic_store.list(page, limit).await?;
        let total_pages = total.div_ceil(limit);

        Ok(Json(Envelope::ok(
            ClinicListData {
                clinics: records.into_iter().map(record_to_dto).collect(),
                total_clinics: total,
                total_pages,
            },
            "Get list of clinic success",
        )))
    }

    /// Search clinics by specialization name (case-insensitive exact match)
    #[oai(path = "/search", method = "get", tag = "ClinicTags::Clinics")]
    async fn search(
        &self,
        specialization: Query<String>,
    ) -> Result<Json<Envelope<Vec<ClinicDto>>>, ClinicError> {
        let records = self
            .clinic_store
            .search_by_specialization(&specialization.0)
            .await?;

        Ok(Json(Envelope::ok(
            records.into_iter().map(record_to_dto).collect(),
            "",
        )))
    }

    /// List all specializations across clinics
    #[oai(path = "/specs", method = "get", tag = "ClinicTags::Clinics")]
    async fn specializations(
        &self,
    ) -> Result<Json<Envelope<Vec<SpecializationDto>>>, ClinicError> {
        let specs = self.clinic_store.all_specializations().await?;

        Ok(Json(Envelope::ok(
            specs.into_iter().map(Into::into).collect(),
            "Get all specializations success",
        )))
    }

    /// Clinic detail with doctors and reviews
    #[oai(path = "/:id", method = "get", tag = "ClinicTags::Clinics")]
    async fn detail(
        &self,
        id: Path<String>,
    ) -> Result<Json<Envelope<ClinicDetailData>>, ClinicError> {
        let detail = self
            .clinic_store
            .detail(&id.0)
            .await?
            .ok_or_else(ClinicError::not_found)?;

        let doctors = detail
            .doctors
            .into_iter()
            .map(|d| DoctorDto::from_parts(d.doctor, d.qualification, d.specializations))
            .collect();

        let reviews = detail
            .reviews
            .into_iter()
            .map(|(review, author)| PopulatedReviewDto {
                id: review.id,
                content: review.content,
                rating: review.rating,
                created_at: review.created_at,
                user: author.map(Into::into),
                clinic: None,
            })
            .collect();

        Ok(Json(Envelope::ok(
            ClinicDetailData {
                clinic: record_to_dto(detail.clinic),
                doctors,
                reviews,
            },
            "Get single clinic success",
        )))
    }
}
