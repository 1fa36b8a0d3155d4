use std::sync::Arc;

use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};

use crate::errors::review::ReviewError;
use crate::stores::{ClinicStore, ReviewStore};
use crate::types::dto::common::Envelope;
use crate::types::dto::review::{
    CreateReviewRequest, PopulatedReviewDto, ReviewDto, ReviewListData, UpdateReviewRequest,
};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// Review API endpoints
pub struct ReviewsApi {
    review_store: Arc<ReviewStore>,
    clinic_store: Arc<ClinicStore>,
}

impl ReviewsApi {
    pub fn new(review_store: Arc<ReviewStore>, clinic_store: Arc<ClinicStore>) -> Self {
        Self {
            review_store,
            clinic_store,
        }
    }

    /// Refresh the owning clinic's derived rating aggregate. Best effort:
    /// the review write already succeeded, so a failure here only leaves
    /// the cached aggregate stale.
    async fn refresh_aggregate(&self, clinic_id: &str) {
        if let Err(err) = self.review_store.recompute_clinic_aggregate(clinic_id).await {
            tracing::warn!(
                clinic_id = clinic_id,
                error = %err,
                "Failed to refresh clinic review aggregate"
            );
        }
    }
}

/// API tags for review endpoints
#[derive(Tags)]
enum ReviewTags {
    /// Review endpoints
    Reviews,
}

#[OpenApi(prefix_path = "/review")]
impl ReviewsApi {
    /// Create a review for a clinic
    #[oai(path = "/clinic/:id", method = "post", tag = "ReviewTags::Reviews")]
    async fn create(
        &self,
        id: Path<String>,
        body: Json<CreateReviewRequest>,
    ) -> Result<Json<Envelope<ReviewDto>>, ReviewError> {
        let body = body.0;
        if !(1..=5).contains(&body.rating) {
            return Err(ReviewError::validation("Rating must be between 1 and 5"));
        }

        if self
            .clinic_store
            .find_by_id(&id.0)
            .await
            .map_err(ReviewError::from)?
            .is_none()
        {
            return Err(ReviewError::clinic_not_found());
        }

        let review = self
            .review_store
            .create(id.0.clone(), body.user_id, body.content, body.rating)
            .await?;

        self.refresh_aggregate(&id.0).await;

        Ok(Json(Envelope::ok(
            review.into(),
            "Create new review successful",
        )))
    }

    /// Paginated reviews of a clinic
    #[oai(path = "/clinic/:id", method = "get", tag = "ReviewTags::Reviews")]
    async fn list_for_clinic(
        &self,
        id: Path<String>,
        page: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Envelope<ReviewListData>>, ReviewError> {
        if self
            .clinic_store
            .find_by_id(&id.0)
            .await
            .map_err(ReviewError::from)?
            .is_none()
        {
            return Err(ReviewError::clinic_not_found());
        }

        let page = page.0.unwrap_or(1).max(1);
        let limit = limit.0.unwrap_or(DEFAULT_PAGE_SIZE).max(1);

        let (reviews, total) = self.review_store.list_for_clinic(&id.0, page, limit).await?;
        let total_pages = total.div_ceil(limit);

        Ok(Json(Envelope::ok(
            ReviewListData {
                reviews: reviews.into_iter().map(Into::into).collect(),
                total_pages,
            },
            "",
        )))
    }

    /// All reviews across clinics, with author and clinic populated
    #[oai(path = "/", method = "get", tag = "ReviewTags::Reviews")]
    async fn list_all(&self) -> Result<Json<Envelope<Vec<PopulatedReviewDto>>>, ReviewError> {
        let reviews = self.review_store.list_all().await?;

        let populated = reviews
            .into_iter()
            .map(|(review, author, clinic)| PopulatedReviewDto {
                id: review.id,
                content: review.content,
                rating: review.rating,
                created_at: review.created_at,
                user: author.map(Into::into),
                clinic: clinic.map(Into::into),
            })
            .collect();

        Ok(Json(Envelope::ok(populated, "Get all reviews successful")))
    }

    /// Update a review's content
    #[oai(path = "/:id", method = "put", tag = "ReviewTags::Reviews")]
    async fn update(
        &self,
        id: Path<String>,
        body: Json<UpdateReviewRequest>,
    ) -> Result<Json<Envelope<ReviewDto>>, ReviewError> {
        let review = self
            .review_store
            .update_content(&id.0, body.0.content)
            .await?
            .ok_or_else(ReviewError::not_found)?;

        self.refresh_aggregate(&review.clinic_id).await;

        Ok(Json(Envelope::ok(review.into(), "Update successful")))
    }

    /// Delete a review
    #[oai(path = "/:id", method = "delete", tag = "ReviewTags::Reviews")]
    async fn delete(&self, id: Path<String>) -> Result<Json<Envelope<ReviewDto>>, ReviewError> {
        let deleted = self
            .review_store
            .delete(&id.0)
            .await?
            .ok_or_else(ReviewError::not_found)?;

        self.refresh_aggregate(&deleted.clinic_id).await;

        Ok(Json(Envelope::<ReviewDto>::message_only(
            "Delete successful",
        )))
    }
}
