use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::types::db::{clinic, review, user};

/// ReviewStore persists reviews and maintains the derived rating aggregate
/// on the owning clinic.
///
/// The aggregate is refreshed by an explicit `recompute_clinic_aggregate`
/// call after each successful mutation, not by a hidden write hook. It is a
/// best-effort cache: a crash between the review write and the recompute
/// leaves the clinic row stale until the next review mutation.
pub struct ReviewStore {
    db: DatabaseConnection,
}

impl ReviewStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        clinic_id: String,
        user_id: Option<String>,
        content: String,
        rating: i32,
    ) -> Result<review::Model, StoreError> {
        let now = Utc::now().timestamp();
        let new_review = review::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            clinic_id: Set(clinic_id),
            user_id: Set(user_id),
            content: Set(content),
            rating: Set(rating),
            created_at: Set(now),
            updated_at: Set(now),
        };

        new_review
            .insert(&self.db)
            .await
            .map_err(|e| StoreError::database("create_review", e))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<review::Model>, StoreError> {
        review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_review_by_id", e))
    }

    /// Update the text of a review; returns `None` when it does not exist
    pub async fn update_content(
        &self,
        id: &str,
        content: String,
    ) -> Result<Option<review::Model>, StoreError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: review::ActiveModel = existing.into();
        active.content = Set(content);
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| StoreError::database("update_review", e))?;
        Ok(Some(updated))
    }

    /// Delete a review; returns the deleted row so the caller can refresh
    /// the owning clinic's aggregate.
    pub async fn delete(&self, id: &str) -> Result<Option<review::Model>, StoreError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        existing
            .clone()
            .delete(&self.db)
            .await
            .map_err(|e| StoreError::database("delete_review", e))?;
        Ok(Some(existing))
    }

    /// Paginated reviews of one clinic, newest first
    pub async fn list_for_clinic(
        &self,
        clinic_id: &str,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<review::Model>, u64), StoreError> {
        let total = review::Entity::find()
            .filter(review::Column::ClinicId.eq(clinic_id))
            .count(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_clinic", e))?;

        let offset = limit * (page.saturating_sub(1));
        let reviews = review::Entity::find()
            .filter(review::Column::ClinicId.eq(clinic_id))
            .order_by_desc(review::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_for_clinic", e))?;

        Ok((reviews, total))
    }

    /// Every review with its author and clinic resolved, for the feed view
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(review::Model, Option<user::Model>, Option<clinic::Model>)>, StoreError> {
        let reviews = review::Entity::find()
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_all_reviews", e))?;

        let user_ids: Vec<String> = reviews.iter().filter_map(|r| r.user_id.clone()).collect();
        let clinic_ids: Vec<String> = reviews.iter().map(|r| r.clinic_id.clone()).collect();

        let users: HashMap<String, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_all_reviews", e))?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        let clinics: HashMap<String, clinic::Model> = clinic::Entity::find()
            .filter(clinic::Column::Id.is_in(clinic_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_all_reviews", e))?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|r| {
                let author = r.user_id.as_ref().and_then(|id| users.get(id)).cloned();
                let clinic = clinics.get(&r.clinic_id).cloned();
                (r, author, clinic)
            })
            .collect())
    }

    /// Recompute the owning clinic's review count and mean rating from the
    /// underlying review rows and persist both onto the clinic record.
    pub async fn recompute_clinic_aggregate(&self, clinic_id: &str) -> Result<(), StoreError> {
        let ratings: Vec<i32> = review::Entity::find()
            .filter(review::Column::ClinicId.eq(clinic_id))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("recompute_clinic_aggregate", e))?
            .into_iter()
            .map(|r| r.rating)
            .collect();

        let review_count = ratings.len() as i32;
        let avg_rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
        };

        clinic::Entity::update_many()
            .col_expr(clinic::Column::AvgRating, Expr::value(avg_rating))
            .col_expr(clinic::Column::ReviewCount, Expr::value(review_count))
            .col_expr(
                clinic::Column::UpdatedAt,
                Expr::value(Utc::now().timestamp()),
            )
            .filter(clinic::Column::Id.eq(clinic_id))
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::database("recompute_clinic_aggregate", e))?;

        Ok(())
    }
}
