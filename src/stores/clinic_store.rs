use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::errors::StoreError;
use crate::types::db::{
    clinic, clinic_doctor, clinic_service, clinic_specialization, doctor, doctor_specialization,
    qualification, review, service, specialization, user,
};

/// Clinic with its specialization and service tags resolved
#[derive(Debug)]
pub struct ClinicRecord {
    pub clinic: clinic::Model,
    pub specializations: Vec<specialization::Model>,
    pub services: Vec<service::Model>,
}

/// Doctor with qualification and specializations resolved
#[derive(Debug)]
pub struct DoctorRecord {
    pub doctor: doctor::Model,
    pub qualification: Option<qualification::Model>,
    pub specializations: Vec<specialization::Model>,
}

/// Everything shown on a clinic's detail page
#[derive(Debug)]
pub struct ClinicDetailRecord {
    pub clinic: ClinicRecord,
    pub doctors: Vec<DoctorRecord>,
    pub reviews: Vec<(review::Model, Option<user::Model>)>,
}

/// ClinicStore serves the public clinic directory
pub struct ClinicStore {
    db: DatabaseConnection,
}

impl ClinicStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<clinic::Model>, StoreError> {
        clinic::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StoreError::database("find_clinic_by_id", e))
    }

    /// Paginated directory listing, newest first
    pub async fn list(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<ClinicRecord>, u64), StoreError> {
        let total = clinic::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| StoreError::database("list_clinics", e))?;

        let offset = limit * (page.saturating_sub(1));
        let clinics = clinic::Entity::find()
            .order_by_desc(clinic::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("list_clinics", e))?;

        let records = self.attach_tags(clinics).await?;
        Ok((records, total))
    }

    /// Clinics tagged with the named specialization. The match is
    /// case-insensitive and exact ("dentist" matches "Dentist", not
    /// "Dental Surgery").
    pub async fn search_by_specialization(
        &self,
        name: &str,
    ) -> Result<Vec<ClinicRecord>, StoreError> {
        let wanted = name.to_lowercase();
        let matching_spec_ids: Vec<String> = self
            .all_specializations()
            .await?
            .into_iter()
            .filter(|s| s.name.to_lowercase() == wanted)
            .map(|s| s.id)
            .collect();

        if matching_spec_ids.is_empty() {
            return Ok(Vec::new());
        }

        let clinic_ids: Vec<String> = clinic_specialization::Entity::find()
            .filter(clinic_specialization::Column::SpecializationId.is_in(matching_spec_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("search_by_specialization", e))?
            .into_iter()
            .map(|link| link.clinic_id)
            .collect();

        let clinics = clinic::Entity::find()
            .filter(clinic::Column::Id.is_in(clinic_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("search_by_specialization", e))?;

        self.attach_tags(clinics).await
    }

    /// Full specialization catalogue
    pub async fn all_specializations(&self) -> Result<Vec<specialization::Model>, StoreError> {
        specialization::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("all_specializations", e))
    }

    /// Clinic detail: tags, doctors (with qualification and
    /// specializations) and reviews (with their authors)
    pub async fn detail(&self, id: &str) -> Result<Option<ClinicDetailRecord>, StoreError> {
        let Some(clinic) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut records = self.attach_tags(vec![clinic]).await?;
        let clinic_record = records.remove(0);

        let doctors = self.doctors_of(id).await?;
        let reviews = self.reviews_of(id).await?;

        Ok(Some(ClinicDetailRecord {
            clinic: clinic_record,
            doctors,
            reviews,
        }))
    }

    async fn doctors_of(&self, clinic_id: &str) -> Result<Vec<DoctorRecord>, StoreError> {
        let doctor_ids: Vec<String> = clinic_doctor::Entity::find()
            .filter(clinic_doctor::Column::ClinicId.eq(clinic_id))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("doctors_of", e))?
            .into_iter()
            .map(|link| link.doctor_id)
            .collect();

        if doctor_ids.is_empty() {
            return Ok(Vec::new());
        }

        let doctors = doctor::Entity::find()
            .filter(doctor::Column::Id.is_in(doctor_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("doctors_of", e))?;

        let qualification_ids: Vec<String> = doctors
            .iter()
            .map(|d| d.qualification_id.clone())
            .collect();
        let qualifications: HashMap<String, qualification::Model> = qualification::Entity::find()
            .filter(qualification::Column::Id.is_in(qualification_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("doctors_of", e))?
            .into_iter()
            .map(|q| (q.id.clone(), q))
            .collect();

        let spec_links = doctor_specialization::Entity::find()
            .filter(doctor_specialization::Column::DoctorId.is_in(doctor_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("doctors_of", e))?;
        let specializations = self
            .specializations_by_id(spec_links.iter().map(|l| l.specialization_id.clone()))
            .await?;

        let mut specs_per_doctor: HashMap<String, Vec<specialization::Model>> = HashMap::new();
        for link in spec_links {
            if let Some(spec) = specializations.get(&link.specialization_id) {
                specs_per_doctor
                    .entry(link.doctor_id)
                    .or_default()
                    .push(spec.clone());
            }
        }

        Ok(doctors
            .into_iter()
            .map(|d| DoctorRecord {
                qualification: qualifications.get(&d.qualification_id).cloned(),
                specializations: specs_per_doctor.remove(&d.id).unwrap_or_default(),
                doctor: d,
            })
            .collect())
    }

    async fn reviews_of(
        &self,
        clinic_id: &str,
    ) -> Result<Vec<(review::Model, Option<user::Model>)>, StoreError> {
        let reviews = review::Entity::find()
            .filter(review::Column::ClinicId.eq(clinic_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("reviews_of", e))?;

        let user_ids: Vec<String> = reviews.iter().filter_map(|r| r.user_id.clone()).collect();
        let users: HashMap<String, user::Model> = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("reviews_of", e))?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|r| {
                let author = r.user_id.as_ref().and_then(|id| users.get(id)).cloned();
                (r, author)
            })
            .collect())
    }

    /// Resolve specialization and service tags for a batch of clinics
    async fn attach_tags(
        &self,
        clinics: Vec<clinic::Model>,
    ) -> Result<Vec<ClinicRecord>, StoreError> {
        let clinic_ids: Vec<String> = clinics.iter().map(|c| c.id.clone()).collect();

        let spec_links = clinic_specialization::Entity::find()
            .filter(clinic_specialization::Column::ClinicId.is_in(clinic_ids.clone()))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("attach_tags", e))?;
        let specializations = self
            .specializations_by_id(spec_links.iter().map(|l| l.specialization_id.clone()))
            .await?;

        let service_links = clinic_service::Entity::find()
            .filter(clinic_service::Column::ClinicId.is_in(clinic_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("attach_tags", e))?;
        let service_ids: Vec<String> =
            service_links.iter().map(|l| l.service_id.clone()).collect();
        let services: HashMap<String, service::Model> = service::Entity::find()
            .filter(service::Column::Id.is_in(service_ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("attach_tags", e))?
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let mut specs_per_clinic: HashMap<String, Vec<specialization::Model>> = HashMap::new();
        for link in spec_links {
            if let Some(spec) = specializations.get(&link.specialization_id) {
                specs_per_clinic
                    .entry(link.clinic_id)
                    .or_default()
                    .push(spec.clone());
            }
        }

        let mut services_per_clinic: HashMap<String, Vec<service::Model>> = HashMap::new();
        for link in service_links {
            if let Some(svc) = services.get(&link.service_id) {
                services_per_clinic
                    .entry(link.clinic_id)
                    .or_default()
                    .push(svc.clone());
            }
        }

        Ok(clinics
            .into_iter()
            .map(|c| ClinicRecord {
                specializations: specs_per_clinic.remove(&c.id).unwrap_or_default(),
                services: services_per_clinic.remove(&c.id).unwrap_or_default(),
                clinic: c,
            })
            .collect())
    }

    async fn specializations_by_id(
        &self,
        ids: impl Iterator<Item = String>,
    ) -> Result<HashMap<String, specialization::Model>, StoreError> {
        let ids: Vec<String> = ids.collect();
        let specs = specialization::Entity::find()
            .filter(specialization::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| StoreError::database("specializations_by_id", e))?;
        Ok(specs.into_iter().map(|s| (s.id.clone(), s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, Set};
    use uuid::Uuid;

    async fn setup() -> ClinicStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        ClinicStore::new(db)
    }

    async fn seed_clinic(store: &ClinicStore, name: &str) -> clinic::Model {
        let now = Utc::now().timestamp();
        clinic::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            email: Set(format!("{}@example.com", Uuid::new_v4())),
            password: Set("pw".to_string()),
            address: Set("1 Main St".to_string()),
            start_working_time: Set("08:00".to_string()),
            end_working_time: Set("17:00".to_string()),
            languages: Set("[\"English\",\"Vietnamese\"]".to_string()),
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
        .insert(&store.db)
        .await
        .expect("Failed to seed clinic")
    }

    async fn seed_specialization(store: &ClinicStore, name: &str) -> specialization::Model {
        specialization::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
        }
        .insert(&store.db)
        .await
        .expect("Failed to seed specialization")
    }

    async fn tag_clinic(store: &ClinicStore, clinic_id: &str, spec_id: &str) {
        clinic_specialization::ActiveModel {
            clinic_id: Set(clinic_id.to_string()),
            specialization_id: Set(spec_id.to_string()),
        }
        .insert(&store.db)
        .await
        .expect("Failed to tag clinic");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_exact_match() {
        let store = setup().await;
        let dentist = seed_specialization(&store, "Dentist").await;
        let derm = seed_specialization(&store, "Dermatology").await;

        let tagged = seed_clinic(&store, "Smile Clinic").await;
        let other = seed_clinic(&store, "Skin Clinic").await;
        tag_clinic(&store, &tagged.id, &dentist.id).await;
        tag_clinic(&store, &other.id, &derm.id).await;

        let results = store.search_by_specialization("dentist").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].clinic.id, tagged.id);
        assert_eq!(results[0].specializations.len(), 1);

        // Substrings do not match
        let none = store.search_by_specialization("dent").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_paginates_and_counts() {
        let store = setup().await;
        for i in 0..3 {
            seed_clinic(&store, &format!("Clinic {}", i)).await;
        }

        let (page1, total) = store.list(1, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page1.len(), 2);

        let (page2, _) = store.list(2, 2).await.unwrap();
        assert_eq!(page2.len(), 1);
    }

    #[tokio::test]
    async fn test_detail_returns_none_for_unknown_clinic() {
        let store = setup().await;

        let detail = store.detail("no-such-clinic").await.unwrap();

        assert!(detail.is_none());
    }

    #[tokio::test]
    async fn test_detail_populates_tags() {
        let store = setup().await;
        let spec = seed_specialization(&store, "Cardiology").await;
        let clinic = seed_clinic(&store, "Heart Clinic").await;
        tag_clinic(&store, &clinic.id, &spec.id).await;

        let detail = store.detail(&clinic.id).await.unwrap().unwrap();

        assert_eq!(detail.clinic.clinic.id, clinic.id);
        assert_eq!(detail.clinic.specializations.len(), 1);
        assert_eq!(detail.clinic.specializations[0].name, "Cardiology");
        assert!(detail.doctors.is_empty());
        assert!(detail.reviews.is_empty());
    }
}
