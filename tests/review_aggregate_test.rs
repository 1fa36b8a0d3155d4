mod common;

use clinicseek_backend::services::credentials;
use clinicseek_backend::stores::{ClinicStore, IdentityStore, ReviewStore};

#[tokio::test]
async fn test_aggregate_tracks_review_mutations() {
    let db = common::setup_test_db().await;
    let clinic_store = ClinicStore::new(db.clone());
    let review_store = ReviewStore::new(db.clone());

    let clinic = common::seed_clinic(&db, "Sunrise Clinic", "pw").await;

    let first = review_store
        .create(clinic.id.clone(), None, "Great".to_string(), 5)
        .await
        .unwrap();
    review_store
        .create(clinic.id.clone(), None, "Fine".to_string(), 2)
        .await
        .unwrap();
    review_store
        .recompute_clinic_aggregate(&clinic.id)
        .await
        .unwrap();

    let refreshed = clinic_store.find_by_id(&clinic.id).await.unwrap().unwrap();
    assert_eq!(refreshed.review_count, 2);
    assert!((refreshed.avg_rating - 3.5).abs() < f64::EPSILON);

    // Deleting a review shifts the mean
    review_store.delete(&first.id).await.unwrap().unwrap();
    review_store
        .recompute_clinic_aggregate(&clinic.id)
        .await
        .unwrap();
    let refreshed = clinic_store.find_by_id(&clinic.id).await.unwrap().unwrap();
    assert_eq!(refreshed.review_count, 1);
    assert!((refreshed.avg_rating - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_clinic_detail_includes_review_authors() {
    let db = common::setup_test_db().await;
    let clinic_store = ClinicStore::new(db.clone());
    let review_store = ReviewStore::new(db.clone());
    let identity_store = IdentityStore::new(db.clone());

    let clinic = common::seed_clinic(&db, "Sunrise Clinic", "pw").await;
    common::seed_doctor(&db, &clinic.id).await;

    let password_hash = credentials::hash_password("pw").unwrap();
    let author = identity_store
        .create_user(
            "Alex".to_string(),
            "alex@example.com".to_string(),
            password_hash,
            None,
        )
        .await
        .unwrap();

    review_store
        .create(
            clinic.id.clone(),
            Some(author.id.clone()),
            "Great staff".to_string(),
            4,
        )
        .await
        .unwrap();

    let detail = clinic_store.detail(&clinic.id).await.unwrap().unwrap();
    assert_eq!(detail.doctors.len(), 1);
    assert_eq!(detail.reviews.len(), 1);
    let (review, review_author) = &detail.reviews[0];
    assert_eq!(review.content, "Great staff");
    assert_eq!(review_author.as_ref().unwrap().id, author.id);
}

#[tokio::test]
async fn test_reviews_list_populates_clinic_and_author() {
    let db = common::setup_test_db().await;
    let review_store = ReviewStore::new(db.clone());

    let clinic = common::seed_clinic(&db, "Sunrise Clinic", "pw").await;
    review_store
        .create(clinic.id.clone(), None, "Anonymous note".to_string(), 3)
        .await
        .unwrap();

    let all = review_store.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    let (review, author, populated_clinic) = &all[0];
    assert_eq!(review.rating, 3);
    assert!(author.is_none());
    assert_eq!(populated_clinic.as_ref().unwrap().id, clinic.id);
}
