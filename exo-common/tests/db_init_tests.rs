//! Tests for database initialization and the ratings store
//!
//! - Automatic database creation on first run
//! - Reopening an existing database
//! - Insert + aggregate round trip through the ratings table

use exo_common::db::{aggregate_for_planet, init_database, insert_rating};
use exo_common::{AggregateStat, Error, RatingSubmission};
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("ratings.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("ratings.db");

    let pool1 = init_database(&db_path).await.unwrap();
    insert_rating(&pool1, &RatingSubmission::new("Kepler-452 b", 8))
        .await
        .unwrap();
    pool1.close().await;

    // Schema creation is idempotent and existing rows survive
    let pool2 = init_database(&db_path).await.unwrap();
    let stat = aggregate_for_planet(&pool2, "Kepler-452 b").await.unwrap();
    assert_eq!(stat.count, 1);
}

#[tokio::test]
async fn test_unrated_planet_reports_zero() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("ratings.db")).await.unwrap();

    let stat = aggregate_for_planet(&pool, "Nobody rated me").await.unwrap();
    assert_eq!(stat, AggregateStat { average: 0.0, count: 0 });
}

#[tokio::test]
async fn test_average_over_all_ratings() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("ratings.db")).await.unwrap();

    for rating in [10, 7, 4] {
        insert_rating(&pool, &RatingSubmission::new("TRAPPIST-1 e", rating))
            .await
            .unwrap();
    }
    insert_rating(&pool, &RatingSubmission::new("Proxima Cen b", 2))
        .await
        .unwrap();

    let stat = aggregate_for_planet(&pool, "TRAPPIST-1 e").await.unwrap();
    assert_eq!(stat.count, 3);
    assert!((stat.average - 7.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("ratings.db")).await.unwrap();

    let first = insert_rating(&pool, &RatingSubmission::new("TOI-700 d", 6))
        .await
        .unwrap();
    let second = insert_rating(&pool, &RatingSubmission::new("TOI-700 d", 9))
        .await
        .unwrap();

    assert_eq!(first.planet_name, "TOI-700 d");
    assert_eq!(first.rating, 6);
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_out_of_range_rating_not_stored() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("ratings.db")).await.unwrap();

    let result = insert_rating(&pool, &RatingSubmission::new("Earth", 11)).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    let stat = aggregate_for_planet(&pool, "Earth").await.unwrap();
    assert_eq!(stat.count, 0);
}
