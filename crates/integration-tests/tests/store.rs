//! `PgStore` behaviour against a live `PostgreSQL`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use dbseeder::store::schema::{REVIEWS_PRODUCT_USER_KEY, TABLES, USERS_EMAIL_KEY};
use dbseeder::store::{NewCategory, NewProduct, NewReview, NewUser, SeedStore};
use dbseeder::{SeedError, StoreError};
use dbseeder_core::{Price, Rating, UserId};
use dbseeder_integration_tests::TestDatabase;

fn user(email: &str) -> NewUser {
    NewUser {
        email: email.to_owned(),
        password_hash: "not-a-hash".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        phone: "555-0100".to_owned(),
    }
}

fn product(category_id: dbseeder_core::CategoryId, sku: &str, price: &str) -> NewProduct {
    NewProduct {
        name: "Wireless Keyboard".to_owned(),
        description: "Test product".to_owned(),
        price: Price::new(price.parse().unwrap()).unwrap(),
        stock_quantity: 3,
        category_id,
        sku: sku.to_owned(),
        weight: None,
        dimensions: None,
    }
}

async fn category(db: &TestDatabase) -> dbseeder_core::CategoryId {
    db.store
        .insert_category(&NewCategory {
            name: "Books".to_owned(),
            description: "Test category".to_owned(),
            parent_id: None,
        })
        .await
        .unwrap()
}

// ============================================================================
// Schema
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_create_tables_is_idempotent() {
    let db = TestDatabase::create().await.unwrap();

    db.store.create_tables().await.unwrap();

    let counts = db.store.row_counts().await.unwrap();
    assert_eq!(counts.len(), TABLES.len());
    assert!(counts.iter().all(|(_, rows)| *rows == 0));

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_rating_check_constraint() {
    let db = TestDatabase::create().await.unwrap();
    let user_id = db.store.insert_user(&user("c@example.com")).await.unwrap();
    let category_id = category(&db).await;
    let product_id = db
        .store
        .insert_product(&product(category_id, "CHK00001", "5.00"))
        .await
        .unwrap();

    let err = sqlx::query(
        "INSERT INTO reviews (product_id, user_id, rating, title, content) VALUES ($1, $2, 6, 't', 'c')",
    )
    .bind(product_id)
    .bind(user_id)
    .execute(db.pool())
    .await
    .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.kind(), sqlx::error::ErrorKind::CheckViolation);
        }
        other => panic!("expected a database error, got {other}"),
    }

    db.drop_schema().await.unwrap();
}

// ============================================================================
// Unique Violations
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_duplicate_email_is_classified() {
    let db = TestDatabase::create().await.unwrap();

    db.store.insert_user(&user("dup@example.com")).await.unwrap();
    let err = db
        .store
        .insert_user(&user("dup@example.com"))
        .await
        .unwrap_err();

    assert!(err.is_unique_violation_of(USERS_EMAIL_KEY), "{err}");

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_duplicate_review_pair_is_classified() {
    let db = TestDatabase::create().await.unwrap();
    let user_id = db.store.insert_user(&user("r@example.com")).await.unwrap();
    let category_id = category(&db).await;
    let product_id = db
        .store
        .insert_product(&product(category_id, "ABC12345", "10.00"))
        .await
        .unwrap();
    let review = NewReview {
        product_id,
        user_id,
        rating: Rating::new(4).unwrap(),
        title: "Great product!".to_owned(),
        content: "Works.".to_owned(),
    };

    db.store.insert_review(&review).await.unwrap();
    let err = db.store.insert_review(&review).await.unwrap_err();

    assert!(err.is_unique_violation_of(REVIEWS_PRODUCT_USER_KEY), "{err}");

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_duplicate_sku_is_not_a_recoverable_key() {
    let db = TestDatabase::create().await.unwrap();
    let category_id = category(&db).await;

    db.store
        .insert_product(&product(category_id, "SKU00001", "1.00"))
        .await
        .unwrap();
    let err = db
        .store
        .insert_product(&product(category_id, "SKU00001", "2.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::UniqueViolation { .. }));
    assert!(!err.is_unique_violation_of(USERS_EMAIL_KEY));
    assert!(!err.is_unique_violation_of(REVIEWS_PRODUCT_USER_KEY));

    db.drop_schema().await.unwrap();
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_product_prices_round_trip_exactly() {
    let db = TestDatabase::create().await.unwrap();
    let category_id = category(&db).await;
    let cheap = db
        .store
        .insert_product(&product(category_id, "AAA00001", "9.99"))
        .await
        .unwrap();
    let dear = db
        .store
        .insert_product(&product(category_id, "AAA00002", "999.99"))
        .await
        .unwrap();

    let prices = db.store.product_prices(&[cheap, dear]).await.unwrap();

    assert_eq!(prices.len(), 2);
    assert_eq!(prices[&cheap].to_string(), "9.99");
    assert_eq!(prices[&dear].to_string(), "999.99");

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_address_per_user_omits_users_without_addresses() {
    let db = TestDatabase::create().await.unwrap();
    let with = db.store.insert_user(&user("a@example.com")).await.unwrap();
    let without = db.store.insert_user(&user("b@example.com")).await.unwrap();
    sqlx::query(
        "INSERT INTO addresses (user_id, address_line1, city, state, postal_code, country) \
         VALUES ($1, '1 Main St', 'Austin', 'Texas', '73301', 'US')",
    )
    .bind(with)
    .execute(db.pool())
    .await
    .unwrap();

    let found = db
        .store
        .address_per_user(&[with, without, UserId::new(9999)])
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert!(found.contains_key(&with));

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_sampling_respects_limit() {
    let db = TestDatabase::create().await.unwrap();
    for n in 0..5 {
        db.store
            .insert_user(&user(&format!("u{n}@example.com")))
            .await
            .unwrap();
    }

    assert_eq!(db.store.sample_user_ids(3).await.unwrap().len(), 3);
    assert_eq!(db.store.sample_user_ids(50).await.unwrap().len(), 5);
    assert!(db.store.sample_product_ids(10).await.unwrap().is_empty());

    db.drop_schema().await.unwrap();
}

// ============================================================================
// Connection Errors
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_bad_credentials_fail_to_connect() {
    let config = dbseeder::DatabaseConfig {
        host: "localhost".to_owned(),
        port: 5433,
        user: "nobody".to_owned(),
        password: "wrong".to_owned().into(),
        dbname: "shared_db".to_owned(),
        ssl_mode: sqlx::postgres::PgSslMode::Disable,
    };

    let err = dbseeder::PgStore::connect(&config).await.unwrap_err();

    assert!(matches!(err, SeedError::Connection(_)));
}
