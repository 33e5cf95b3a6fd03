//! End-to-end seeding runs against a live `PostgreSQL`.
//!
//! These tests require a reachable database; see the crate docs for
//! `DBSEEDER_TEST_DATABASE_URL`.

#![allow(clippy::unwrap_used)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use dbseeder::{SeedPlan, Seeder};
use dbseeder_integration_tests::TestDatabase;

fn small_plan() -> SeedPlan {
    SeedPlan {
        users: 10,
        addresses_per_user: 2,
        categories: 9,
        category_depth: 2,
        products: 20,
        images_per_product: 1,
        orders: 5,
        max_items_per_order: 3,
        reviews: 10,
        all: false,
    }
}

// ============================================================================
// Full Runs
// ============================================================================

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_small_plan_seeds_every_table() {
    let db = TestDatabase::create().await.unwrap();
    db.store.seed_sampling(42).await.unwrap();

    let report = Seeder::new(&db.store, StdRng::seed_from_u64(42))
        .run(&small_plan())
        .await
        .unwrap();

    assert_eq!(db.count("SELECT COUNT(*) FROM users").await.unwrap(), 10);
    assert_eq!(db.count("SELECT COUNT(*) FROM addresses").await.unwrap(), 20);
    assert_eq!(
        db.count("SELECT COUNT(*) FROM addresses WHERE is_default")
            .await
            .unwrap(),
        10
    );
    assert_eq!(
        db.count(
            "SELECT COUNT(*) FROM (SELECT user_id FROM addresses WHERE is_default \
             GROUP BY user_id HAVING COUNT(*) <> 1) t"
        )
        .await
        .unwrap(),
        0
    );
    assert_eq!(db.count("SELECT COUNT(*) FROM categories").await.unwrap(), 9);
    assert_eq!(
        db.count("SELECT COUNT(*) FROM categories WHERE parent_id IS NULL")
            .await
            .unwrap(),
        3
    );
    assert_eq!(db.count("SELECT COUNT(*) FROM products").await.unwrap(), 20);
    assert_eq!(db.count("SELECT COUNT(*) FROM product_images").await.unwrap(), 20);
    assert_eq!(db.count("SELECT COUNT(*) FROM orders").await.unwrap(), 5);

    let items = db.count("SELECT COUNT(*) FROM order_items").await.unwrap();
    assert!((5..=15).contains(&items), "{items} order items");
    assert_eq!(
        i64::try_from(report.orders.unwrap().items).unwrap(),
        items
    );

    let reviews = db.count("SELECT COUNT(*) FROM reviews").await.unwrap();
    assert!(reviews <= 10);
    assert_eq!(
        db.count(
            "SELECT COUNT(*) FROM (SELECT product_id, user_id FROM reviews \
             GROUP BY product_id, user_id HAVING COUNT(*) > 1) t"
        )
        .await
        .unwrap(),
        0
    );

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_order_totals_equal_line_items() {
    let db = TestDatabase::create().await.unwrap();
    let plan = SeedPlan {
        orders: 40,
        max_items_per_order: 5,
        ..small_plan()
    };

    Seeder::new(&db.store, StdRng::seed_from_u64(7))
        .run(&plan)
        .await
        .unwrap();

    let mismatched = db
        .count(
            "SELECT COUNT(*) FROM orders o WHERE o.total_amount <> \
             (SELECT SUM(i.quantity * i.price_per_unit) FROM order_items i WHERE i.order_id = o.id)",
        )
        .await
        .unwrap();
    assert_eq!(mismatched, 0);

    let stale_prices = db
        .count(
            "SELECT COUNT(*) FROM order_items i JOIN products p ON p.id = i.product_id \
             WHERE i.price_per_unit <> p.price",
        )
        .await
        .unwrap();
    assert_eq!(stale_prices, 0);

    let pending_tracked = db
        .count("SELECT COUNT(*) FROM orders WHERE status = 'Pending' AND tracking_number IS NOT NULL")
        .await
        .unwrap();
    assert_eq!(pending_tracked, 0);

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_category_depth_is_bounded() {
    let db = TestDatabase::create().await.unwrap();
    let plan = SeedPlan {
        users: 0,
        categories: 40,
        category_depth: 3,
        products: 0,
        orders: 0,
        reviews: 0,
        ..small_plan()
    };

    Seeder::new(&db.store, StdRng::seed_from_u64(3))
        .run(&plan)
        .await
        .unwrap();

    let deepest: i32 = sqlx::query_scalar(
        "WITH RECURSIVE tree AS ( \
             SELECT id, 1 AS depth FROM categories WHERE parent_id IS NULL \
             UNION ALL \
             SELECT c.id, t.depth + 1 FROM categories c JOIN tree t ON c.parent_id = t.id \
         ) SELECT MAX(depth) FROM tree",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert!(deepest <= 3);
    assert_eq!(db.count("SELECT COUNT(*) FROM categories").await.unwrap(), 40);

    db.drop_schema().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running PostgreSQL"]
async fn test_second_run_adds_more_rows() {
    let db = TestDatabase::create().await.unwrap();
    let plan = small_plan();

    Seeder::new(&db.store, StdRng::seed_from_u64(1))
        .run(&plan)
        .await
        .unwrap();
    Seeder::new(&db.store, StdRng::seed_from_u64(2))
        .run(&plan)
        .await
        .unwrap();

    assert_eq!(db.count("SELECT COUNT(*) FROM users").await.unwrap(), 20);
    assert_eq!(db.count("SELECT COUNT(*) FROM products").await.unwrap(), 40);

    db.drop_schema().await.unwrap();
}
