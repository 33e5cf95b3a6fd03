//! Table definitions for the seeded e-commerce schema.

use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::error::SeedError;

/// Unique constraint on `users.email`.
pub const USERS_EMAIL_KEY: &str = "users_email_key";

/// Unique constraint on `reviews (product_id, user_id)`.
pub const REVIEWS_PRODUCT_USER_KEY: &str = "reviews_product_id_user_id_key";

/// A table and its idempotent `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub name: &'static str,
    pub ddl: &'static str,
}

pub const USERS: Table = Table {
    name: "users",
    ddl: "CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        email VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        phone VARCHAR(20),
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
        CONSTRAINT users_email_key UNIQUE (email)
    )",
};

pub const ADDRESSES: Table = Table {
    name: "addresses",
    ddl: "CREATE TABLE IF NOT EXISTS addresses (
        id SERIAL PRIMARY KEY,
        user_id INT NOT NULL REFERENCES users(id),
        address_line1 VARCHAR(255) NOT NULL,
        address_line2 VARCHAR(255),
        city VARCHAR(100) NOT NULL,
        state VARCHAR(100) NOT NULL,
        postal_code VARCHAR(20) NOT NULL,
        country VARCHAR(100) NOT NULL,
        is_default BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const CATEGORIES: Table = Table {
    name: "categories",
    ddl: "CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        description TEXT,
        parent_id INT REFERENCES categories(id),
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const PRODUCTS: Table = Table {
    name: "products",
    ddl: "CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT NOT NULL,
        price DECIMAL(10, 2) NOT NULL,
        stock_quantity INT NOT NULL,
        category_id INT NOT NULL REFERENCES categories(id),
        sku VARCHAR(50) UNIQUE NOT NULL,
        weight DECIMAL(8, 2),
        dimensions VARCHAR(50),
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const PRODUCT_IMAGES: Table = Table {
    name: "product_images",
    ddl: "CREATE TABLE IF NOT EXISTS product_images (
        id SERIAL PRIMARY KEY,
        product_id INT NOT NULL REFERENCES products(id),
        image_url VARCHAR(255) NOT NULL,
        is_primary BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const ORDERS: Table = Table {
    name: "orders",
    ddl: "CREATE TABLE IF NOT EXISTS orders (
        id SERIAL PRIMARY KEY,
        user_id INT NOT NULL REFERENCES users(id),
        status VARCHAR(50) NOT NULL,
        total_amount DECIMAL(10, 2) NOT NULL,
        shipping_address_id INT NOT NULL REFERENCES addresses(id),
        billing_address_id INT NOT NULL REFERENCES addresses(id),
        payment_method VARCHAR(50) NOT NULL,
        shipping_method VARCHAR(50) NOT NULL,
        tracking_number VARCHAR(100),
        notes TEXT,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const ORDER_ITEMS: Table = Table {
    name: "order_items",
    ddl: "CREATE TABLE IF NOT EXISTS order_items (
        id SERIAL PRIMARY KEY,
        order_id INT NOT NULL REFERENCES orders(id),
        product_id INT NOT NULL REFERENCES products(id),
        quantity INT NOT NULL,
        price_per_unit DECIMAL(10, 2) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW()
    )",
};

pub const REVIEWS: Table = Table {
    name: "reviews",
    ddl: "CREATE TABLE IF NOT EXISTS reviews (
        id SERIAL PRIMARY KEY,
        product_id INT NOT NULL REFERENCES products(id),
        user_id INT NOT NULL REFERENCES users(id),
        rating INT NOT NULL CHECK (rating BETWEEN 1 AND 5),
        title VARCHAR(255) NOT NULL,
        content TEXT NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
        CONSTRAINT reviews_product_id_user_id_key UNIQUE (product_id, user_id)
    )",
};

/// Every table, parents before children.
pub const TABLES: [Table; 8] = [
    USERS,
    ADDRESSES,
    CATEGORIES,
    PRODUCTS,
    PRODUCT_IMAGES,
    ORDERS,
    ORDER_ITEMS,
    REVIEWS,
];

/// Create any missing table. Safe to run against an existing schema.
///
/// Stops at the first failing statement; tables created before it are kept.
///
/// # Errors
///
/// Returns [`SeedError::Schema`] naming the table whose statement failed.
#[instrument(skip(pool))]
pub async fn create_tables(pool: &PgPool) -> Result<(), SeedError> {
    for table in TABLES {
        debug!(table = table.name, "Ensuring table exists");
        sqlx::query(table.ddl)
            .execute(pool)
            .await
            .map_err(|source| SeedError::Schema {
                table: table.name,
                source,
            })?;
    }
    info!(tables = TABLES.len(), "Database schema initialized");
    Ok(())
}
