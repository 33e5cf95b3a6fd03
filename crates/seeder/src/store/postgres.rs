//! `PostgreSQL` implementation of [`SeedStore`].

use std::collections::HashMap;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};
use tracing::{debug, instrument};

use dbseeder_core::{
    AddressId, CategoryId, OrderId, OrderItemId, Price, ProductId, ProductImageId, ReviewId,
    UserId,
};

use super::schema::{self, TABLES};
use super::{
    NewAddress, NewCategory, NewOrder, NewOrderItem, NewProduct, NewProductImage, NewReview,
    NewUser, SeedStore,
};
use crate::config::DatabaseConfig;
use crate::error::{SeedError, StoreError};

/// Bind parameters per `IN (...)` query. `PostgreSQL` allows at most 65535.
const ID_CHUNK: usize = 10_000;

/// Seeding store backed by a single-connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect with one long-lived connection, so session state such as the
    /// `setseed` value applies to every later query.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Connection`] if the server cannot be reached.
    #[instrument(skip_all, fields(host = %config.host, port = config.port, dbname = %config.dbname))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, SeedError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(config.connect_options())
            .await
            .map_err(SeedError::Connection)?;
        debug!("Connected to database");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create any missing table.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::Schema`] if a `CREATE TABLE` fails.
    pub async fn create_tables(&self) -> Result<(), SeedError> {
        schema::create_tables(&self.pool).await
    }

    /// Seed the server-side generator behind `ORDER BY RANDOM()`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the statement fails.
    pub async fn seed_sampling(&self, seed: u64) -> Result<(), StoreError> {
        let fraction = f64::from(u32::try_from(seed % 1_000_000).unwrap_or(0)) / 1_000_000.0;
        sqlx::query("SELECT setseed($1)")
            .bind(fraction)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Number of rows in each seeded table, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if a count fails.
    pub async fn row_counts(&self) -> Result<Vec<(&'static str, i64)>, StoreError> {
        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let sql = format!("SELECT COUNT(*) FROM {}", table.name);
            let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
            counts.push((table.name, count));
        }
        Ok(counts)
    }

    async fn sample_ids<T>(&self, table: &'static str, limit: usize) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> sqlx::Decode<'r, Postgres> + Type<Postgres> + Send + Unpin,
    {
        let sql = format!("SELECT id FROM {table} ORDER BY RANDOM() LIMIT $1");
        let ids = sqlx::query_scalar(&sql)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}

/// Append `(id1, id2, ...)` with every id as a bound parameter.
fn push_id_list<'args, T>(builder: &mut QueryBuilder<'args, Postgres>, ids: &[T])
where
    T: 'args + Encode<'args, Postgres> + Type<Postgres> + Copy,
{
    builder.push("(");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

impl SeedStore for PgStore {
    async fn insert_user(&self, user: &NewUser) -> Result<UserId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO users (email, password_hash, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_address(&self, address: &NewAddress) -> Result<AddressId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO addresses (
                user_id, address_line1, address_line2, city, state,
                postal_code, country, is_default
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(address.user_id)
        .bind(&address.line1)
        .bind(address.line2.as_deref())
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.postal_code)
        .bind(&address.country)
        .bind(address.is_default)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_category(&self, category: &NewCategory) -> Result<CategoryId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO categories (name, description, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.parent_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<ProductId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO products (
                name, description, price, stock_quantity, category_id,
                sku, weight, dimensions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock_quantity)
        .bind(product.category_id)
        .bind(&product.sku)
        .bind(product.weight)
        .bind(product.dimensions.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_product_image(
        &self,
        image: &NewProductImage,
    ) -> Result<ProductImageId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO product_images (product_id, image_url, is_primary)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(image.product_id)
        .bind(&image.image_url)
        .bind(image.is_primary)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO orders (
                user_id, status, total_amount, shipping_address_id, billing_address_id,
                payment_method, shipping_method, tracking_number, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            ",
        )
        .bind(order.user_id)
        .bind(order.status.as_str())
        .bind(order.total_amount)
        .bind(order.shipping_address_id)
        .bind(order.billing_address_id)
        .bind(order.payment_method.as_str())
        .bind(order.shipping_method.as_str())
        .bind(order.tracking_number.as_deref())
        .bind(order.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_order_item(&self, item: &NewOrderItem) -> Result<OrderItemId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO order_items (order_id, product_id, quantity, price_per_unit)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(i32::from(item.quantity))
        .bind(item.price_per_unit)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<ReviewId, StoreError> {
        let id = sqlx::query_scalar(
            r"
            INSERT INTO reviews (product_id, user_id, rating, title, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(review.product_id)
        .bind(review.user_id)
        .bind(i32::from(review.rating))
        .bind(&review.title)
        .bind(&review.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn sample_user_ids(&self, limit: usize) -> Result<Vec<UserId>, StoreError> {
        self.sample_ids("users", limit).await
    }

    async fn sample_category_ids(&self, limit: usize) -> Result<Vec<CategoryId>, StoreError> {
        self.sample_ids("categories", limit).await
    }

    async fn sample_product_ids(&self, limit: usize) -> Result<Vec<ProductId>, StoreError> {
        self.sample_ids("products", limit).await
    }

    async fn address_per_user(
        &self,
        users: &[UserId],
    ) -> Result<HashMap<UserId, AddressId>, StoreError> {
        let mut addresses = HashMap::with_capacity(users.len());
        for chunk in users.chunks(ID_CHUNK) {
            let mut builder = QueryBuilder::<Postgres>::new(
                "SELECT DISTINCT ON (user_id) user_id, id FROM addresses WHERE user_id IN ",
            );
            push_id_list(&mut builder, chunk);
            builder.push(" ORDER BY user_id, RANDOM()");
            let rows: Vec<(UserId, AddressId)> =
                builder.build_query_as().fetch_all(&self.pool).await?;
            addresses.extend(rows);
        }
        Ok(addresses)
    }

    async fn product_prices(
        &self,
        products: &[ProductId],
    ) -> Result<HashMap<ProductId, Price>, StoreError> {
        let mut prices = HashMap::with_capacity(products.len());
        for chunk in products.chunks(ID_CHUNK) {
            let mut builder =
                QueryBuilder::<Postgres>::new("SELECT id, price FROM products WHERE id IN ");
            push_id_list(&mut builder, chunk);
            let rows: Vec<(ProductId, Price)> =
                builder.build_query_as().fetch_all(&self.pool).await?;
            prices.extend(rows);
        }
        Ok(prices)
    }
}
