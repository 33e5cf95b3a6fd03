//! Storage boundary between the generators and the database.
//!
//! Generators talk to a [`SeedStore`]; [`PgStore`] is the `PostgreSQL`
//! implementation. Unit tests use an in-memory store instead.

#[cfg(test)]
pub(crate) mod memory;
mod postgres;
pub mod schema;

use std::collections::HashMap;
use std::future::Future;

use rust_decimal::Decimal;

use dbseeder_core::{
    AddressId, CategoryId, OrderId, OrderItemId, OrderStatus, PaymentMethod, Price, ProductId,
    ProductImageId, Rating, ReviewId, ShippingMethod, UserId,
};

use crate::error::StoreError;

pub use postgres::PgStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub user_id: UserId,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    /// `None` for a top-level category.
    pub parent_id: Option<CategoryId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub stock_quantity: i32,
    pub category_id: CategoryId,
    pub sku: String,
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductImage {
    pub product_id: ProductId,
    pub image_url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total_amount: Price,
    pub shipping_address_id: AddressId,
    pub billing_address_id: AddressId,
    pub payment_method: PaymentMethod,
    pub shipping_method: ShippingMethod,
    pub tracking_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u16,
    /// Product price at the time the order was generated.
    pub price_per_unit: Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub product_id: ProductId,
    pub user_id: UserId,
    pub rating: Rating,
    pub title: String,
    pub content: String,
}

/// Inserts and lookups used by the generators.
///
/// Every insert returns the generated primary key. Unique violations surface
/// as [`StoreError::UniqueViolation`] so callers can decide whether to retry
/// or skip.
pub trait SeedStore {
    fn insert_user(&self, user: &NewUser)
    -> impl Future<Output = Result<UserId, StoreError>> + Send;

    fn insert_address(
        &self,
        address: &NewAddress,
    ) -> impl Future<Output = Result<AddressId, StoreError>> + Send;

    fn insert_category(
        &self,
        category: &NewCategory,
    ) -> impl Future<Output = Result<CategoryId, StoreError>> + Send;

    fn insert_product(
        &self,
        product: &NewProduct,
    ) -> impl Future<Output = Result<ProductId, StoreError>> + Send;

    fn insert_product_image(
        &self,
        image: &NewProductImage,
    ) -> impl Future<Output = Result<ProductImageId, StoreError>> + Send;

    fn insert_order(
        &self,
        order: &NewOrder,
    ) -> impl Future<Output = Result<OrderId, StoreError>> + Send;

    fn insert_order_item(
        &self,
        item: &NewOrderItem,
    ) -> impl Future<Output = Result<OrderItemId, StoreError>> + Send;

    fn insert_review(
        &self,
        review: &NewReview,
    ) -> impl Future<Output = Result<ReviewId, StoreError>> + Send;

    /// Up to `limit` random user ids, without repeats.
    fn sample_user_ids(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<UserId>, StoreError>> + Send;

    /// Up to `limit` random category ids, without repeats.
    fn sample_category_ids(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<CategoryId>, StoreError>> + Send;

    /// Up to `limit` random product ids, without repeats.
    fn sample_product_ids(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ProductId>, StoreError>> + Send;

    /// One randomly chosen address for each of `users` that has any.
    fn address_per_user(
        &self,
        users: &[UserId],
    ) -> impl Future<Output = Result<HashMap<UserId, AddressId>, StoreError>> + Send;

    /// Current price of each of `products` that exists.
    fn product_prices(
        &self,
        products: &[ProductId],
    ) -> impl Future<Output = Result<HashMap<ProductId, Price>, StoreError>> + Send;
}
