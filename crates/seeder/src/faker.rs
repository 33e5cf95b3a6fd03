//! Random field values for generated rows.
//!
//! Every function draws from the caller's RNG, so a seeded [`StdRng`] makes
//! a whole run reproducible. Values come from fixed pick-lists, numeric
//! ranges, or the `fake` crate for person data.
//!
//! [`StdRng`]: rand::rngs::StdRng

use fake::Fake;
use fake::faker::internet::en::{FreeEmailProvider, Password};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::CellNumber;
use rand::Rng;
use rust_decimal::Decimal;

use dbseeder_core::{OrderStatus, PaymentMethod, Price, ProductId, Rating, ShippingMethod};

/// Length limit of `users.phone`.
const PHONE_MAX_LEN: usize = 20;

const EMAIL_TAG_SPACE: u32 = 100_000;

#[rustfmt::skip]
const CITIES: &[&str] = &[
    "New York", "Los Angeles", "Chicago", "Houston", "Phoenix",
    "Philadelphia", "San Antonio", "San Diego", "Dallas", "San Jose",
    "Austin", "Jacksonville", "Fort Worth", "Columbus", "San Francisco",
    "Charlotte", "Indianapolis", "Seattle", "Denver", "Washington",
    "Boston", "El Paso", "Nashville", "Detroit", "Portland",
    "Memphis", "Oklahoma City", "Las Vegas", "Louisville", "Baltimore",
];

#[rustfmt::skip]
const STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California",
    "Colorado", "Connecticut", "Delaware", "Florida", "Georgia",
    "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa",
    "Kansas", "Kentucky", "Louisiana", "Maine", "Maryland",
    "Massachusetts", "Michigan", "Minnesota", "Mississippi", "Missouri",
    "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey",
    "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio",
    "Oklahoma", "Oregon", "Pennsylvania", "Rhode Island", "South Carolina",
    "South Dakota", "Tennessee", "Texas", "Utah", "Vermont",
    "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

#[rustfmt::skip]
const COUNTRY_CODES: &[&str] = &[
    "US", "CA", "MX", "UK", "FR", "DE", "IT", "ES", "JP", "CN",
    "AU", "NZ", "BR", "AR", "CL", "RU", "IN", "ZA", "NG", "EG",
];

#[rustfmt::skip]
const PRODUCT_ADJECTIVES: &[&str] = &[
    "Premium", "Deluxe", "Luxury", "Basic", "Essential", "Professional",
    "Advanced", "Smart", "Ultra", "Super", "Mega", "Compact", "Portable",
    "Wireless", "Digital", "Analog", "Classic", "Modern", "Vintage", "Retro",
];

#[rustfmt::skip]
const PRODUCT_NOUNS: &[&str] = &[
    "Laptop", "Smartphone", "Tablet", "Headphones", "Speaker", "Camera",
    "Watch", "TV", "Monitor", "Keyboard", "Mouse", "Printer", "Scanner",
    "Router", "Charger", "Cable", "Adapter", "Case", "Stand", "Holder",
];

const PRODUCT_DESCRIPTIONS: &[&str] = &[
    "This high-quality product is designed to meet all your needs.",
    "Experience the ultimate performance with this innovative product.",
    "A reliable solution for everyday use with exceptional durability.",
    "Combining style and functionality in a compact design.",
    "The perfect balance of quality, performance, and value.",
    "Engineered for maximum efficiency and user satisfaction.",
    "A versatile product suitable for various applications.",
    "Featuring cutting-edge technology for superior results.",
    "Designed with user comfort and convenience in mind.",
    "A must-have addition to your collection of premium products.",
];

#[rustfmt::skip]
const REVIEW_TITLES: &[&str] = &[
    "Great product!", "Highly recommended", "Excellent value",
    "Not what I expected", "Could be better", "Amazing quality",
    "Disappointed", "Perfect for my needs", "Good but overpriced",
    "Exceeded expectations", "Just okay", "Very satisfied",
];

const REVIEW_CONTENTS: &[&str] = &[
    "I've been using this product for a few weeks now and I'm very satisfied with its performance and quality.",
    "This product exceeded my expectations in every way. The build quality is excellent and it works perfectly.",
    "While the product is good overall, I think it's a bit overpriced for what you get.",
    "I was disappointed with this purchase. The quality is not what I expected and it doesn't work as advertised.",
    "This is exactly what I was looking for. It's well-made, easy to use, and does the job perfectly.",
    "The product is okay, but there are better options available at this price point.",
    "I've tried many similar products, but this one is by far the best. Highly recommended!",
    "Great value for money. It's not perfect, but it gets the job done and is very affordable.",
    "I bought this as a gift and the recipient loved it. Great quality and nice packaging.",
    "The product arrived damaged, but customer service was excellent and sent a replacement right away.",
];

#[rustfmt::skip]
const CATEGORY_NAMES: &[&str] = &[
    "Electronics", "Clothing", "Home & Kitchen", "Books", "Sports & Outdoors",
    "Beauty & Personal Care", "Toys & Games", "Automotive", "Health & Wellness",
    "Jewelry", "Office Supplies", "Pet Supplies", "Food & Grocery", "Garden & Outdoor",
    "Baby Products", "Tools & Home Improvement", "Musical Instruments", "Arts & Crafts",
];

const CATEGORY_DESCRIPTIONS: &[&str] = &[
    "Find everything you need for your home and daily life.",
    "Quality products at affordable prices.",
    "The latest trends and innovations in this category.",
    "Essential items for every household.",
    "Premium selection of top-rated products.",
    "Discover new and exciting products in this category.",
    "Handpicked items to meet your specific needs.",
    "A wide range of products for every budget.",
    "Specialized products for enthusiasts and professionals.",
    "Everything you need in one convenient category.",
];

const IMAGE_BASE_URLS: &[&str] = &[
    "https://example.com/images/products/",
    "https://store.example.org/product-images/",
    "https://cdn.example.net/shop/items/",
    "https://images.example.io/catalog/",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".png", ".webp"];

const ORDER_NOTE: &str = "Please deliver to the front door.";

const SKU_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uniform pick. Every caller passes a non-empty constant list.
#[allow(clippy::indexing_slicing)]
fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// A fair coin flip.
pub fn boolean<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}

pub fn city<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, CITIES)
}

pub fn state<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, STATES)
}

/// Five-digit, zero-padded ZIP code.
pub fn zip<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:05}", rng.random_range(0..100_000u32))
}

pub fn country_abbr<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, COUNTRY_CODES)
}

/// `"{1..=1000} {city} St"`.
pub fn street_line<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.random_range(1..=1000u32);
    format!("{number} {} St", city(rng))
}

/// `"Apt {1..=100}"`.
pub fn apartment<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("Apt {}", rng.random_range(1..=100u32))
}

/// `first.last{0..100000}@provider`, lowercased.
///
/// The numeric tag keeps the space large enough that seeding tens of
/// thousands of users rarely collides.
pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = email_part(&first_name(rng));
    let last = email_part(&last_name(rng));
    let tag = rng.random_range(0..EMAIL_TAG_SPACE);
    let provider: String = FreeEmailProvider().fake_with_rng(rng);
    format!("{first}.{last}{tag}@{provider}").to_lowercase()
}

/// Name letters and digits only, so the local part stays a plain atom.
fn email_part(name: &str) -> String {
    name.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Plain random password. Stored as-is in `password_hash`; never a real credential.
pub fn password<R: Rng + ?Sized>(rng: &mut R) -> String {
    Password(12..24).fake_with_rng(rng)
}

pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    FirstName().fake_with_rng(rng)
}

pub fn last_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    LastName().fake_with_rng(rng)
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number: String = CellNumber().fake_with_rng(rng);
    number.chars().take(PHONE_MAX_LEN).collect()
}

/// Adjective + noun, e.g. `"Wireless Keyboard"`.
pub fn product_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = pick(rng, PRODUCT_ADJECTIVES);
    let noun = pick(rng, PRODUCT_NOUNS);
    format!("{adjective} {noun}")
}

pub fn product_description<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, PRODUCT_DESCRIPTIONS)
}

/// Three uppercase letters followed by five digits, e.g. `"QXA40219"`.
pub fn sku<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut sku: String = (0..3)
        .map(|_| char::from(pick(rng, SKU_LETTERS)))
        .collect();
    sku.push_str(&digits(rng, 5));
    sku
}

/// Uniform price in `[min, max]`, rounded to cents.
///
/// Falls back to `min` if the bounds cannot form a valid price.
pub fn price<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Price {
    let amount = rng.random_range(min..=max);
    Price::from_f64(amount)
        .or_else(|_| Price::from_f64(min))
        .unwrap_or(Price::ZERO)
}

/// Uniform weight in `[min, max]` with two decimal places.
pub fn weight<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Decimal {
    let value = rng.random_range(min..=max);
    Decimal::from_f64_retain(value)
        .unwrap_or_default()
        .round_dp(2)
}

/// `"W x H x D cm"`, each side between 1 and 51 with one decimal.
pub fn dimensions<R: Rng + ?Sized>(rng: &mut R) -> String {
    let width = rng.random_range(1.0..51.0);
    let height = rng.random_range(1.0..51.0);
    let depth = rng.random_range(1.0..51.0);
    format!("{width:.1} x {height:.1} x {depth:.1} cm")
}

pub fn order_status<R: Rng + ?Sized>(rng: &mut R) -> OrderStatus {
    pick(rng, OrderStatus::ALL)
}

pub fn payment_method<R: Rng + ?Sized>(rng: &mut R) -> PaymentMethod {
    pick(rng, PaymentMethod::ALL)
}

pub fn shipping_method<R: Rng + ?Sized>(rng: &mut R) -> ShippingMethod {
    pick(rng, ShippingMethod::ALL)
}

/// `"TRK"` followed by ten digits.
pub fn tracking_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("TRK{}", digits(rng, 10))
}

pub const fn order_note() -> &'static str {
    ORDER_NOTE
}

pub fn review_title<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, REVIEW_TITLES)
}

pub fn review_content<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, REVIEW_CONTENTS)
}

pub fn rating<R: Rng + ?Sized>(rng: &mut R) -> Rating {
    let stars = rng.random_range(Rating::MIN..=Rating::MAX);
    Rating::new(stars).unwrap_or(Rating::HIGHEST)
}

pub fn category_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, CATEGORY_NAMES)
}

pub fn category_description<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, CATEGORY_DESCRIPTIONS)
}

/// Image URL under one of the CDN hosts, e.g.
/// `"https://cdn.example.net/shop/items/42-3.webp"`.
pub fn image_url<R: Rng + ?Sized>(rng: &mut R, product_id: ProductId) -> String {
    let base = pick(rng, IMAGE_BASE_URLS);
    let extension = pick(rng, IMAGE_EXTENSIONS);
    let variant = rng.random_range(1..=5u32);
    format!("{base}{product_id}-{variant}{extension}")
}
