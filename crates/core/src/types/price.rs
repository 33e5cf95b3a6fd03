//! Monetary amounts stored in `DECIMAL(10, 2)` columns.
//!
//! Order totals are sums of `quantity * unit price`. Doing that arithmetic in
//! [`Decimal`] keeps the stored total exactly equal to the sum of its stored
//! line items.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of decimal places kept for every price.
pub const PRICE_SCALE: u32 = 2;

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input was NaN or infinite.
    #[error("price must be a finite number")]
    NotFinite,
    /// The input was below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount with two decimal places.
///
/// ## Examples
///
/// ```
/// use dbseeder_core::Price;
///
/// let unit = Price::from_f64(19.994).unwrap();
/// assert_eq!(unit.to_string(), "19.99");
/// assert_eq!(unit.times(3).to_string(), "59.97");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Build a price from a decimal, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        let mut amount = amount.round_dp(PRICE_SCALE);
        amount.rescale(PRICE_SCALE);
        Ok(Self(amount))
    }

    /// Build a price from a float, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::NotFinite`] for NaN or infinity and
    /// [`PriceError::Negative`] for amounts below zero.
    pub fn from_f64(amount: f64) -> Result<Self, PriceError> {
        let decimal = Decimal::from_f64_retain(amount).ok_or(PriceError::NotFinite)?;
        Self::new(decimal)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Subtotal for `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(Price::from_f64(9.994).unwrap().to_string(), "9.99");
        assert_eq!(Price::from_f64(9.996).unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(Price::from_f64(-0.5), Err(PriceError::Negative));
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(Price::from_f64(f64::NAN), Err(PriceError::NotFinite));
        assert_eq!(Price::from_f64(f64::INFINITY), Err(PriceError::NotFinite));
    }

    #[test]
    fn test_sum_of_subtotals_is_exact() {
        let a = Price::from_f64(0.1).unwrap();
        let b = Price::from_f64(0.2).unwrap();
        let total: Price = [a.times(3), b.times(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(50, 2));
    }

    #[test]
    fn test_serializes_as_string() {
        let price = Price::from_f64(12.5).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"12.50\"");
    }
}
