//! Order status, payment method and shipping method.
//!
//! All three are stored as `VARCHAR(50)` text using the human-readable labels
//! below, e.g. `"Cash on Delivery"`.

use serde::{Deserialize, Serialize};

/// Implements `ALL`, `as_str`, `Display` and `FromStr` for a label enum.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The text stored in the database.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", $kind, ": {}"), s)),
                }
            }
        }
    };
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

labelled_enum!(OrderStatus, "order status", {
    Pending => "Pending",
    Processing => "Processing",
    Shipped => "Shipped",
    Delivered => "Delivered",
    Cancelled => "Cancelled",
    Refunded => "Refunded",
});

impl OrderStatus {
    /// Whether a carrier tracking number can exist for this status.
    #[must_use]
    pub const fn may_have_tracking(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// How an order was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    PayPal,
    ApplePay,
    GooglePay,
    BankTransfer,
    CashOnDelivery,
}

labelled_enum!(PaymentMethod, "payment method", {
    CreditCard => "Credit Card",
    DebitCard => "Debit Card",
    PayPal => "PayPal",
    ApplePay => "Apple Pay",
    GooglePay => "Google Pay",
    BankTransfer => "Bank Transfer",
    CashOnDelivery => "Cash on Delivery",
});

/// How an order is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingMethod {
    Standard,
    Express,
    NextDay,
    TwoDay,
    Free,
    International,
}

labelled_enum!(ShippingMethod, "shipping method", {
    Standard => "Standard Shipping",
    Express => "Express Shipping",
    NextDay => "Next Day Delivery",
    TwoDay => "Two-Day Shipping",
    Free => "Free Shipping",
    International => "International Shipping",
});
