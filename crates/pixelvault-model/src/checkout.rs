// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use pixelvault_core::OrderId;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};

/// Written by the cart page just before navigating to checkout.
/// `total` is the pre-tax sum of the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSnapshot {
    pub items: Vec<CartLine>,
    pub total: f64,
    pub timestamp: DateTime<Utc>,
}

impl CheckoutSnapshot {
    #[must_use]
    pub fn capture(cart: &Cart, timestamp: DateTime<Utc>) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total: cart.subtotal(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub total: f64,
}
