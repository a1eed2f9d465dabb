use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Cart, OrderId, ProductId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
}

/// Represents a confirmed customer order produced by checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
}

/// Payload for recording an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
}

impl OrderCreate {
    pub fn from_cart(user_id: UserId, cart: &Cart) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                product_name: line.name.clone(),
                product_price: line.unit_price,
                quantity: line.quantity,
                subtotal: line.subtotal(),
            })
            .collect();
        Self {
            user_id,
            items,
            total_amount: cart.total(),
        }
    }
}
