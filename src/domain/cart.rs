use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Product, ProductId};

/// One product's quantity entry within a cart.
///
/// Display fields and stock are a snapshot taken when the line was created;
/// they are not re-synced with the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image_ref: String,
    pub stock_at_add_time: u32,
}

impl CartLine {
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image_ref: product.primary_image_url().to_string(),
            stock_at_add_time: product.stock,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Merged quantities or the total went past what the cart can represent.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Cart line for product {0} overflows")]
pub struct CartOverflow(pub ProductId);

/// Ordered cart lines plus their total.
///
/// The total is always derived from the lines: it is recomputed whenever a
/// cart is built, including when one is deserialized, so a stale or tampered
/// stored total is never trusted. A stored cart whose lines overflow fails to
/// deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "StoredCart", into = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
    total: Decimal,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Lines for the same product are merged and zero-quantity lines dropped,
    /// keeping first-seen order. Quantities and the total saturate.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match merged.iter_mut().find(|m| m.product_id == line.product_id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => merged.push(line),
            }
        }
        let total = merged.iter().fold(Decimal::ZERO, |total, line| {
            total.saturating_add(line.unit_price.saturating_mul(Decimal::from(line.quantity)))
        });
        Self {
            lines: merged,
            total,
        }
    }

    /// Like [`Cart::from_lines`], but fails instead of saturating.
    pub fn try_from_lines(lines: Vec<CartLine>) -> Result<Self, CartOverflow> {
        let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match merged.iter_mut().find(|m| m.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(line.quantity)
                        .ok_or(CartOverflow(line.product_id))?;
                }
                None => merged.push(line),
            }
        }
        let mut total = Decimal::ZERO;
        for line in &merged {
            total = line
                .unit_price
                .checked_mul(Decimal::from(line.quantity))
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(CartOverflow(line.product_id))?;
        }
        Ok(Self {
            lines: merged,
            total,
        })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of units across all lines (the header badge count).
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |count, line| count.saturating_add(line.quantity))
    }
}

/// Wire shape persisted under `cart_<userId>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCart {
    lines: Vec<CartLine>,
    #[serde(default)]
    total: Decimal,
}

impl TryFrom<StoredCart> for Cart {
    type Error = CartOverflow;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        Cart::try_from_lines(stored.lines)
    }
}

impl From<Cart> for StoredCart {
    fn from(cart: Cart) -> Self {
        StoredCart {
            lines: cart.lines,
            total: cart.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: u32, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("product {id}"),
            unit_price: Decimal::new(price, 2),
            quantity,
            image_ref: String::new(),
            stock_at_add_time: 10,
        }
    }

    #[test]
    fn total_is_derived_from_lines() {
        let cart = Cart::from_lines(vec![line(1, 1050, 2), line(2, 199, 3)]);
        assert_eq!(cart.total(), Decimal::new(2697, 2));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn duplicate_and_empty_lines_are_normalized() {
        let cart = Cart::from_lines(vec![line(1, 100, 1), line(2, 100, 0), line(1, 100, 2)]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(ProductId::new(1)).map(|l| l.quantity), Some(3));
    }

    #[test]
    fn stored_total_is_ignored_on_load() {
        let json = r#"{"lines":[{"productId":1,"name":"Mug","unitPrice":"4.50","quantity":2,"imageRef":"","stockAtAddTime":9}],"total":"999"}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total(), Decimal::new(900, 2));

        let saved = serde_json::to_value(&cart).unwrap();
        assert_eq!(saved["total"], "9.00");
        assert_eq!(saved["lines"][0]["productId"], 1);
    }

    #[test]
    fn overflowing_stored_cart_is_not_loaded() {
        let json = r#"{"lines":[
            {"productId":1,"name":"Mug","unitPrice":"4.50","quantity":4294967295,"imageRef":"","stockAtAddTime":9},
            {"productId":1,"name":"Mug","unitPrice":"4.50","quantity":1,"imageRef":"","stockAtAddTime":9}
        ]}"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());

        let store = crate::store::MemoryStore::new();
        crate::store::KeyValueStore::set(&store, "cart_1", json.to_string()).unwrap();
        assert_eq!(crate::store::load_json::<Cart>(&store, "cart_1"), None);
    }

    #[test]
    fn merging_saturates_instead_of_wrapping() {
        let cart = Cart::from_lines(vec![line(1, 100, u32::MAX), line(1, 100, 1), line(2, 100, 1)]);
        assert_eq!(cart.line(ProductId::new(1)).map(|l| l.quantity), Some(u32::MAX));
        assert_eq!(cart.item_count(), u32::MAX);
        assert_eq!(
            Cart::try_from_lines(vec![line(1, 100, u32::MAX), line(1, 100, 1)]),
            Err(CartOverflow(ProductId::new(1)))
        );
    }
}
