//! Pure cart transitions: `(cart, action) -> new cart or error`.
//!
//! Every transition builds a fresh [`Cart`] through [`Cart::from_lines`], so
//! the total is re-derived after each step and the input cart is never
//! touched when a transition fails.

use super::CartError;
use crate::domain::{Cart, CartLine, Product, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Add { product: Product, quantity: u32 },
    Remove { product_id: ProductId },
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    Clear,
}

pub fn apply(cart: &Cart, action: CartAction) -> Result<Cart, CartError> {
    match action {
        CartAction::Add { product, quantity } => add_item(cart, &product, quantity),
        CartAction::Remove { product_id } => Ok(remove_item(cart, product_id)),
        CartAction::UpdateQuantity {
            product_id,
            quantity,
        } => update_quantity(cart, product_id, quantity),
        CartAction::Clear => Ok(Cart::empty()),
    }
}

/// Adds `quantity` units of `product`, merging into an existing line.
///
/// The quantity is checked against the product's current stock only; a
/// merged line may end up above it, but never past `u32::MAX`.
pub fn add_item(cart: &Cart, product: &Product, quantity: u32) -> Result<Cart, CartError> {
    if quantity == 0 || quantity > product.stock {
        return Err(CartError::InsufficientStock {
            product_id: product.id,
            requested: quantity,
            available: product.stock,
        });
    }
    let mut lines = cart.lines().to_vec();
    match lines.iter_mut().find(|line| line.product_id == product.id) {
        Some(line) => {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::InsufficientStock {
                    product_id: product.id,
                    requested: quantity,
                    available: u32::MAX - line.quantity,
                })?;
        }
        None => lines.push(CartLine::snapshot(product, quantity)),
    }
    Ok(Cart::from_lines(lines))
}

/// Absent ids are a no-op.
pub fn remove_item(cart: &Cart, product_id: ProductId) -> Cart {
    let lines = cart
        .lines()
        .iter()
        .filter(|line| line.product_id != product_id)
        .cloned()
        .collect();
    Cart::from_lines(lines)
}

/// Sets a line's quantity, bounded by the stock captured when the line was
/// created. Zero or negative quantities remove the line.
pub fn update_quantity(cart: &Cart, product_id: ProductId, quantity: i64) -> Result<Cart, CartError> {
    if quantity <= 0 {
        return Ok(remove_item(cart, product_id));
    }
    let line = cart
        .line(product_id)
        .ok_or(CartError::LineNotFound(product_id))?;
    let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
    if requested > line.stock_at_add_time {
        return Err(CartError::InsufficientStock {
            product_id,
            requested,
            available: line.stock_at_add_time,
        });
    }
    let lines = cart
        .lines()
        .iter()
        .map(|l| {
            let mut l = l.clone();
            if l.product_id == product_id {
                l.quantity = requested;
            }
            l
        })
        .collect();
    Ok(Cart::from_lines(lines))
}
