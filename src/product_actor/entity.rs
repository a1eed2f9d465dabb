use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductId, ProductImage, ProductUpdate};

const NAME_LEN: (usize, usize) = (3, 100);
const DESCRIPTION_LEN: (usize, usize) = (10, 500);
const MAX_STOCK: u32 = 999_999;

fn min_price() -> Decimal {
    Decimal::new(1, 2)
}

fn max_price() -> Decimal {
    Decimal::from(999_999)
}

/// Console form rules, applied on create and after every update.
pub fn validate(product: &Product) -> Result<(), String> {
    let name_len = product.name.trim().chars().count();
    if name_len < NAME_LEN.0 || name_len > NAME_LEN.1 {
        return Err(format!(
            "name must be between {} and {} characters",
            NAME_LEN.0, NAME_LEN.1
        ));
    }
    let description_len = product.description.trim().chars().count();
    if description_len < DESCRIPTION_LEN.0 || description_len > DESCRIPTION_LEN.1 {
        return Err(format!(
            "description must be between {} and {} characters",
            DESCRIPTION_LEN.0, DESCRIPTION_LEN.1
        ));
    }
    if product.price < min_price() || product.price > max_price() {
        return Err(format!(
            "price must be between {} and {}",
            min_price(),
            max_price()
        ));
    }
    if product.stock > MAX_STOCK {
        return Err(format!("stock must not exceed {MAX_STOCK}"));
    }
    Ok(())
}

impl Entity for Product {
    type Id = ProductId;
    type CreateParams = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Creates a new, active Product. The first image URL becomes the
    /// primary image.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, String> {
        let now = Utc::now();
        let images = ProductImage::gallery(id, &params.name, params.image_urls);
        let product = Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            stock: params.stock,
            category_id: params.category_id,
            brand: params.brand.filter(|brand| !brand.trim().is_empty()),
            owner_id: params.owner_id,
            images,
            tags: params.tags,
            is_active: true,
            featured: params.featured,
            created_at: now,
            updated_at: now,
        };
        validate(&product)?;
        Ok(product)
    }

    /// Applies a partial update. The product is left untouched when the
    /// result would not validate.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), String> {
        let mut next = self.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(description) = update.description {
            next.description = description;
        }
        if let Some(price) = update.price {
            next.price = price;
        }
        if let Some(stock) = update.stock {
            next.stock = stock;
        }
        if let Some(category_id) = update.category_id {
            next.category_id = category_id;
        }
        if let Some(brand) = update.brand {
            next.brand = Some(brand).filter(|brand| !brand.trim().is_empty());
        }
        if let Some(urls) = update.image_urls {
            next.images = ProductImage::gallery(next.id, &next.name, urls);
        }
        if let Some(tags) = update.tags {
            next.tags = tags;
        }
        if let Some(featured) = update.featured {
            next.featured = featured;
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        validate(&next)?;
        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::ToggleFeatured => {
                self.featured = !self.featured;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::ToggleFeatured(self.featured))
            }
        }
    }
}
