use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CategoryId, ProductId, TagId, UserId};

/// Represents a product listed in the catalog.
///
/// # Actor Framework
/// This struct implements the [`Entity`](crate::actor_framework::Entity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::actor_framework::ResourceActor).
/// See `product_actor` for creation, update and action handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Units on hand. The cart snapshots this when a line is created.
    pub stock: u32,
    pub category_id: CategoryId,
    pub brand: Option<String>,
    /// The user who published the product.
    pub owner_id: UserId,
    pub images: Vec<ProductImage>,
    pub tags: Vec<Tag>,
    pub is_active: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// URL of the image shown in listings and cart lines: the primary image,
    /// falling back to the first one, or empty when the product has none.
    pub fn primary_image_url(&self) -> &str {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
            .map(|image| image.image_url.as_str())
            .unwrap_or("")
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: u32,
    pub product_id: ProductId,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub display_order: u32,
}

impl ProductImage {
    /// Builds the gallery for a product from uploaded URLs. The first URL
    /// becomes the primary image.
    pub fn gallery(product_id: ProductId, alt_text: &str, urls: Vec<String>) -> Vec<Self> {
        urls.into_iter()
            .zip(0u32..)
            .map(|(image_url, index)| Self {
                id: index + 1,
                product_id,
                image_url,
                alt_text: Some(alt_text.to_string()),
                is_primary: index == 0,
                display_order: index,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(id: u32, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: TagId::new(id),
            name: name.into(),
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Payload for publishing a new product from the management console.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category_id: CategoryId,
    pub brand: Option<String>,
    pub image_urls: Vec<String>,
    pub tags: Vec<Tag>,
    pub featured: bool,
}

/// Partial update; `None` leaves the field untouched. Supplying `image_urls`
/// replaces the whole gallery.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category_id: Option<CategoryId>,
    pub brand: Option<String>,
    pub image_urls: Option<Vec<String>>,
    pub tags: Option<Vec<Tag>>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}
