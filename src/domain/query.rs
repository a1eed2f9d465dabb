use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CategoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Price,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Catalog query parameters. Every criterion that is set must match
/// (conjunctive); empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    /// Product must belong to one of these categories.
    pub categories: Vec<CategoryId>,
    /// Case-insensitive substring over name, description and tag names.
    pub search: Option<String>,
    /// Product must carry at least one of these tags.
    pub tags: Vec<String>,
    /// Product brand must be one of these.
    pub brands: Vec<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub featured_only: bool,
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
    /// 1-based; `None` or 0 means the first page.
    pub page: Option<usize>,
    /// `None` or 0 means the configured default page size.
    pub page_size: Option<usize>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn category(mut self, id: CategoryId) -> Self {
        self.categories.push(id);
        self
    }

    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }

    pub fn brand(mut self, name: impl Into<String>) -> Self {
        self.brands.push(name.into());
        self
    }

    pub fn price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_min = Some(min);
        self.price_max = Some(max);
        self
    }

    pub fn featured_only(mut self) -> Self {
        self.featured_only = true;
        self
    }

    pub fn sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = Some(key);
        self.sort_order = order;
        self
    }

    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of matches before pagination.
    pub total_count: usize,
    pub page: usize,
    pub page_count: usize,
}
