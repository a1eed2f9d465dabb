//! Filter, sort and paginate a catalog snapshot.

use std::cmp::Ordering;

use crate::domain::{Page, Product, ProductFilter, SortKey, SortOrder};

fn matches(product: &Product, filter: &ProductFilter, needle: Option<&str>) -> bool {
    if !filter.categories.is_empty() && !filter.categories.contains(&product.category_id) {
        return false;
    }
    if let Some(needle) = needle {
        let hit = product.name.to_lowercase().contains(needle)
            || product.description.to_lowercase().contains(needle)
            || product
                .tags
                .iter()
                .any(|tag| tag.name.to_lowercase().contains(needle));
        if !hit {
            return false;
        }
    }
    if !filter.tags.is_empty() && !filter.tags.iter().any(|tag| product.has_tag(tag)) {
        return false;
    }
    if !filter.brands.is_empty() {
        let Some(brand) = product.brand.as_deref() else {
            return false;
        };
        if !filter.brands.iter().any(|b| b.eq_ignore_ascii_case(brand)) {
            return false;
        }
    }
    if filter.price_min.is_some_and(|min| product.price < min) {
        return false;
    }
    if filter.price_max.is_some_and(|max| product.price > max) {
        return false;
    }
    if filter.featured_only && !product.featured {
        return false;
    }
    true
}

fn compare(key: SortKey, a: &Product, b: &Product) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Runs `filter` over `products`, which must be in catalog order.
///
/// Sorting is stable on the single chosen key, so ties keep catalog order in
/// both directions.
pub fn run(products: Vec<Product>, filter: &ProductFilter, default_page_size: usize) -> Page<Product> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<Product> = products
        .into_iter()
        .filter(|product| matches(product, filter, needle.as_deref()))
        .collect();

    if let Some(key) = filter.sort_by {
        match filter.sort_order {
            SortOrder::Asc => matched.sort_by(|a, b| compare(key, a, b)),
            SortOrder::Desc => matched.sort_by(|a, b| compare(key, b, a)),
        }
    }

    let page_size = filter
        .page_size
        .filter(|size| *size > 0)
        .unwrap_or(default_page_size)
        .max(1);
    let page = filter.page.filter(|page| *page > 0).unwrap_or(1);
    let total_count = matched.len();
    let page_count = total_count.div_ceil(page_size);

    let items = matched
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();

    Page {
        items,
        total_count,
        page,
        page_count,
    }
}
