use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::ProductId;

/// A user's favorite products with true set semantics.
///
/// Persisted as a plain JSON array of product ids under `favorites_<userId>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    ids: BTreeSet<ProductId>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the id was not already present.
    pub fn add(&mut self, product_id: ProductId) -> bool {
        self.ids.insert(product_id)
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        self.ids.remove(&product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    /// Adds the id if absent, removes it if present. Returns membership after
    /// the toggle.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.add(product_id)
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn to_vec(&self) -> Vec<ProductId> {
        self.ids.iter().copied().collect()
    }
}

impl FromIterator<ProductId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut favorites: FavoritesSet = [1, 4].into_iter().map(ProductId::new).collect();
        let original = favorites.clone();

        assert!(favorites.toggle(ProductId::new(9)));
        assert!(!favorites.toggle(ProductId::new(9)));
        assert_eq!(favorites, original);

        assert!(!favorites.toggle(ProductId::new(4)));
        assert!(favorites.toggle(ProductId::new(4)));
        assert_eq!(favorites, original);
    }

    #[test]
    fn add_deduplicates_silently() {
        let mut favorites = FavoritesSet::new();
        assert!(favorites.add(ProductId::new(3)));
        assert!(!favorites.add(ProductId::new(3)));
        assert_eq!(favorites.len(), 1);
        assert!(!favorites.remove(ProductId::new(8)));
    }

    #[test]
    fn persisted_form_is_an_id_array() {
        let favorites: FavoritesSet = [5, 2].into_iter().map(ProductId::new).collect();
        assert_eq!(serde_json::to_string(&favorites).unwrap(), "[2,5]");

        // Legacy data may contain duplicates.
        let loaded: FavoritesSet = serde_json::from_str("[3,3,1]").unwrap();
        assert_eq!(loaded.to_vec(), vec![ProductId::new(1), ProductId::new(3)]);
    }
}
