/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Flips the "featured" flag from the management console.
    ToggleFeatured,
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// New value of the flag.
    ToggleFeatured(bool),
}
