//! Catalog port
//!
//! Read-only access to the product inventory backend.

use aida_domain::Product;
use async_trait::async_trait;

/// Port for the product catalog.
///
/// Implementations never fail: transport, status and decode errors are
/// logged by the adapter and surface as an empty list or `None`.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// All products, or an empty list on any failure
    async fn fetch_products(&self) -> Vec<Product>;

    /// One product by id, or `None` on any failure
    async fn fetch_product(&self, id: &str) -> Option<Product>;
}
