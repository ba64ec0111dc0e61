//! Catalogue storage: categories and their products.

pub mod in_memory;

pub use in_memory::InMemoryCatalogueStore;

use std::sync::Arc;

use storefront_catalog::{Category, Product};
use storefront_core::{CategoryId, DomainResult};

/// Category/product store.
///
/// Products are appended to their category and never removed.
pub trait CatalogueStore: Send + Sync {
    /// All categories in creation order.
    fn categories(&self) -> Vec<Category>;

    fn category(&self, id: CategoryId) -> Option<Category>;

    /// Create a category with a generated id. The name is trimmed and must not
    /// be blank.
    fn add_category(&self, name: &str) -> DomainResult<Category>;

    /// Append a product to a category.
    ///
    /// A discount the pricing gate would refuse is stripped before insertion.
    /// Fails with `DomainError::NotFound` when the category does not exist.
    fn add_product(&self, category_id: CategoryId, product: Product) -> DomainResult<()>;
}

impl<S> CatalogueStore for Arc<S>
where
    S: CatalogueStore + ?Sized,
{
    fn categories(&self) -> Vec<Category> {
        (**self).categories()
    }

    fn category(&self, id: CategoryId) -> Option<Category> {
        (**self).category(id)
    }

    fn add_category(&self, name: &str) -> DomainResult<Category> {
        (**self).add_category(name)
    }

    fn add_product(&self, category_id: CategoryId, product: Product) -> DomainResult<()> {
        (**self).add_product(category_id, product)
    }
}
