use std::sync::RwLock;

use storefront_catalog::{Category, Product};
use storefront_core::{CategoryId, DomainError, DomainResult, find_by_id, find_by_id_mut};

use super::CatalogueStore;

/// In-memory catalogue for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalogueStore {
    inner: RwLock<Vec<Category>>,
}

impl InMemoryCatalogueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing categories.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            inner: RwLock::new(categories),
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::invariant("catalogue lock poisoned")
}

impl CatalogueStore for InMemoryCatalogueStore {
    fn categories(&self) -> Vec<Category> {
        match self.inner.read() {
            Ok(categories) => categories.clone(),
            Err(_) => vec![],
        }
    }

    fn category(&self, id: CategoryId) -> Option<Category> {
        let categories = self.inner.read().ok()?;
        find_by_id(&categories, &id).cloned()
    }

    fn add_category(&self, name: &str) -> DomainResult<Category> {
        let category = Category::new(name)?;
        let mut categories = self.inner.write().map_err(|_| poisoned())?;
        categories.push(category.clone());

        tracing::info!(category_id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    fn add_product(&self, category_id: CategoryId, mut product: Product) -> DomainResult<()> {
        if product.sanitize_discount() {
            tracing::warn!(
                product_id = %product.id,
                price = %product.price,
                "invalid discount stripped before insertion"
            );
        }

        let mut categories = self.inner.write().map_err(|_| poisoned())?;
        let category =
            find_by_id_mut(&mut categories, &category_id).ok_or_else(DomainError::not_found)?;

        let product_id = product.id;
        category.push_product(product)?;

        tracing::info!(%category_id, %product_id, "product added");
        Ok(())
    }
}
