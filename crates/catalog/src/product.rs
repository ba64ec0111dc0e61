//! Committed products and the categories that own them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, DomainError, DomainResult, Entity, ProductId, find_by_id};

use crate::draft::ProductDraft;
use crate::pricing::{self, Discount, PriceQuote};

/// Committed product, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub brand: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Discount::is_none")]
    pub discount: Discount,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Product {
    /// Build the committed product from a validated draft.
    ///
    /// `fallback_image` is used when no image was uploaded.
    pub fn from_draft(id: ProductId, draft: &ProductDraft, fallback_image: &str) -> DomainResult<Self> {
        let price = draft
            .price
            .ok_or_else(|| DomainError::validation("price is required"))?;
        if price <= Decimal::ZERO {
            return Err(DomainError::validation("price must be positive"));
        }
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            price,
            brand: draft.brand.trim().to_string(),
            image: draft
                .image
                .clone()
                .unwrap_or_else(|| fallback_image.to_string()),
            discount: draft.discount,
        })
    }

    pub fn quote(&self) -> PriceQuote {
        pricing::quote(self.price, &self.discount)
    }

    pub fn final_price(&self) -> Decimal {
        self.quote().final_price
    }

    /// Drop a discount the pricing gate would refuse. Returns whether one was dropped.
    pub fn sanitize_discount(&mut self) -> bool {
        if pricing::is_valid_discount(self.price, &self.discount) {
            return false;
        }
        self.discount = Discount::None;
        true
    }
}

/// Product category with its products in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Category {
    /// New empty category with a generated id.
    pub fn new(name: &str) -> DomainResult<Self> {
        Self::with_id(CategoryId::new(), name)
    }

    pub fn with_id(id: CategoryId, name: &str) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be empty"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            products: Vec::new(),
        })
    }

    /// Append a product. Products are never removed.
    pub fn push_product(&mut self, product: Product) -> DomainResult<()> {
        if product.price <= Decimal::ZERO {
            return Err(DomainError::invariant("product price must be positive"));
        }
        if find_by_id(&self.products, &product.id).is_some() {
            return Err(DomainError::conflict(format!(
                "product {} already exists in category {}",
                product.id, self.name
            )));
        }
        self.products.push(product);
        Ok(())
    }
}
