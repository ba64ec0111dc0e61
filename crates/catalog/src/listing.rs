//! Catalogue listing: one column per category, one card per product.

use rust_decimal::Decimal;
use serde::Serialize;

use storefront_core::{CategoryId, ProductId};

use crate::pricing::Discount;
use crate::product::{Category, Product};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub price: Decimal,
    pub final_price: Decimal,
    pub is_discounted: bool,
    /// e.g. `10% OFF` or `₹200 OFF`; only set when a discount applies.
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryColumn {
    pub id: CategoryId,
    pub name: String,
    pub cards: Vec<ProductCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CatalogueListing {
    pub columns: Vec<CategoryColumn>,
}

impl CatalogueListing {
    pub fn build(categories: &[Category], currency_symbol: &str, fallback_image: &str) -> Self {
        let columns = categories
            .iter()
            .map(|category| CategoryColumn {
                id: category.id,
                name: category.name.clone(),
                cards: category
                    .products
                    .iter()
                    .map(|p| ProductCard::build(p, currency_symbol, fallback_image))
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    pub fn product_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }
}

impl ProductCard {
    pub fn build(product: &Product, currency_symbol: &str, fallback_image: &str) -> Self {
        let quote = product.quote();
        let is_discounted = quote.is_discounted();
        let badge = is_discounted.then(|| match quote.applied {
            Discount::Percentage(pct) => format!("{}% OFF", pct.normalize()),
            Discount::Flat(value) => format!("{currency_symbol}{} OFF", value.normalize()),
            Discount::None => String::new(),
        });

        let image = if product.image.trim().is_empty() {
            fallback_image.to_string()
        } else {
            product.image.clone()
        };

        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            image,
            price: product.price,
            final_price: quote.final_price,
            is_discounted,
            badge,
        }
    }
}
