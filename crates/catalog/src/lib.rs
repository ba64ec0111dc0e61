//! Product catalogue domain module.
//!
//! Business rules for the add-product wizard and the catalogue, implemented
//! purely as deterministic domain logic (no IO, no UI, no storage).

pub mod combination;
pub mod draft;
pub mod listing;
pub mod pricing;
pub mod product;
pub mod validation;
pub mod variant;

pub use combination::{
    Combination, CombinationKey, CombinationUpdate, Combinations, Stock, generate_combinations,
    prepare_combinations, reconcile_combinations,
};
pub use draft::{BasicInfo, ProductDraft, WizardStep};
pub use listing::{CatalogueListing, CategoryColumn, ProductCard};
pub use pricing::{
    Discount, DiscountMethod, DiscountViolation, MIN_FINAL_PRICE, PriceQuote, final_price,
    is_valid_discount, quote,
};
pub use product::{Category, Product};
pub use validation::{CategoryLookup, Field, FieldError, Rule, ValidationErrors};
pub use variant::VariantOption;
