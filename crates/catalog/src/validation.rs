//! Per-step form validation rules.
//!
//! Validation never fails hard: each rule that does not hold adds a
//! [`FieldError`] naming the field and the violated rule, and the caller keeps
//! the draft editable.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use storefront_core::{CategoryId, find_by_id};

use crate::combination::{CombinationKey, Combinations, prepare_combinations};
use crate::draft::{ProductDraft, WizardStep};
use crate::pricing::{self, Discount, DiscountMethod, DiscountViolation};
use crate::product::Category;
use crate::variant::VariantOption;

/// Form field a validation error is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Category,
    Brand,
    Image,
    VariantName(usize),
    VariantValues(usize),
    VariantValue { option: usize, value: usize },
    Sku(CombinationKey),
    Quantity(CombinationKey),
    /// Step-level banner for the combinations table.
    Combinations,
    Price,
    Discount,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Field::Name => f.write_str("name"),
            Field::Category => f.write_str("category"),
            Field::Brand => f.write_str("brand"),
            Field::Image => f.write_str("image"),
            Field::VariantName(i) => write!(f, "variants[{i}].name"),
            Field::VariantValues(i) => write!(f, "variants[{i}].values"),
            Field::VariantValue { option, value } => write!(f, "variants[{option}].values[{value}]"),
            Field::Sku(key) => write!(f, "combinations.{key}.sku"),
            Field::Quantity(key) => write!(f, "combinations.{key}.quantity"),
            Field::Combinations => f.write_str("combinations"),
            Field::Price => f.write_str("price"),
            Field::Discount => f.write_str("discount"),
        }
    }
}

/// Rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    UnknownCategory,
    Duplicate,
    NotANumber,
    MustBePositive,
    Negative,
    /// Rows no longer match the variant options they were generated from.
    OutOfDate,
    Discount(DiscountViolation),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

/// All rule failures found for a step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: Field, rule: Rule, message: impl Into<String>) {
        self.0.push(FieldError::new(field, rule, message));
    }

    pub fn add(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error for a field (what the form shows under the input).
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn has(&self, field: Field, rule: Rule) -> bool {
        self.0.iter().any(|e| e.field == field && e.rule == rule)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

/// Resolves category references during validation.
pub trait CategoryLookup {
    fn contains_category(&self, id: CategoryId) -> bool;
}

impl CategoryLookup for [Category] {
    fn contains_category(&self, id: CategoryId) -> bool {
        find_by_id(self, &id).is_some()
    }
}

impl CategoryLookup for Vec<Category> {
    fn contains_category(&self, id: CategoryId) -> bool {
        self.as_slice().contains_category(id)
    }
}

/// Parse the price input. It must be a positive number.
pub fn parse_price(raw: &str) -> Result<Decimal, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new(Field::Price, Rule::Required, "Price is required"));
    }
    let price = Decimal::from_str(raw).map_err(|_| {
        FieldError::new(Field::Price, Rule::NotANumber, "Price must be a number")
    })?;
    if price <= Decimal::ZERO {
        return Err(FieldError::new(
            Field::Price,
            Rule::MustBePositive,
            "Price must be greater than zero",
        ));
    }
    Ok(price)
}

/// Parse the discount input. Blank means no discount.
pub fn parse_discount(method: DiscountMethod, raw: &str) -> Result<Discount, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Discount::None);
    }
    let value = Decimal::from_str(raw).map_err(|_| {
        FieldError::new(Field::Discount, Rule::NotANumber, "Discount must be a number")
    })?;
    Discount::new(method, value).map_err(|_| {
        FieldError::new(Field::Discount, Rule::Negative, "Discount cannot be negative")
    })
}

/// Step 0: name, category, brand. The image is optional.
pub fn validate_basic<L>(draft: &ProductDraft, categories: &L) -> ValidationErrors
where
    L: CategoryLookup + ?Sized,
{
    let mut errors = ValidationErrors::new();

    if draft.name.trim().is_empty() {
        errors.push(Field::Name, Rule::Required, "Product name is required");
    }

    if draft.category.trim().is_empty() {
        errors.push(Field::Category, Rule::Required, "Category is required");
    } else {
        match draft.category_id() {
            Some(id) if categories.contains_category(id) => {}
            _ => errors.push(Field::Category, Rule::UnknownCategory, "Category not found"),
        }
    }

    if draft.brand.trim().is_empty() {
        errors.push(Field::Brand, Rule::Required, "Brand is required");
    }

    errors
}

/// Step 1: every option has a name and at least one non-empty value.
pub fn validate_variants(options: &[VariantOption]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut seen_names = HashSet::new();

    for (i, option) in options.iter().enumerate() {
        let name = option.name.trim();
        if name.is_empty() {
            errors.push(Field::VariantName(i), Rule::Required, "Option can't be empty");
        } else if !seen_names.insert(name.to_lowercase()) {
            errors.push(Field::VariantName(i), Rule::Duplicate, "Option already exists");
        }

        if option.values.is_empty() {
            errors.push(Field::VariantValues(i), Rule::Required, "Add at least one value");
        }

        let mut seen_values = HashSet::new();
        for (j, value) in option.values.iter().enumerate() {
            let field = Field::VariantValue { option: i, value: j };
            let value = value.trim();
            if value.is_empty() {
                errors.push(field, Rule::Required, "Please enter a value");
            } else if !seen_values.insert(value) {
                errors.push(field, Rule::Duplicate, "Value already added");
            }
        }
    }

    errors
}

/// Keys of every combination whose SKU is shared with another row.
pub fn duplicate_skus(combinations: &Combinations) -> Vec<CombinationKey> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, row) in combinations.iter() {
        let sku = row.sku.trim();
        if !sku.is_empty() {
            *counts.entry(sku).or_default() += 1;
        }
    }

    combinations
        .iter()
        .filter(|(_, row)| counts.get(row.sku.trim()).is_some_and(|n| *n > 1))
        .map(|(key, _)| key)
        .collect()
}

/// Step 2: unique non-empty SKUs, positive quantity for in-stock rows.
pub fn validate_combinations(combinations: &Combinations) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for (key, row) in combinations.iter() {
        if row.sku.trim().is_empty() {
            errors.push(Field::Sku(key), Rule::Required, "SKU is required");
        }
        if row.in_stock() {
            match row.quantity() {
                None => errors.push(
                    Field::Quantity(key),
                    Rule::Required,
                    "Quantity is required for in-stock items",
                ),
                Some(0) => errors.push(
                    Field::Quantity(key),
                    Rule::MustBePositive,
                    "Quantity must be greater than zero",
                ),
                Some(_) => {}
            }
        }
    }

    let duplicates = duplicate_skus(combinations);
    if !duplicates.is_empty() {
        for key in &duplicates {
            errors.push(Field::Sku(*key), Rule::Duplicate, "Duplicate SKU");
        }
        errors.push(
            Field::Combinations,
            Rule::Duplicate,
            "Each combination needs its own SKU",
        );
    }

    errors
}

/// Combination rows must be exactly those the current variant options produce.
pub fn validate_combinations_current(draft: &ProductDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if prepare_combinations(&draft.combinations, &draft.variants) != draft.combinations {
        errors.push(
            Field::Combinations,
            Rule::OutOfDate,
            "Combinations no longer match the variant options",
        );
    }
    errors
}

/// Step 3: positive price and a discount that passes the pricing gate.
pub fn validate_pricing(price: Option<Decimal>, discount: &Discount) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    let Some(price) = price else {
        errors.push(Field::Price, Rule::Required, "Price is required");
        return errors;
    };

    if price <= Decimal::ZERO {
        errors.push(Field::Price, Rule::MustBePositive, "Price must be greater than zero");
        return errors;
    }

    if let Err(violation) = pricing::check_discount(price, discount) {
        errors.push(Field::Discount, Rule::Discount(violation), violation.to_string());
    }

    errors
}

/// Rules gating the transition out of `step`.
pub fn validate_step<L>(step: WizardStep, draft: &ProductDraft, categories: &L) -> ValidationErrors
where
    L: CategoryLookup + ?Sized,
{
    match step {
        WizardStep::Basic => validate_basic(draft, categories),
        WizardStep::Variants => validate_variants(&draft.variants),
        WizardStep::Combinations => validate_combinations(&draft.combinations),
        WizardStep::Pricing => validate_pricing(draft.price, &draft.discount),
    }
}

/// Every step's rules at once, checked before a draft becomes a product.
pub fn validate_for_commit<L>(draft: &ProductDraft, categories: &L) -> ValidationErrors
where
    L: CategoryLookup + ?Sized,
{
    let mut errors = ValidationErrors::new();
    for step in WizardStep::ALL {
        errors.extend(validate_step(step, draft, categories));
    }
    errors.extend(validate_combinations_current(draft));
    errors
}
