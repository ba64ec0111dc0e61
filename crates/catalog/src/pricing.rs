//! Pricing calculator: base price + discount -> final price.
//!
//! An out-of-bounds discount is rejected, never clamped into range. The live
//! preview and the commit gate both go through [`quote`], so a discount the gate
//! refuses is never shown as applied.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{DomainError, DomainResult, ValueObject};

/// Smallest payable price (one paisa).
pub const MIN_FINAL_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DiscountMethod {
    #[default]
    #[serde(rename = "pct")]
    Percentage,
    #[serde(rename = "flat")]
    Flat,
}

/// Discount attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "method", content = "value")]
pub enum Discount {
    #[default]
    #[serde(rename = "none")]
    None,
    /// Percentage off the base price (0-100).
    #[serde(rename = "pct")]
    Percentage(Decimal),
    /// Absolute amount off the base price.
    #[serde(rename = "flat")]
    Flat(Decimal),
}

impl ValueObject for Discount {}

impl Discount {
    /// Build a discount from a method and a non-negative value.
    ///
    /// A zero value means "no discount".
    pub fn new(method: DiscountMethod, value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::validation("discount cannot be negative"));
        }
        if value.is_zero() {
            return Ok(Discount::None);
        }
        Ok(match method {
            DiscountMethod::Percentage => Discount::Percentage(value),
            DiscountMethod::Flat => Discount::Flat(value),
        })
    }

    pub fn method(&self) -> Option<DiscountMethod> {
        match self {
            Discount::None => None,
            Discount::Percentage(_) => Some(DiscountMethod::Percentage),
            Discount::Flat(_) => Some(DiscountMethod::Flat),
        }
    }

    pub fn value(&self) -> Decimal {
        match self {
            Discount::None => Decimal::ZERO,
            Discount::Percentage(v) | Discount::Flat(v) => *v,
        }
    }

    /// True when applying this discount would not change the price.
    pub fn is_none(&self) -> bool {
        self.value() <= Decimal::ZERO
    }
}

/// Why a discount cannot be applied to a given price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiscountViolation {
    #[error("percentage discount cannot exceed 100%")]
    PercentageAbove100,

    #[error("flat discount must be less than the price")]
    FlatNotBelowPrice,

    #[error("discount leaves no payable price")]
    NonPositiveFinalPrice,

    #[error("discounted price is out of range")]
    OutOfRange,
}

/// Result of pricing a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub base_price: Decimal,
    pub final_price: Decimal,
    /// The discount that was actually applied (`Discount::None` when rejected).
    pub applied: Discount,
    pub violation: Option<DiscountViolation>,
}

impl PriceQuote {
    pub fn is_discounted(&self) -> bool {
        !self.applied.is_none() && self.final_price < self.base_price
    }
}

/// Check a discount against a base price.
pub fn check_discount(price: Decimal, discount: &Discount) -> Result<(), DiscountViolation> {
    discounted(price, discount).map(|_| ())
}

/// Unrounded discounted price, or the reason the discount cannot apply.
fn discounted(price: Decimal, discount: &Discount) -> Result<Decimal, DiscountViolation> {
    if discount.is_none() {
        return Ok(price);
    }

    match *discount {
        Discount::Percentage(pct) if pct > Decimal::ONE_HUNDRED => {
            return Err(DiscountViolation::PercentageAbove100);
        }
        Discount::Flat(value) if value >= price => {
            return Err(DiscountViolation::FlatNotBelowPrice);
        }
        _ => {}
    }

    let value = apply(price, discount).ok_or(DiscountViolation::OutOfRange)?;
    if value <= Decimal::ZERO {
        return Err(DiscountViolation::NonPositiveFinalPrice);
    }
    Ok(value)
}

/// Gate-side validity predicate used before committing a product.
pub fn is_valid_discount(price: Decimal, discount: &Discount) -> bool {
    check_discount(price, discount).is_ok()
}

/// Price a product. Invalid discounts are dropped, not clamped.
pub fn quote(price: Decimal, discount: &Discount) -> PriceQuote {
    if discount.is_none() {
        return PriceQuote {
            base_price: price,
            final_price: price,
            applied: Discount::None,
            violation: None,
        };
    }

    match discounted(price, discount) {
        Ok(value) => {
            let final_price = value
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                .max(MIN_FINAL_PRICE);
            PriceQuote {
                base_price: price,
                final_price,
                applied: *discount,
                violation: None,
            }
        }
        Err(violation) => {
            tracing::debug!(%price, ?discount, %violation, "discount rejected");
            PriceQuote {
                base_price: price,
                final_price: price,
                applied: Discount::None,
                violation: Some(violation),
            }
        }
    }
}

/// Final price after a (valid) discount; the base price otherwise.
pub fn final_price(price: Decimal, discount: &Discount) -> Decimal {
    quote(price, discount).final_price
}

/// `None` when the arithmetic leaves the representable range.
fn apply(price: Decimal, discount: &Discount) -> Option<Decimal> {
    match *discount {
        Discount::None => Some(price),
        Discount::Percentage(pct) => {
            let share = pct
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
                .checked_div(Decimal::ONE_HUNDRED)?;
            price.checked_sub(price.checked_mul(share)?)
        }
        Discount::Flat(value) => price.checked_sub(value),
    }
}
