//! Value object trait: equality by value, not identity.
//!
//! Catalogue values such as a discount or a variant option have no identity of
//! their own. Two discounts with the same method and value are the same discount.

/// Marker trait for value objects.
///
/// Value objects are compared by their attribute values and are replaced rather
/// than mutated in place:
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// enum Discount {
///     None,
///     Percentage(Decimal),
///     Flat(Decimal),
/// }
///
/// impl ValueObject for Discount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
