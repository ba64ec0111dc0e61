//! SKU combinations: one row per tuple of the variant options' cartesian product.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use storefront_core::{DomainError, DomainResult};

use crate::variant::VariantOption;

/// Synthetic key of a generated combination (`key<i>` for the i-th tuple).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombinationKey(usize);

impl CombinationKey {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl core::fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "key{}", self.0)
    }
}

impl FromStr for CombinationKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("key")
            .and_then(|n| n.parse::<usize>().ok())
            .map(Self)
            .ok_or_else(|| DomainError::invalid_id(format!("CombinationKey: {s}")))
    }
}

impl Serialize for CombinationKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CombinationKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Stock state of a combination.
///
/// A quantity only exists while the combination is in stock. It stays `None`
/// until the user types one in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Stock {
    #[default]
    OutOfStock,
    InStock { quantity: Option<u32> },
}

/// One SKU-level row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// Tuple values joined with `/` in option order.
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub stock: Stock,
}

/// Edit applied to a single combination row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombinationUpdate {
    Sku(String),
    InStock(bool),
    Quantity(Option<u32>),
}

impl Combination {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sku: String::new(),
            stock: Stock::OutOfStock,
        }
    }

    pub fn in_stock(&self) -> bool {
        matches!(self.stock, Stock::InStock { .. })
    }

    pub fn quantity(&self) -> Option<u32> {
        match self.stock {
            Stock::InStock { quantity } => quantity,
            Stock::OutOfStock => None,
        }
    }

    pub fn apply(&mut self, update: CombinationUpdate) -> DomainResult<()> {
        match update {
            CombinationUpdate::Sku(sku) => self.sku = sku,
            CombinationUpdate::InStock(true) => {
                if !self.in_stock() {
                    self.stock = Stock::InStock { quantity: None };
                }
            }
            CombinationUpdate::InStock(false) => self.stock = Stock::OutOfStock,
            CombinationUpdate::Quantity(quantity) => match &mut self.stock {
                Stock::InStock { quantity: q } => *q = quantity,
                Stock::OutOfStock => {
                    return Err(DomainError::invariant(format!(
                        "combination {} is out of stock; quantity cannot be set",
                        self.name
                    )));
                }
            },
        }
        Ok(())
    }
}

/// Ordered mapping from synthetic key to combination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Combinations(BTreeMap<CombinationKey, Combination>);

impl Combinations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: CombinationKey) -> Option<&Combination> {
        self.0.get(&key)
    }

    pub fn insert(&mut self, key: CombinationKey, combination: Combination) -> Option<Combination> {
        self.0.insert(key, combination)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CombinationKey, &Combination)> {
        self.0.iter().map(|(k, c)| (*k, c))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(|c| c.name.as_str())
    }

    /// Apply an edit to one row.
    pub fn update(&mut self, key: CombinationKey, update: CombinationUpdate) -> DomainResult<()> {
        let combination = self.0.get_mut(&key).ok_or_else(DomainError::not_found)?;
        combination.apply(update)
    }
}

impl FromIterator<(CombinationKey, Combination)> for Combinations {
    fn from_iter<T: IntoIterator<Item = (CombinationKey, Combination)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Expand variant options into their cartesian product.
///
/// The first option varies slowest. Zero options yield an empty mapping.
pub fn generate_combinations(options: &[VariantOption]) -> Combinations {
    if options.is_empty() {
        return Combinations::new();
    }

    let tuples = options.iter().fold(vec![Vec::new()], |acc, option| {
        acc.iter()
            .flat_map(|prefix: &Vec<&str>| {
                option.values.iter().map(move |value| {
                    let mut tuple = prefix.clone();
                    tuple.push(value.as_str());
                    tuple
                })
            })
            .collect::<Vec<_>>()
    });

    tuples
        .into_iter()
        .enumerate()
        .map(|(i, tuple)| (CombinationKey::new(i), Combination::new(tuple.join("/"))))
        .collect()
}

/// Bring existing rows in line with the current variant options.
///
/// Rows whose tuple still exists keep their SKU and stock; new tuples get
/// default rows; rows for removed tuples are dropped. An unchanged option set
/// returns the existing rows untouched.
pub fn reconcile_combinations(existing: &Combinations, options: &[VariantOption]) -> Combinations {
    let fresh = generate_combinations(options);
    if fresh.names().eq(existing.names()) {
        return existing.clone();
    }

    let previous: HashMap<&str, &Combination> =
        existing.0.values().map(|c| (c.name.as_str(), c)).collect();

    let mut kept = 0usize;
    let reconciled: Combinations = fresh
        .0
        .into_iter()
        .map(|(key, row)| match previous.get(row.name.as_str()) {
            Some(old) => {
                kept += 1;
                (key, (*old).clone())
            }
            None => (key, row),
        })
        .collect();

    tracing::debug!(
        kept,
        added = reconciled.len() - kept,
        dropped = existing.len().saturating_sub(kept),
        "reconciled combinations with variant options"
    );
    reconciled
}

/// Combinations to show when entering the combinations step.
pub fn prepare_combinations(existing: &Combinations, options: &[VariantOption]) -> Combinations {
    if existing.is_empty() {
        generate_combinations(options)
    } else {
        reconcile_combinations(existing, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    use crate::variant::combination_count;

    fn size_and_color() -> Vec<VariantOption> {
        vec![
            VariantOption::new("Size", ["S", "M"]),
            VariantOption::new("Color", ["Red", "Blue", "Green"]),
        ]
    }

    #[test]
    fn generates_in_declaration_order_first_option_slowest() {
        let combos = generate_combinations(&size_and_color());
        let names: Vec<&str> = combos.names().collect();
        assert_eq!(
            names,
            vec!["S/Red", "S/Blue", "S/Green", "M/Red", "M/Blue", "M/Green"]
        );
    }

    #[test]
    fn generated_rows_start_at_defaults() {
        let combos = generate_combinations(&size_and_color());
        let (key, first) = combos.iter().next().unwrap();
        assert_eq!(key.to_string(), "key0");
        assert_eq!(first.sku, "");
        assert!(!first.in_stock());
        assert_eq!(first.quantity(), None);
    }

    #[test]
    fn no_options_means_no_combinations() {
        assert!(generate_combinations(&[]).is_empty());
    }

    #[test]
    fn keys_sort_numerically_past_ten() {
        let options = vec![VariantOption::new(
            "N",
            (0..12).map(|i| i.to_string()).collect::<Vec<_>>(),
        )];
        let combos = generate_combinations(&options);
        let indices: Vec<usize> = combos.iter().map(|(k, _)| k.index()).collect();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn key_parses_from_display_form() {
        assert_eq!("key7".parse::<CombinationKey>().unwrap(), CombinationKey::new(7));
        assert!("7".parse::<CombinationKey>().is_err());
        assert!("keyx".parse::<CombinationKey>().is_err());
    }

    #[test]
    fn going_out_of_stock_clears_quantity() {
        let mut row = Combination::new("S");
        row.apply(CombinationUpdate::InStock(true)).unwrap();
        row.apply(CombinationUpdate::Quantity(Some(5))).unwrap();
        assert_eq!(row.quantity(), Some(5));

        row.apply(CombinationUpdate::InStock(false)).unwrap();
        assert_eq!(row.stock, Stock::OutOfStock);
        assert_eq!(row.quantity(), None);
    }

    #[test]
    fn quantity_requires_in_stock() {
        let mut row = Combination::new("S");
        let err = row.apply(CombinationUpdate::Quantity(Some(3))).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation for out-of-stock quantity"),
        }
    }

    #[test]
    fn update_unknown_key_is_not_found() {
        let mut combos = generate_combinations(&size_and_color());
        let err = combos
            .update(CombinationKey::new(99), CombinationUpdate::Sku("X".into()))
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[test]
    fn prepare_keeps_existing_rows_for_unchanged_options() {
        let options = size_and_color();
        let mut combos = generate_combinations(&options);
        combos
            .update(CombinationKey::new(0), CombinationUpdate::Sku("SKU-S-RED".into()))
            .unwrap();

        let prepared = prepare_combinations(&combos, &options);
        assert_eq!(prepared, combos);
    }

    #[test]
    fn reconcile_preserves_surviving_rows_and_drops_removed_ones() {
        let mut combos = generate_combinations(&[VariantOption::new("Size", ["S", "M"])]);
        combos
            .update(CombinationKey::new(1), CombinationUpdate::Sku("SKU-M".into()))
            .unwrap();
        combos
            .update(CombinationKey::new(1), CombinationUpdate::InStock(true))
            .unwrap();

        let reconciled =
            reconcile_combinations(&combos, &[VariantOption::new("Size", ["M", "L"])]);
        let rows: Vec<(String, &Combination)> =
            reconciled.iter().map(|(k, c)| (k.to_string(), c)).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "key0");
        assert_eq!(rows[0].1.name, "M");
        assert_eq!(rows[0].1.sku, "SKU-M");
        assert!(rows[0].1.in_stock());
        assert_eq!(rows[1].1.name, "L");
        assert_eq!(rows[1].1.sku, "");
    }

    #[test]
    fn combinations_serialize_as_key_map() {
        let combos = generate_combinations(&[VariantOption::new("Size", ["S"])]);
        let json = serde_json::to_value(&combos).unwrap();
        assert_eq!(json["key0"]["name"], "S");
        assert_eq!(json["key0"]["stock"]["status"], "out_of_stock");

        let back: Combinations = serde_json::from_value(json).unwrap();
        assert_eq!(back, combos);
    }

    fn options_strategy() -> impl Strategy<Value = Vec<VariantOption>> {
        prop::collection::vec(
            prop::collection::hash_set("[a-z]{1,4}", 1..4)
                .prop_map(|values| VariantOption::new("opt", values)),
            1..4,
        )
    }

    proptest! {
        /// Property: the generator emits exactly Π nᵢ rows with unique names.
        #[test]
        fn generates_product_of_value_counts(options in options_strategy()) {
            let combos = generate_combinations(&options);
            prop_assert_eq!(combos.len(), combination_count(&options));

            let names: HashSet<&str> = combos.names().collect();
            prop_assert_eq!(names.len(), combos.len());

            for (_, row) in combos.iter() {
                let parts: Vec<&str> = row.name.split('/').collect();
                prop_assert_eq!(parts.len(), options.len());
                for (part, option) in parts.iter().zip(&options) {
                    prop_assert!(option.values.iter().any(|v| v == part));
                }
            }
        }

        /// Property: preparing twice with the same options is a no-op.
        #[test]
        fn prepare_is_idempotent(options in options_strategy()) {
            let first = prepare_combinations(&Combinations::new(), &options);
            let second = prepare_combinations(&first, &options);
            prop_assert_eq!(first, second);
        }
    }
}
