//! Variant options: the named axes a product varies along (e.g. "Size").

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// One selectable product dimension with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantOption {
    pub name: String,
    pub values: Vec<String>,
}

impl ValueObject for VariantOption {}

impl VariantOption {
    pub fn new<N, V, I>(name: N, values: I) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a value typed into the option's tag input.
    ///
    /// Blank input and values already present are ignored. Returns whether the
    /// value was added.
    pub fn push_value(&mut self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() || self.values.iter().any(|v| v == value) {
            return false;
        }
        self.values.push(value.to_string());
        true
    }

    pub fn remove_value(&mut self, index: usize) -> Option<String> {
        (index < self.values.len()).then(|| self.values.remove(index))
    }
}

/// Number of combinations the options expand to (`Π nᵢ`, zero without options).
pub fn combination_count(options: &[VariantOption]) -> usize {
    if options.is_empty() {
        return 0;
    }
    options.iter().map(|o| o.values.len()).product()
}
