//! In-progress product state accumulated by the add-product wizard.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, DomainError};

use crate::combination::Combinations;
use crate::pricing::{self, Discount, PriceQuote};
use crate::variant::VariantOption;

/// Wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    #[default]
    Basic,
    Variants,
    Combinations,
    Pricing,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Basic,
        WizardStep::Variants,
        WizardStep::Combinations,
        WizardStep::Pricing,
    ];

    pub fn index(self) -> u8 {
        match self {
            WizardStep::Basic => 0,
            WizardStep::Variants => 1,
            WizardStep::Combinations => 2,
            WizardStep::Pricing => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::Pricing
    }

    /// Breadcrumb label.
    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Basic => "Description",
            WizardStep::Variants => "Variants",
            WizardStep::Combinations => "Combinations",
            WizardStep::Pricing => "Price Info",
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.index()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value)
            .ok_or_else(|| DomainError::validation(format!("unknown wizard step {value}")))
    }
}

/// Step 0 form fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicInfo {
    pub name: String,
    /// Category id as selected in the form (string form of a `CategoryId`).
    pub category: String,
    pub brand: String,
}

/// Product being created. Persisted as the draft blob between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub step: WizardStep,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    /// Uploaded image as a data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub variants: Vec<VariantOption>,
    #[serde(default)]
    pub combinations: Combinations,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been entered yet (the step is ignored).
    pub fn is_empty(&self) -> bool {
        let blank = ProductDraft {
            step: self.step,
            ..ProductDraft::default()
        };
        *self == blank
    }

    pub fn basic(&self) -> BasicInfo {
        BasicInfo {
            name: self.name.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
        }
    }

    pub fn apply_basic(&mut self, basic: BasicInfo) {
        self.name = basic.name;
        self.category = basic.category;
        self.brand = basic.brand;
    }

    /// Selected category, if the field holds a well-formed id.
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.parse().ok()
    }

    /// Set or clear the uploaded image. Blank input clears it.
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image.filter(|i| !i.trim().is_empty());
    }

    /// Live price preview for the pricing step.
    pub fn quote(&self) -> Option<PriceQuote> {
        self.price.map(|price| pricing::quote(price, &self.discount))
    }
}
