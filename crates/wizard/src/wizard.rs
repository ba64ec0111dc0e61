//! Add-product wizard controller.
//!
//! Basic -> Variants -> Combinations -> Pricing -> committed. Moving forward is
//! gated by the current step's validation; moving back is always allowed. The
//! draft is persisted after every successful forward move and cleared once the
//! product is committed.

use storefront_catalog::validation::{self, parse_discount, parse_price};
use storefront_catalog::{
    BasicInfo, CatalogueListing, Category, CategoryLookup, CombinationKey, CombinationUpdate,
    Discount, DiscountMethod, PriceQuote, Product, ProductDraft, ValidationErrors, VariantOption,
    WizardStep, prepare_combinations,
};
use storefront_core::{CategoryId, DomainError, DomainResult, ProductId};
use storefront_infra::{CatalogueStore, DraftStore, StorefrontConfig};

use crate::error::WizardError;

/// Presentation settings the wizard needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSettings {
    pub fallback_image: String,
    pub currency_symbol: String,
}

impl Default for WizardSettings {
    fn default() -> Self {
        WizardSettings::from(&StorefrontConfig::default())
    }
}

impl From<&StorefrontConfig> for WizardSettings {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            fallback_image: config.fallback_image.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

/// Raw pricing-step form input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PricingForm {
    pub price: String,
    pub method: DiscountMethod,
    pub discount: String,
}

/// Result of a successful `next()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved forward to this step.
    Advanced(WizardStep),
    /// The draft became a product; the caller should return to the listing.
    Committed {
        category_id: CategoryId,
        product: Product,
    },
}

pub struct ProductWizard<D, C> {
    draft: ProductDraft,
    /// Parse failures from the last pricing form update.
    pricing_errors: ValidationErrors,
    drafts: D,
    catalogue: C,
    settings: WizardSettings,
}

impl<D, C> ProductWizard<D, C>
where
    D: DraftStore,
    C: CatalogueStore,
{
    pub fn new(drafts: D, catalogue: C, settings: WizardSettings) -> Self {
        Self {
            draft: ProductDraft::new(),
            pricing_errors: ValidationErrors::new(),
            drafts,
            catalogue,
            settings,
        }
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn step(&self) -> WizardStep {
        self.draft.step
    }

    pub fn catalogue(&self) -> &C {
        &self.catalogue
    }

    pub fn drafts(&self) -> &D {
        &self.drafts
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    /// A saved draft worth offering to resume, if any.
    ///
    /// Storage failures read as "no draft".
    pub async fn saved_draft(&self) -> Option<ProductDraft> {
        match self.drafts.get_draft().await {
            Ok(draft) => draft.filter(|d| !d.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved draft; starting empty");
                None
            }
        }
    }

    /// Load the saved draft, including the step it was saved at.
    ///
    /// Returns `false` when there was nothing to resume.
    pub async fn resume(&mut self) -> bool {
        let Some(draft) = self.saved_draft().await else {
            return false;
        };
        tracing::info!(step = draft.step.index(), "resuming saved draft");
        self.draft = draft;
        self.pricing_errors = ValidationErrors::new();
        true
    }

    /// Discard in-memory state and the persisted draft.
    pub async fn start_fresh(&mut self) {
        self.draft = ProductDraft::new();
        self.pricing_errors = ValidationErrors::new();
        self.clear_saved().await;
        tracing::debug!("wizard reset");
    }

    pub fn update_basic(&mut self, basic: BasicInfo) {
        self.draft.apply_basic(basic);
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.draft.set_image(image);
    }

    /// Replace the variant options.
    ///
    /// Once the combinations step has been reached the rows are reconciled
    /// right away; before that they are prepared on entering the step.
    pub fn update_variants(&mut self, variants: Vec<VariantOption>) {
        self.draft.variants = variants;
        if self.draft.step > WizardStep::Variants {
            self.draft.combinations =
                prepare_combinations(&self.draft.combinations, &self.draft.variants);
        }
    }

    pub fn update_combination(
        &mut self,
        key: CombinationKey,
        update: CombinationUpdate,
    ) -> Result<(), WizardError> {
        self.draft.combinations.update(key, update)?;
        Ok(())
    }

    /// Parse and record the pricing form.
    ///
    /// Unparsable fields are cleared in the draft and reported; the same errors
    /// block `next()` until the form is corrected.
    pub fn update_pricing(&mut self, form: &PricingForm) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.draft.price = match parse_price(&form.price) {
            Ok(price) => Some(price),
            Err(err) => {
                errors.add(err);
                None
            }
        };
        self.draft.discount = match parse_discount(form.method, &form.discount) {
            Ok(discount) => discount,
            Err(err) => {
                errors.add(err);
                Discount::None
            }
        };

        self.pricing_errors = errors.clone();
        errors.into_result()
    }

    /// Live price preview. Uses the same pricing rules as the commit gate.
    pub fn final_price_preview(&self) -> Option<PriceQuote> {
        self.draft.quote()
    }

    /// Rule failures blocking the current step.
    pub fn validate_current(&self) -> ValidationErrors {
        let categories = self.catalogue.categories();
        let mut errors = validation::validate_step(self.draft.step, &self.draft, &categories);
        if self.draft.step == WizardStep::Pricing {
            errors.extend(self.pricing_errors.clone());
        }
        errors
    }

    /// Advance one step, or commit from the pricing step.
    pub async fn next(&mut self) -> Result<StepOutcome, WizardError> {
        let step = self.draft.step;
        let errors = self.validate_current();
        if !errors.is_empty() {
            tracing::debug!(step = step.index(), errors = errors.len(), "step blocked");
            return Err(WizardError::Validation(errors));
        }

        let Some(next) = step.next() else {
            return self.commit().await;
        };

        if next == WizardStep::Combinations {
            self.draft.combinations =
                prepare_combinations(&self.draft.combinations, &self.draft.variants);
        }
        self.draft.step = next;
        self.save().await;

        tracing::debug!(from = step.index(), to = next.index(), "step advanced");
        Ok(StepOutcome::Advanced(next))
    }

    /// Move one step back. Never blocked; a no-op on the first step.
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.draft.step.previous() {
            self.draft.step = previous;
        }
        self.draft.step
    }

    /// Turn the draft into a product inside its category.
    ///
    /// On any failure the draft is left as it was.
    pub async fn commit(&mut self) -> Result<StepOutcome, WizardError> {
        let categories = self.catalogue.categories();

        let category_id = self
            .draft
            .category_id()
            .filter(|id| categories.contains_category(*id))
            .ok_or_else(|| WizardError::CategoryNotFound(self.draft.category.clone()))?;

        let mut errors = validation::validate_for_commit(&self.draft, &categories);
        errors.extend(self.pricing_errors.clone());
        errors.into_result()?;

        let product = Product::from_draft(
            ProductId::new(),
            &self.draft,
            &self.settings.fallback_image,
        )?;

        match self.catalogue.add_product(category_id, product.clone()) {
            Ok(()) => {}
            Err(DomainError::NotFound) => {
                return Err(WizardError::CategoryNotFound(category_id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            %category_id,
            product_id = %product.id,
            combinations = self.draft.combinations.len(),
            "product committed"
        );

        self.draft = ProductDraft::new();
        self.pricing_errors = ValidationErrors::new();
        self.clear_saved().await;

        Ok(StepOutcome::Committed {
            category_id,
            product,
        })
    }

    /// Create a category from the "add category" dialog.
    pub fn add_category(&self, name: &str) -> DomainResult<Category> {
        self.catalogue.add_category(name)
    }

    /// Listing view of the catalogue.
    pub fn listing(&self) -> CatalogueListing {
        CatalogueListing::build(
            &self.catalogue.categories(),
            &self.settings.currency_symbol,
            &self.settings.fallback_image,
        )
    }

    async fn save(&self) {
        if let Err(err) = self.drafts.save_draft(Some(&self.draft)).await {
            tracing::warn!(error = %err, "failed to save draft");
        }
    }

    async fn clear_saved(&self) {
        if let Err(err) = self.drafts.save_draft(None).await {
            tracing::warn!(error = %err, "failed to clear saved draft");
        }
    }
}
