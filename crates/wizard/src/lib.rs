//! `storefront-wizard`
//!
//! **Responsibility:** owns the add-product wizard state and drives it through
//! its steps against a draft store and a catalogue store.
//!
//! Views hold a `ProductWizard` and call into it on user events; there is no
//! global state.

pub mod bootstrap;
pub mod error;
pub mod wizard;

pub use bootstrap::bootstrap;
pub use error::WizardError;
pub use wizard::{PricingForm, ProductWizard, StepOutcome, WizardSettings};
