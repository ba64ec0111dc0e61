use thiserror::Error;

use storefront_catalog::ValidationErrors;
use storefront_core::DomainError;

/// Failures surfaced to the wizard's caller. None of them are fatal: the draft
/// stays editable after every one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// One or more field rules failed; the step did not change.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// The selected category no longer resolves; the commit was aborted.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
