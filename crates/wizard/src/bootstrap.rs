use anyhow::Context;

use storefront_catalog::Category;
use storefront_infra::{InMemoryCatalogueStore, SqliteDraftStore, StorefrontConfig};

use crate::wizard::{ProductWizard, WizardSettings};

/// Wire a wizard from configuration: logging, the SQLite draft store and an
/// in-memory catalogue seeded with `categories`.
pub async fn bootstrap(
    config: &StorefrontConfig,
    categories: Vec<Category>,
) -> anyhow::Result<ProductWizard<SqliteDraftStore, InMemoryCatalogueStore>> {
    storefront_observability::init_with(config.log_format);

    let drafts = SqliteDraftStore::connect(&config.draft_database_url, config.draft_key.clone())
        .await
        .with_context(|| {
            format!(
                "failed to open draft store at {} - ensure the path is writable",
                config.draft_database_url
            )
        })?;

    let catalogue = InMemoryCatalogueStore::with_categories(categories);

    tracing::info!(
        draft_store = %config.draft_database_url,
        draft_key = %config.draft_key,
        "storefront wizard ready"
    );

    Ok(ProductWizard::new(
        drafts,
        catalogue,
        WizardSettings::from(config),
    ))
}
