//! Catalog Config

use std::path::PathBuf;

use clap::Args;

/// Catalog seeding and display settings.
#[derive(Debug, Args)]
pub struct CatalogConfig {
    /// YAML catalog imported at startup when the catalog is empty
    #[arg(long, env = "CATALOG_FIXTURE")]
    pub catalog_fixture: Option<PathBuf>,

    /// ISO code of the currency amounts are displayed in
    #[arg(long, env = "CURRENCY", default_value = "USD")]
    pub currency: String,
}
