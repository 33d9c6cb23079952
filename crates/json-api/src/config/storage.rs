//! Storage Config

use std::path::PathBuf;

use clap::Args;

use farmgate_app::context::StorageBackend;

/// Persistence backend settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Storage backend (postgres, local)
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Postgres)]
    pub storage: StorageBackend,

    /// `PostgreSQL` connection string, required for the postgres backend
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Local store file, used by the local backend
    #[arg(long, env = "LOCAL_STORE_PATH", default_value = "farmgate-store.json")]
    pub local_store_path: PathBuf,
}
