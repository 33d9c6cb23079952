use std::{error::Error, path::PathBuf};

use clap::Args;
use farmgate_app::context::{AppContext, StorageBackend};

#[derive(Debug, Args)]
pub(crate) struct ImportArgs {
    /// Catalog fixture file
    #[arg(long)]
    file: PathBuf,

    /// Storage backend to import into
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Postgres)]
    storage: StorageBackend,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Local store file
    #[arg(long, env = "LOCAL_STORE_PATH", default_value = "farmgate-store.json")]
    local_store_path: PathBuf,

    /// Skip the import when the catalog already has products
    #[arg(long)]
    if_empty: bool,
}

pub(crate) async fn run(args: ImportArgs) -> Result<(), String> {
    let ctx = AppContext::for_backend(
        args.storage,
        args.database_url.as_deref(),
        &args.local_store_path,
    )
    .await
    .map_err(|error| format!("failed to open storage: {}", chain(&error)))?;

    let imported = if args.if_empty {
        ctx.seed_catalog(&args.file).await
    } else {
        ctx.import_catalog(&args.file).await
    }
    .map_err(|error| format!("failed to import catalog: {}", chain(&error)))?;

    println!("imported {imported} products from {}", args.file.display());

    Ok(())
}

fn chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
