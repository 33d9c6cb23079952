//! Local Store
//!
//! A single JSON document of keyed values, optionally mirrored to a file. Buyer carts live
//! under `cart_<buyer uuid>`, orders under `orders` and the catalog under `products`.
//! Every operation takes the document lock, so each read-modify-write is atomic with
//! respect to other store operations.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use tracing::debug;

/// Key of the global order list.
pub const ORDERS_KEY: &str = "orders";

/// Key of the catalog.
pub const PRODUCTS_KEY: &str = "products";

/// Key of a buyer's cart lines.
pub fn cart_key(buyer: impl Display) -> String {
    format!("cart_{buyer}")
}

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("failed to access local store file")]
    Io(#[from] std::io::Error),

    #[error("malformed local store document")]
    Json(#[from] serde_json::Error),
}

type Document = Map<String, Value>;

#[derive(Debug, Clone)]
pub struct LocalStore {
    document: Arc<Mutex<Document>>,
    path: Option<PathBuf>,
}

impl LocalStore {
    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            document: Arc::new(Mutex::new(Document::new())),
            path: None,
        }
    }

    /// Open a store backed by `path`, starting empty when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or is not a JSON object.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LocalStoreError> {
        let path = path.as_ref().to_path_buf();

        let document = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Document>(&bytes)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "local store file missing, starting empty");

                Document::new()
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self {
            document: Arc::new(Mutex::new(document)),
            path: Some(path),
        })
    }

    /// Read the value under `key`, or its default when absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored value does not decode as `T`.
    pub async fn read<T>(&self, key: &str) -> Result<T, LocalStoreError>
    where
        T: DeserializeOwned + Default,
    {
        let document = self.document.lock().await;

        decode(&document, key)
    }

    /// Modify the value under `key` in place and persist the document.
    ///
    /// Nothing is written when `f` fails.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or a store error when decoding, encoding or writing fails.
    pub async fn update<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        E: From<LocalStoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let mut document = self.document.lock().await;

        let mut value: T = decode(&document, key)?;

        let result = f(&mut value)?;

        let encoded = serde_json::to_value(&value).map_err(LocalStoreError::from)?;

        let previous = document.insert(key.to_string(), encoded);

        if let Err(error) = self.persist(&document).await {
            match previous {
                Some(previous) => document.insert(key.to_string(), previous),
                None => document.remove(key),
            };

            return Err(error.into());
        }

        Ok(result)
    }

    /// Remove `key` and persist the document. Returns whether the key was present.
    ///
    /// # Errors
    ///
    /// Returns an error when writing the document fails.
    pub async fn remove(&self, key: &str) -> Result<bool, LocalStoreError> {
        let mut document = self.document.lock().await;

        let Some(previous) = document.remove(key) else {
            return Ok(false);
        };

        if let Err(error) = self.persist(&document).await {
            document.insert(key.to_string(), previous);

            return Err(error);
        }

        Ok(true)
    }

    async fn persist(&self, document: &Document) -> Result<(), LocalStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(document)?;
        let staging = path.with_extension("tmp");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&staging, bytes).await?;
        fs::rename(&staging, path).await?;

        Ok(())
    }
}

fn decode<T>(document: &Document, key: &str) -> Result<T, LocalStoreError>
where
    T: DeserializeOwned + Default,
{
    document
        .get(key)
        .cloned()
        .map_or_else(|| Ok(T::default()), serde_json::from_value)
        .map_err(LocalStoreError::from)
}
