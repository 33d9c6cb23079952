//! Product Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use farmgate::{fixtures::CatalogEntry, search::Searchable};

use crate::uuids::TypedUuid;

/// Stock level below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub unit: String,
    pub stock: u32,
    pub description: String,
    pub image_url: String,
    pub farmer: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Whether at least one unit can be added to a cart.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether the product is in stock but running low.
    pub fn low_stock(&self) -> bool {
        self.in_stock() && self.stock < LOW_STOCK_THRESHOLD
    }
}

impl Searchable for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn price(&self) -> u64 {
        self.price
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub unit: String,
    pub stock: u32,
    pub description: String,
    pub image_url: String,
    pub farmer: String,
}

impl From<CatalogEntry> for NewProduct {
    fn from(entry: CatalogEntry) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: entry.name,
            category: entry.category,
            price: entry.price,
            unit: entry.unit,
            stock: entry.stock,
            description: entry.description,
            image_url: entry.image_url,
            farmer: entry.farmer,
        }
    }
}
