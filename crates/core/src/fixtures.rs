//! Catalog Fixtures
//!
//! YAML catalogs used to seed a storefront, e.g.
//!
//! ```yaml
//! products:
//!   tomatoes:
//!     name: Organic Tomatoes
//!     category: vegetables
//!     price: 2.99 USD
//!     unit: kg
//!     stock: 50
//!     description: Fresh, ripe organic tomatoes
//!     image_url: https://example.com/tomatoes.jpeg
//!     farmer: farmer1
//! ```

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{pricing::find_currency, search::Searchable};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Product price (e.g., "2.99 USD")
    pub price: String,

    /// Unit the price is quoted per (e.g., "kg")
    pub unit: String,

    /// Units in stock
    #[serde(default)]
    pub stock: u32,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product image
    #[serde(default)]
    pub image_url: String,

    /// Owning farmer reference
    pub farmer: String,
}

/// A catalog product parsed from a fixture, priced in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Fixture key
    pub key: String,

    /// Product name
    pub name: String,

    /// Product category
    pub category: String,

    /// Price in minor units
    pub price: u64,

    /// Unit the price is quoted per
    pub unit: String,

    /// Units in stock
    pub stock: u32,

    /// Product description
    pub description: String,

    /// Product image
    pub image_url: String,

    /// Owning farmer reference
    pub farmer: String,
}

impl Searchable for CatalogEntry {
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

/// A parsed catalog in a single currency.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog currency, `None` when the catalog is empty.
    pub currency: Option<&'static Currency>,

    /// Entries ordered by fixture key.
    pub entries: Vec<CatalogEntry>,
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Read and parse a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// Convert the fixture into priced catalog entries.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is malformed or products use different currencies.
    pub fn into_catalog(self) -> Result<Catalog, FixtureError> {
        let mut products: Vec<(String, ProductFixture)> = self.products.into_iter().collect();

        products.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut currency: Option<&'static Currency> = None;
        let mut entries = Vec::with_capacity(products.len());

        for (key, product) in products {
            let (price, product_currency) = parse_price(&product.price)?;

            match currency {
                Some(existing) if existing != product_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        product_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(product_currency),
            }

            entries.push(CatalogEntry {
                key,
                name: product.name,
                category: product.category,
                price,
                unit: product.unit,
                stock: product.stock,
                description: product.description,
                image_url: product.image_url,
                farmer: product.farmer,
            });
        }

        Ok(Catalog { currency, entries })
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(u64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_u64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency =
        find_currency(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use super::*;

    const CATALOG: &str = r"
products:
  tomatoes:
    name: Organic Tomatoes
    category: vegetables
    price: 2.99 USD
    unit: kg
    stock: 50
    description: Fresh, ripe organic tomatoes
    image_url: https://example.com/tomatoes.jpeg
    farmer: farmer1
  bananas:
    name: Organic Bananas
    category: fruits
    price: 1.49 USD
    unit: kg
    farmer: farmer2
";

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_trailing_parts() {
        let result = parse_price("2.99 USD each");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1.00 USD");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_usd_and_eur() -> TestResult {
        let (usd_minor, usd) = parse_price("1.00 USD")?;
        let (eur_minor, eur) = parse_price("2.50 EUR")?;

        assert_eq!(usd_minor, 100);
        assert_eq!(usd, USD);
        assert_eq!(eur_minor, 250);
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn catalog_entries_are_sorted_by_key_with_defaults() -> TestResult {
        let catalog = CatalogFixture::from_yaml(CATALOG)?.into_catalog()?;

        assert_eq!(catalog.currency, Some(USD));

        let keys: Vec<&str> = catalog.entries.iter().map(|e| e.key.as_str()).collect();

        assert_eq!(keys, ["bananas", "tomatoes"]);

        let bananas = catalog.entries.first().ok_or("missing bananas")?;

        assert_eq!(bananas.price, 1_49);
        assert_eq!(bananas.stock, 0);
        assert!(bananas.description.is_empty());

        Ok(())
    }

    #[test]
    fn catalog_rejects_mixed_currencies() -> TestResult {
        let yaml = CATALOG.replace("1.49 USD", "1.49 EUR");

        let result = CatalogFixture::from_yaml(&yaml)?.into_catalog();

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn load_reads_fixture_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        file.write_all(CATALOG.as_bytes())?;

        let fixture = CatalogFixture::load(file.path())?;

        assert_eq!(fixture.products.len(), 2);

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = CatalogFixture::load("/definitely/not/here.yml");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
