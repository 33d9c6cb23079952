//! Product Search
//!
//! Pure filtering over a loaded catalog. Every filter is conjunctive, so the order in which
//! they are applied only affects how much work is done, never the result.

use rustc_hash::FxHashSet;

use crate::price_range::PriceRange;

/// Sentinel category that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A product that can be searched and filtered.
pub trait Searchable {
    /// Product name
    fn name(&self) -> &str;

    /// Product description
    fn description(&self) -> &str;

    /// Product category
    fn category(&self) -> &str;

    /// Product price in minor units
    fn price(&self) -> u64;
}

/// Product filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    query: Option<String>,
    category: Option<String>,
    min_price: Option<u64>,
    max_price: Option<u64>,
}

impl ProductFilter {
    /// Create a filter that matches every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Match products whose name or description contains `query`, ignoring case.
    ///
    /// Leading and trailing whitespace is trimmed before matching, so `" kale "`
    /// searches for `kale`. A query that is empty after trimming clears the
    /// text condition and matches every product.
    #[must_use]
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim();

        self.query = (!query.is_empty()).then(|| query.to_lowercase());
        self
    }

    /// Match products in exactly this category, unless it is [`ALL_CATEGORIES`].
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();

        self.category = (category != ALL_CATEGORIES).then_some(category);
        self
    }

    /// Match products priced within the inclusive range.
    #[must_use]
    pub fn with_price_range(mut self, range: &PriceRange) -> Self {
        self.min_price = Some(range.min());
        self.max_price = Some(range.max());
        self
    }

    /// Match products priced within the inclusive bounds.
    #[must_use]
    pub fn with_price_bounds(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Lower-cased search text, if any.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Category filter, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Whether a single product passes every filter.
    pub fn matches<P: Searchable>(&self, product: &P) -> bool {
        self.matches_query(product) && self.matches_category(product) && self.matches_price(product)
    }

    fn matches_query<P: Searchable>(&self, product: &P) -> bool {
        let Some(query) = self.query.as_deref() else {
            return true;
        };

        product.name().to_lowercase().contains(query)
            || product.description().to_lowercase().contains(query)
    }

    fn matches_category<P: Searchable>(&self, product: &P) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category() == category)
    }

    fn matches_price<P: Searchable>(&self, product: &P) -> bool {
        let price = product.price();

        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }
}

/// Filter a list of products, preserving their order.
pub fn filter_products<P: Searchable>(products: Vec<P>, filter: &ProductFilter) -> Vec<P> {
    products
        .into_iter()
        .filter(|product| filter.matches(product))
        .collect()
}

/// List [`ALL_CATEGORIES`] followed by each distinct category in first-seen order.
pub fn categories<P: Searchable>(products: &[P]) -> Vec<String> {
    let mut seen = FxHashSet::default();

    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(
            products
                .iter()
                .map(Searchable::category)
                .filter(|category| seen.insert(*category))
                .map(ToString::to_string),
        )
        .collect()
}
