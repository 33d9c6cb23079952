//! Price Range
//!
//! A two-ended price control. Whichever bound is moved gets clamped so that the range
//! always keeps [`MIN_SEPARATION`] between its ends.

/// Minimum gap between the lower and upper bound: half a currency unit, in minor units.
pub const MIN_SEPARATION: u64 = 50;

/// Minor units per whole currency unit.
const UNIT: u64 = 100;

/// Price range control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: u64,
    max: u64,
    ceiling: u64,
}

impl PriceRange {
    /// Create a range spanning `[0, ceiling]`.
    ///
    /// Ceilings too small to hold [`MIN_SEPARATION`] are raised to one whole unit.
    pub fn new(ceiling: u64) -> Self {
        let ceiling = if ceiling < MIN_SEPARATION {
            UNIT
        } else {
            ceiling
        };

        Self {
            min: 0,
            max: ceiling,
            ceiling,
        }
    }

    /// Create a range for a catalog, with the ceiling derived from its prices.
    pub fn for_prices(prices: impl IntoIterator<Item = u64>) -> Self {
        Self::new(max_price_ceiling(prices))
    }

    /// Lower bound
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Highest value either bound may take.
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Move the lower bound, clamping it to `[0, max - MIN_SEPARATION]`.
    pub fn set_min(&mut self, value: u64) -> &mut Self {
        self.min = value
            .min(self.ceiling)
            .min(self.max.saturating_sub(MIN_SEPARATION));

        self
    }

    /// Move the upper bound, clamping it to `[min + MIN_SEPARATION, ceiling]`.
    pub fn set_max(&mut self, value: u64) -> &mut Self {
        self.max = value.min(self.ceiling).max(self.min + MIN_SEPARATION);

        self
    }

    /// Whether `price` falls inside the inclusive range.
    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

/// The highest price, rounded up to the next whole currency unit.
pub fn max_price_ceiling(prices: impl IntoIterator<Item = u64>) -> u64 {
    prices
        .into_iter()
        .max()
        .map_or(0, |max| max.div_ceil(UNIT) * UNIT)
}
