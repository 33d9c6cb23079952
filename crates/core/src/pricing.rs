//! Pricing

use rusty_money::{
    Money,
    iso::{EUR, GBP, INR, USD},
};
use thiserror::Error;

pub use rusty_money::iso::Currency;

/// Errors that can occur while totalling cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Line or cart total does not fit in the amount type.
    #[error("amount overflow while totalling {0} lines")]
    Overflow(usize),
}

/// A priced line with a quantity, such as a cart item.
pub trait PricedLine {
    /// Unit price in minor units, `None` when the product is unknown.
    fn unit_price(&self) -> Option<u64>;

    /// Number of units on the line.
    fn quantity(&self) -> u32;
}

/// Derived totals for a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Sum of unit price × quantity, in minor units.
    pub total: u64,

    /// Sum of quantities.
    pub count: u64,
}

/// Calculates the total of a single line. Lines without a price count as zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the line total does not fit in a `u64`.
pub fn line_total<L: PricedLine>(line: &L) -> Result<u64, PricingError> {
    line.unit_price()
        .unwrap_or_default()
        .checked_mul(u64::from(line.quantity()))
        .ok_or(PricingError::Overflow(1))
}

/// Calculates the total price and unit count of a list of lines.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the total does not fit in a `u64`.
pub fn totals<L: PricedLine>(lines: &[L]) -> Result<Totals, PricingError> {
    lines.iter().try_fold(Totals::default(), |acc, line| {
        let total = line_total(line)
            .ok()
            .and_then(|line_total| acc.total.checked_add(line_total))
            .ok_or(PricingError::Overflow(lines.len()))?;

        Ok(Totals {
            total,
            count: acc.count + u64::from(line.quantity()),
        })
    })
}

/// Formats an amount in minor units for display, e.g. `$7.47`.
///
/// Amounts above `i64::MAX` minor units saturate and render as `i64::MAX`.
pub fn display_amount(amount: u64, currency: &'static Currency) -> String {
    let minor = i64::try_from(amount).unwrap_or(i64::MAX);

    Money::from_minor(minor, currency).to_string()
}

/// Looks up a supported ISO currency by its alpha code.
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    match code {
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        "INR" => Some(INR),
        _ => None,
    }
}
