//! Year -> transaction count mapping and the prefix slice it drives.
//!
//! The year does not select transactions *from* that year. It only decides
//! how many records of the (externally pre-sorted) dataset are shown.

use serde::Serialize;

use crate::config::YearRange;
use crate::models::Transaction;

/// Current slider year and the transaction count derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub current_year: i32,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct YearFilter {
    range: YearRange,
}

impl YearFilter {
    pub fn new(range: YearRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    /// `base_count + (year - base_year) * increment_per_year`, unclamped.
    pub fn compute_count(&self, year: i32) -> i64 {
        let years_since_base = i64::from(year) - i64::from(self.range.base_year);
        self.range
            .base_count
            .saturating_add(years_since_base.saturating_mul(self.range.increment_per_year))
    }

    /// Pins a year to the slider bounds.
    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.range.min_year, self.range.max_year)
    }

    pub fn initial_state(&self) -> FilterState {
        self.state_for(self.range.min_year)
    }

    /// Filter state for a year, after clamping it to the slider bounds.
    pub fn state_for(&self, year: i32) -> FilterState {
        let current_year = self.clamp_year(year);
        FilterState {
            current_year,
            transaction_count: self.compute_count(current_year),
        }
    }
}

/// Length of the visible prefix: `min(count, total)`, with negative counts
/// producing an empty prefix.
pub fn prefix_len(count: i64, total: usize) -> usize {
    if count <= 0 {
        return 0;
    }
    usize::try_from(count).map_or(total, |count| count.min(total))
}

/// The first `count` transactions, order preserved.
pub fn prefix(transactions: &[Transaction], count: i64) -> &[Transaction] {
    &transactions[..prefix_len(count, transactions.len())]
}
