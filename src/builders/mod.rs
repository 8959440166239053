//! Builders for auxiliary structures: numbered tables and block quotes.
//!
//! Both builders memoize by input value, so they are owned by a single
//! generator and their caches live exactly as long as it does.

pub mod cache;
pub mod quote;
pub mod table;

pub use quote::{QuoteBuilder, QuoteResult, LONG_QUOTE_WORDS};
pub use table::{TableBuilder, TableResult};

/// Trimmed value, or `None` when absent or blank.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
