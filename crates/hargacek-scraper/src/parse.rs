//! Low-level string helpers shared by the extractor and the normalizer.
//!
//! Price text from marketplace pages carries currency symbols and thousands
//! separators (`"Rp1.800.000"`). Coercion keeps only ASCII digits, so the
//! separator convention of a given storefront never matters.

use crate::types::RawPrice;

/// Parses a displayed price into whole currency units.
///
/// Every non-digit byte is dropped before parsing. Returns `0` when no digit
/// remains or the digits overflow `u64`.
#[must_use]
pub fn parse_price_text(text: &str) -> u64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// Rounds an API-provided price. Negative, NaN and infinite values yield `0`.
#[must_use]
pub fn price_from_number(value: f64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ceiling = u64::MAX as f64;
    let rounded = value.round();
    if rounded >= ceiling {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = rounded as u64;
    whole
}

/// Coerces an optional raw price, `None` becoming `0`.
#[must_use]
pub fn coerce_price(price: Option<&RawPrice>) -> u64 {
    match price {
        Some(RawPrice::Text(text)) => parse_price_text(text),
        Some(RawPrice::Number(value)) => price_from_number(*value),
        None => 0,
    }
}

/// Collapses internal whitespace runs to single spaces and trims the ends.
/// Returns `None` for text that is empty after collapsing.
#[must_use]
pub fn clean_text(text: &str) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
