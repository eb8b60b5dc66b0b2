use std::num::ParseIntError;

use million_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when console input cannot be read as a number.
#[derive(Debug, Error)]
pub enum ParseInputError {
    #[error("invalid amount '{input}': {source}")]
    Amount {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("invalid whole number '{input}': {source}")]
    WholeNumber {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// Normalizes numeric input: trims whitespace, drops a leading `$` and
/// removes commas (thousands separator).
fn normalize_number_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim()
        .replace(',', "")
}

/// Parses a dollar amount into a [`Decimal`].
///
/// Handles `$` and comma as thousands separator (e.g. `"$1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseInputError> {
    let normalized = normalize_number_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseInputError::Amount {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a non-negative whole number such as an age.
pub fn parse_whole_number(s: &str) -> Result<u32, ParseInputError> {
    normalize_number_input(s).parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid whole number: {}", e);
        ParseInputError::WholeNumber {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats a dollar amount with thousands separators, e.g. `$1,234.56`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{:.2}", rounded.abs());
    let (dollars, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in dollars.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let dollars: String = grouped.chars().rev().collect();

    if rounded < Decimal::ZERO {
        format!("-${dollars}.{cents}")
    } else {
        format!("${dollars}.{cents}")
    }
}

/// Formats a percentage value that is already scaled to 0-100.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}
