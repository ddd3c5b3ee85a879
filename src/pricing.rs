//! Pricing

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use thiserror::Error;

use crate::cart::CartLine;

/// A price in a single ISO currency, held as integer minor units.
///
/// Every currency this crate accepts has two decimal places, so one minor
/// unit is always one hundredth of the major unit.
pub type Price = Money<'static, Currency>;

/// Errors that can occur while reading prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The price string was not in the `AMOUNT CURRENCY` format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Prices cannot be negative.
    #[error("Negative price: {0}")]
    NegativePrice(String),

    /// Unknown or unsupported currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up a supported currency by its ISO alpha code.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] for anything other than INR, GBP, USD or EUR.
pub fn currency_for_code(code: &str) -> Result<&'static Currency, PricingError> {
    match code.trim() {
        "INR" => Ok(INR),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(PricingError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a price string (e.g., "9.99 INR") into a [`Price`].
///
/// Amounts are rounded to two decimal places before conversion to minor units.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a valid non-negative decimal, or if the currency
/// code is not recognized.
pub fn parse_price(s: &str) -> Result<Price, PricingError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(PricingError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| PricingError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PricingError::NegativePrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| PricingError::InvalidPrice(s.to_string()))?;

    let currency = currency_for_code(currency_code)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Price of `quantity` units at `price` each.
///
/// Saturates at the bounds of `i64` minor units rather than overflowing.
pub fn line_total(price: &Price, quantity: u32) -> Price {
    let minor_units = price
        .to_minor_units()
        .saturating_mul(i64::from(quantity));

    Money::from_minor(minor_units, price.currency())
}

/// Sum of `price * quantity` over the given cart lines.
///
/// An empty set of lines totals to zero in `currency`.
pub fn total_price<'l>(
    lines: impl IntoIterator<Item = &'l CartLine>,
    currency: &'static Currency,
) -> Price {
    let minor_units = lines.into_iter().fold(0_i64, |acc, line| {
        acc.saturating_add(line_total(line.price(), line.quantity()).to_minor_units())
    });

    Money::from_minor(minor_units, currency)
}

/// Format a price for display, e.g. `₹1,234.50`.
///
/// Thousands are separated with commas in groups of three and the fraction
/// has as many digits as the currency's exponent. Currencies without a known
/// symbol are rendered with their ISO code as a suffix.
pub fn format_price(price: &Price) -> String {
    let minor_units = price.to_minor_units();
    let abs_minor = minor_units.unsigned_abs();
    let exponent = price.currency().exponent;
    let scale = 10_u64.checked_pow(exponent).unwrap_or(1);
    let major_units = group_thousands(abs_minor / scale);
    let fraction = match usize::try_from(exponent) {
        Ok(0) | Err(_) => String::new(),
        Ok(width) => format!(".{:0width$}", abs_minor % scale),
    };
    let sign = if minor_units < 0 { "-" } else { "" };
    let currency_code = price.currency().iso_alpha_code;

    let symbol = match currency_code {
        "INR" => "₹",
        "GBP" => "£",
        "USD" => "$",
        "EUR" => "€",
        _ => "",
    };

    if symbol.is_empty() {
        format!("{sign}{major_units}{fraction} {currency_code}")
    } else {
        format!("{sign}{symbol}{major_units}{fraction}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(',');
        }

        grouped.push(digit);
    }

    grouped
}
