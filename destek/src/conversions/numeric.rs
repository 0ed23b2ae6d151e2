use std::str::FromStr;

use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, RoundingMode};
use config::shared::CurrencyFormatConfig;

use crate::types::{Cell, Scalar};

/// Number of fraction digits shown for currency amounts.
const CURRENCY_SCALE: i64 = 2;

/// Largest absolute decimal exponent an amount may carry before rendering.
const MAX_AMOUNT_EXPONENT: i64 = 64;

/// Largest number of significant digits an amount may carry before rendering.
const MAX_AMOUNT_DIGITS: u64 = 40;

/// Renders a currency column cell.
///
/// Numeric cells and numeric text become `<grouped integer><decimal separator><2 digits>
/// <symbol>`, rounded half-up. Empty cells stay empty. Anything that does not parse as a
/// number, or whose magnitude or precision is out of range, is stored unchanged as text.
pub fn format_currency(cell: &Cell, format: &CurrencyFormatConfig) -> Scalar {
    let parsed = match cell {
        Cell::Empty => return Scalar::empty(),
        Cell::Bool(_) => None,
        Cell::Number(value) if value.is_finite() => BigDecimal::from_str(&value.to_string()).ok(),
        Cell::Number(_) => None,
        Cell::Text(text) if text.trim().is_empty() => return Scalar::Text(text.clone()),
        Cell::Text(text) => parse_decimal(text.trim()),
    };

    match parsed.filter(is_renderable) {
        Some(amount) => Scalar::Text(render_amount(&amount, format)),
        None => Scalar::Text(cell.text()),
    }
}

/// Rescaling to two fraction digits costs a power of ten as large as the exponent, so amounts
/// such as `1e99999999` must be rejected before rounding.
fn is_renderable(amount: &BigDecimal) -> bool {
    let (_, scale) = amount.as_bigint_and_exponent();

    scale.abs() <= MAX_AMOUNT_EXPONENT && amount.digits() <= MAX_AMOUNT_DIGITS
}

/// Parses plain decimal notation, optionally signed, with optional exponent.
fn parse_decimal(text: &str) -> Option<BigDecimal> {
    let starts_like_number = text
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit() || c == '.');
    if !starts_like_number {
        return None;
    }

    BigDecimal::from_str(text).ok()
}

/// Formats an amount with grouped integer digits and exactly two fraction digits.
fn render_amount(amount: &BigDecimal, format: &CurrencyFormatConfig) -> String {
    let rounded = amount.with_scale_round(CURRENCY_SCALE, RoundingMode::HalfUp);
    let (mantissa, _) = rounded.as_bigint_and_exponent();

    let digits = format!(
        "{:0>width$}",
        mantissa.magnitude().to_string(),
        width = CURRENCY_SCALE as usize + 1
    );
    let (integer, fraction) = digits.split_at(digits.len() - CURRENCY_SCALE as usize);

    let mut rendered = String::with_capacity(digits.len() + 8);
    if mantissa.sign() == Sign::Minus {
        rendered.push('-');
    }
    rendered.push_str(&group_thousands(integer, &format.thousands_separator));
    rendered.push_str(&format.decimal_separator);
    rendered.push_str(fraction);

    if !format.symbol.is_empty() {
        rendered.push(' ');
        rendered.push_str(&format.symbol);
    }

    rendered
}

/// Inserts `separator` between groups of three digits, counting from the right.
fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    grouped
}
