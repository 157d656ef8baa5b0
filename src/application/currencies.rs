//! Currency display strings.

use crate::domain::locale::{Locale, SymbolPosition};
use crate::domain::money::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

const NO_BREAK_SPACE: char = '\u{A0}';

/// How much of the fraction the user has typed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedFraction {
    /// No decimal separator yet: `12`.
    None,
    /// A separator with nothing after it: `12.`.
    Separator,
    /// One or two fraction digits: `12.3`, `12.34`.
    Digits(u32),
}

impl TypedFraction {
    /// Reads the fraction state off a canonical numeric string such as `"12.3"`.
    pub fn of(numeric: &str) -> Self {
        match numeric.split_once('.') {
            None => TypedFraction::None,
            Some((_, fraction)) if fraction.is_empty() => TypedFraction::Separator,
            Some((_, fraction)) => TypedFraction::Digits(fraction.len().min(2) as u32),
        }
    }
}

/// Formats `value` in `currency` with at most `max_fraction_digits` digits,
/// always rounding down.
pub fn format(value: Decimal, currency: Currency, locale: &Locale, max_fraction_digits: u32) -> String {
    let min_fraction_digits = currency.fraction_digits().min(max_fraction_digits);
    let number = format_number(value, locale, min_fraction_digits, max_fraction_digits);

    if currency == Currency::RUB {
        // grouped number followed by the ruble sign, in every locale
        return format!("{number} {}", currency.symbol());
    }

    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{}{number}", currency.symbol()),
        SymbolPosition::Suffix => format!("{number}{NO_BREAK_SPACE}{}", currency.symbol()),
    }
}

/// Formats `value` the way it should look while the user is still typing it.
pub fn format_as_user_input(
    value: Decimal,
    currency: Currency,
    locale: &Locale,
    fraction: TypedFraction,
) -> String {
    match fraction {
        TypedFraction::None => format(value, currency, locale, 0),
        TypedFraction::Digits(digits) => format(value, currency, locale, digits),
        TypedFraction::Separator => {
            // format with one digit, then drop that digit to keep a bare separator
            let formatted = format(value, currency, locale, 1);
            let mut chars: Vec<char> = formatted.chars().collect();
            match chars.iter().position(|c| *c == locale.decimal_separator) {
                Some(index) if index + 2 <= chars.len() => {
                    chars.remove(index + 1);
                    chars.into_iter().collect()
                }
                _ => formatted,
            }
        }
    }
}

fn format_number(value: Decimal, locale: &Locale, min_fraction: u32, max_fraction: u32) -> String {
    let floored = value.round_dp_with_strategy(max_fraction, RoundingStrategy::ToNegativeInfinity);
    let negative = floored.is_sign_negative() && !floored.is_zero();
    let plain = floored.abs().to_string();

    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut fraction: String = fraction.chars().take(max_fraction as usize).collect();
    while fraction.len() < max_fraction as usize {
        fraction.push('0');
    }
    while fraction.len() > min_fraction as usize && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut out = String::with_capacity(plain.len() + 8);
    if negative {
        out.push('-');
    }
    let digits = integer.len();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(locale.grouping_separator);
        }
        out.push(c);
    }
    if !fraction.is_empty() {
        out.push(locale.decimal_separator);
        out.push_str(&fraction);
    }
    out
}
