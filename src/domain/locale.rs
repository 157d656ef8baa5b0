use crate::error::CheckoutError;
use std::fmt;
use std::str::FromStr;

/// Where a locale puts the currency symbol relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1 234,50 €`, separated by a no-break space.
    Suffix,
}

/// Number formatting conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub symbol_position: SymbolPosition,
}

impl Locale {
    pub const EN_US: Self = Self {
        tag: "en-US",
        decimal_separator: '.',
        grouping_separator: ',',
        symbol_position: SymbolPosition::Prefix,
    };
    pub const RU_RU: Self = Self {
        tag: "ru-RU",
        decimal_separator: ',',
        grouping_separator: '\u{A0}',
        symbol_position: SymbolPosition::Suffix,
    };
    pub const DE_DE: Self = Self {
        tag: "de-DE",
        decimal_separator: ',',
        grouping_separator: '.',
        symbol_position: SymbolPosition::Suffix,
    };

    const KNOWN: [Self; 3] = [Self::EN_US, Self::RU_RU, Self::DE_DE];

    /// Whether `c` is read as a decimal point when parsing user input.
    ///
    /// The locale separator always counts. A plain `.` counts too, unless the
    /// locale already uses it for grouping.
    pub fn is_decimal_point(&self, c: char) -> bool {
        c == self.decimal_separator || (c == '.' && self.grouping_separator != '.')
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::EN_US
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

impl FromStr for Locale {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "-");
        Self::KNOWN
            .into_iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| CheckoutError::ValidationError(format!("Unsupported locale: {s}")))
    }
}
