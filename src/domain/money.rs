use crate::error::CheckoutError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Largest amount the sample lets a user enter.
pub const MAX_AMOUNT: Decimal = dec!(99999.99);

/// An ISO 4217 currency together with what is needed to display it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Currency {
    code: &'static str,
    symbol: &'static str,
    fraction_digits: u32,
}

impl Currency {
    pub const RUB: Self = Self {
        code: "RUB",
        symbol: "\u{20BD}",
        fraction_digits: 2,
    };
    pub const USD: Self = Self {
        code: "USD",
        symbol: "$",
        fraction_digits: 2,
    };
    pub const EUR: Self = Self {
        code: "EUR",
        symbol: "\u{20AC}",
        fraction_digits: 2,
    };
    pub const JPY: Self = Self {
        code: "JPY",
        symbol: "\u{FFE5}",
        fraction_digits: 0,
    };

    const KNOWN: [Self; 4] = [Self::RUB, Self::USD, Self::EUR, Self::JPY];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|currency| currency.code.eq_ignore_ascii_case(code))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Number of fraction digits the currency is normally shown with.
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::RUB
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code.to_string()
    }
}

impl TryFrom<String> for Currency {
    type Error = CheckoutError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
            .ok_or_else(|| CheckoutError::ValidationError(format!("Unknown currency: {code}")))
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Self::try_from(code).map_err(serde::de::Error::custom)
    }
}

/// A money amount in a specific currency, as handed to the payment SDK.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    pub value: Decimal,
    pub currency: Currency,
}

impl Amount {
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Builds an amount that is accepted for payment, i.e. strictly positive.
    pub fn positive(value: Decimal, currency: Currency) -> Result<Self, CheckoutError> {
        if value > Decimal::ZERO {
            Ok(Self::new(value, currency))
        } else {
            Err(CheckoutError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_lookup_is_case_insensitive() {
        assert_eq!(Currency::from_code("rub"), Some(Currency::RUB));
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XXX"), None);
    }

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::EUR).unwrap();
        assert_eq!(json, "\"EUR\"");

        let parsed: Currency = serde_json::from_str("\"RUB\"").unwrap();
        assert_eq!(parsed, Currency::RUB);
        assert!(serde_json::from_str::<Currency>("\"ABC\"").is_err());
    }

    #[test]
    fn test_amount_deserializes_with_currency() {
        let amount: Amount = serde_json::from_str(r#"{"value":"12.50","currency":"usd"}"#).unwrap();
        assert_eq!(amount, Amount::new(dec!(12.50), Currency::USD));
    }

    #[test]
    fn test_positive_amount_validation() {
        assert!(Amount::positive(dec!(0.01), Currency::RUB).is_ok());
        assert!(matches!(
            Amount::positive(dec!(0), Currency::RUB),
            Err(CheckoutError::ValidationError(_))
        ));
        assert!(matches!(
            Amount::positive(dec!(-1), Currency::RUB),
            Err(CheckoutError::ValidationError(_))
        ));
    }
}
