//! Request and result types exchanged with the payment SDK.
//!
//! The SDK itself lives outside this crate. These types mirror its public
//! contract: what goes into a tokenize or 3-D Secure request, and how the
//! result codes and extras of a finished flow are read back.

use super::money::Amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Result code of a flow that finished normally.
pub const RESULT_OK: i32 = -1;
/// Result code of a flow the user backed out of.
pub const RESULT_CANCELED: i32 = 0;
/// Result code the SDK uses for failures (the first user-defined code).
pub const RESULT_ERROR: i32 = 1;

pub const EXTRA_PAYMENT_TOKEN: &str = "ru.yoomoney.sdk.kassa.payments.extra.PAYMENT_TOKEN";
pub const EXTRA_PAYMENT_METHOD_TYPE: &str =
    "ru.yoomoney.sdk.kassa.payments.extra.PAYMENT_METHOD_TYPE";
pub const EXTRA_ERROR_CODE: &str = "ru.yoomoney.sdk.kassa.payments.extra.ERROR_CODE";
pub const EXTRA_ERROR_DESCRIPTION: &str = "ru.yoomoney.sdk.kassa.payments.extra.ERROR_DESCRIPTION";
pub const EXTRA_ERROR_FAILING_URL: &str = "ru.yoomoney.sdk.kassa.payments.extra.ERROR_FAILING_URL";
pub const EXTRA_CARD_NUMBER: &str = "cardNumber";
pub const EXTRA_EXPIRY_MONTH: &str = "expiryMonth";
pub const EXTRA_EXPIRY_YEAR: &str = "expiryYear";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    YooMoney,
    BankCard,
    Sberbank,
    GooglePay,
}

impl PaymentMethodType {
    /// Parses the wire name the SDK puts into result extras, e.g. `BANK_CARD`.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(Value::String(name.to_string())).ok()
    }
}

impl fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(Value::String(name)) => f.write_str(&name),
            _ => Err(fmt::Error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavePaymentMethod {
    #[default]
    UserSelects,
    On,
    Off,
}

impl SavePaymentMethod {
    /// Maps the stored settings id; unknown ids let the user decide.
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => SavePaymentMethod::On,
            2 => SavePaymentMethod::Off,
            _ => SavePaymentMethod::UserSelects,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            SavePaymentMethod::UserSelects => 0,
            SavePaymentMethod::On => 1,
            SavePaymentMethod::Off => 2,
        }
    }
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Packs the color as an opaque ARGB integer.
    pub fn to_argb(&self) -> u32 {
        0xFF00_0000 | (u32::from(self.red) << 16) | (u32::from(self.green) << 8) | u32::from(self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentParameters {
    pub amount: Amount,
    pub title: String,
    pub subtitle: String,
    pub client_application_key: String,
    pub shop_id: String,
    pub save_payment_method: SavePaymentMethod,
    pub payment_method_types: BTreeSet<PaymentMethodType>,
    pub gateway_id: String,
    pub custom_return_url: String,
    pub user_phone_number: Option<String>,
    pub auth_center_client_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiParameters {
    pub show_logo: bool,
    pub color_scheme: ColorScheme,
}

/// Test-mode settings that make the SDK simulate its backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MockConfiguration {
    pub complete_with_error: bool,
    pub payment_auth_passed: bool,
    pub linked_cards_count: i32,
    pub service_fee: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestParameters {
    pub show_logs: bool,
    pub google_pay_test_environment: bool,
    pub mock_configuration: Option<MockConfiguration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizeRequest {
    pub payment_parameters: PaymentParameters,
    pub test_parameters: TestParameters,
    pub ui_parameters: UiParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizationResult {
    pub payment_token: String,
    pub payment_method_type: PaymentMethodType,
}

/// Card data the sample returns to the SDK after scanning a bank card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanBankCardResult {
    pub card_number: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
}

impl ScanBankCardResult {
    pub fn into_extras(self) -> BTreeMap<String, Value> {
        BTreeMap::from([
            (EXTRA_CARD_NUMBER.to_string(), Value::from(self.card_number)),
            (EXTRA_EXPIRY_MONTH.to_string(), Value::from(self.expiry_month)),
            (EXTRA_EXPIRY_YEAR.to_string(), Value::from(self.expiry_year)),
        ])
    }
}

/// What a finished activity hands back: a result code and optional extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultIntent {
    pub result_code: i32,
    #[serde(default)]
    pub extras: Option<BTreeMap<String, Value>>,
}

impl ResultIntent {
    pub fn new(result_code: i32) -> Self {
        Self {
            result_code,
            extras: None,
        }
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extras
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    fn string_extra(&self, key: &str) -> Option<String> {
        self.extras
            .as_ref()?
            .get(key)?
            .as_str()
            .map(str::to_string)
    }

    fn int_extra(&self, key: &str) -> Option<i64> {
        self.extras.as_ref()?.get(key)?.as_i64()
    }
}

/// Outcome of an SDK flow as the sample sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityResult<T> {
    Ok(T),
    Canceled,
    Error {
        code: i32,
        description: Option<String>,
        failing_url: Option<String>,
    },
}

impl ActivityResult<TokenizationResult> {
    /// Reads a tokenize result. Missing or malformed data counts as cancelled.
    pub fn from_tokenize_intent(intent: &ResultIntent) -> Self {
        match intent.result_code {
            RESULT_OK => {
                let token = intent.string_extra(EXTRA_PAYMENT_TOKEN);
                let method = intent
                    .string_extra(EXTRA_PAYMENT_METHOD_TYPE)
                    .and_then(|name| PaymentMethodType::from_name(&name));
                match (token, method) {
                    (Some(payment_token), Some(payment_method_type)) => {
                        ActivityResult::Ok(TokenizationResult {
                            payment_token,
                            payment_method_type,
                        })
                    }
                    _ => ActivityResult::Canceled,
                }
            }
            RESULT_ERROR => ActivityResult::error_from(intent),
            _ => ActivityResult::Canceled,
        }
    }
}

impl ActivityResult<()> {
    pub fn from_3ds_intent(intent: &ResultIntent) -> Self {
        match intent.result_code {
            RESULT_OK => ActivityResult::Ok(()),
            RESULT_ERROR => ActivityResult::error_from(intent),
            _ => ActivityResult::Canceled,
        }
    }
}

impl<T> ActivityResult<T> {
    fn error_from(intent: &ResultIntent) -> Self {
        let code = intent
            .int_extra(EXTRA_ERROR_CODE)
            .and_then(|code| i32::try_from(code).ok())
            .unwrap_or(-1);
        ActivityResult::Error {
            code,
            description: intent.string_extra(EXTRA_ERROR_DESCRIPTION),
            failing_url: intent.string_extra(EXTRA_ERROR_FAILING_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_names_follow_wire_format() {
        assert_eq!(PaymentMethodType::YooMoney.to_string(), "YOO_MONEY");
        assert_eq!(PaymentMethodType::GooglePay.to_string(), "GOOGLE_PAY");
        assert_eq!(
            PaymentMethodType::from_name("SBERBANK"),
            Some(PaymentMethodType::Sberbank)
        );
        assert_eq!(PaymentMethodType::from_name("bank_card"), None);
    }

    #[test]
    fn test_tokenize_ok_result() {
        let intent = ResultIntent::new(RESULT_OK)
            .with_extra(EXTRA_PAYMENT_TOKEN, "tok_123")
            .with_extra(EXTRA_PAYMENT_METHOD_TYPE, "BANK_CARD");

        assert_eq!(
            ActivityResult::from_tokenize_intent(&intent),
            ActivityResult::Ok(TokenizationResult {
                payment_token: "tok_123".to_string(),
                payment_method_type: PaymentMethodType::BankCard,
            })
        );
    }

    #[test]
    fn test_tokenize_ok_without_data_is_canceled() {
        let intent = ResultIntent::new(RESULT_OK);
        assert_eq!(
            ActivityResult::from_tokenize_intent(&intent),
            ActivityResult::Canceled
        );

        let intent = ResultIntent::new(RESULT_OK)
            .with_extra(EXTRA_PAYMENT_TOKEN, "tok_123")
            .with_extra(EXTRA_PAYMENT_METHOD_TYPE, "CASH");
        assert_eq!(
            ActivityResult::from_tokenize_intent(&intent),
            ActivityResult::Canceled
        );
    }

    #[test]
    fn test_3ds_error_result() {
        let intent = ResultIntent::new(RESULT_ERROR)
            .with_extra(EXTRA_ERROR_CODE, -2)
            .with_extra(EXTRA_ERROR_DESCRIPTION, "net::ERR_NAME_NOT_RESOLVED")
            .with_extra(EXTRA_ERROR_FAILING_URL, "https://bank.example/3ds");

        assert_eq!(
            ActivityResult::from_3ds_intent(&intent),
            ActivityResult::Error {
                code: -2,
                description: Some("net::ERR_NAME_NOT_RESOLVED".to_string()),
                failing_url: Some("https://bank.example/3ds".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_result_code_is_canceled() {
        assert_eq!(
            ActivityResult::from_3ds_intent(&ResultIntent::new(42)),
            ActivityResult::Canceled
        );
    }

    #[test]
    fn test_save_payment_method_ids() {
        assert_eq!(SavePaymentMethod::from_id(0), SavePaymentMethod::UserSelects);
        assert_eq!(SavePaymentMethod::from_id(1), SavePaymentMethod::On);
        assert_eq!(SavePaymentMethod::from_id(2), SavePaymentMethod::Off);
        assert_eq!(SavePaymentMethod::from_id(7), SavePaymentMethod::UserSelects);
    }

    #[test]
    fn test_rgb_packing() {
        let color = Rgb::new(0, 168, 132);
        assert_eq!(color.to_argb(), 0xFF00A884);
        assert_eq!(color.to_string(), "#00A884");
    }
}
