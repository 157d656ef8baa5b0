use super::checkout::{PaymentMethodType, Rgb, SavePaymentMethod};
use super::ports::{PreferenceStore, PreferenceValue};
use crate::error::{CheckoutError, Result};
use std::collections::BTreeSet;

pub const KEY_LINKED_CARDS_COUNT: &str = "linked_cards_count";
pub const KEY_PRIMARY_COLOR_RED_VALUE: &str = "primary_color_red_value";
pub const KEY_PRIMARY_COLOR_GREEN_VALUE: &str = "primary_color_green_value";
pub const KEY_PRIMARY_COLOR_BLUE_VALUE: &str = "primary_color_blue_value";
pub const KEY_YOO_MONEY_ALLOWED: &str = "yoo_money_allowed";
pub const KEY_SBERBANK_ONLINE_ALLOWED: &str = "sberbank_online_allowed";
pub const KEY_GOOGLE_PAY_ALLOWED: &str = "google_pay_allowed";
pub const KEY_NEW_CARD_ALLOWED: &str = "new_card_allowed";
pub const KEY_SHOW_CHECKOUT_LOGO: &str = "show_yoo_checkout_logo";
pub const KEY_AUTOFILL_USER_PHONE_NUMBER: &str = "autofill_user_phone_number";
pub const KEY_TEST_MODE_ENABLED: &str = "test_mode_enabled";
pub const KEY_PAYMENT_AUTH_PASSED: &str = "payment_auth_passed";
pub const KEY_SERVICE_FEE: &str = "fee";
pub const KEY_SHOULD_COMPLETE_PAYMENT_WITH_ERROR: &str = "should_complete_with_error";
pub const KEY_SAVE_PAYMENT_METHOD: &str = "save_payment_method";
pub const KEY_AMOUNT: &str = "amount";

const DEFAULT_PRIMARY_COLOR: Rgb = Rgb {
    red: 0,
    green: 168,
    blue: 132,
};

/// Kind of value a known settings key holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Bool,
    Int,
    Float,
    String,
}

const KNOWN_KEYS: [(&str, SettingKind); 16] = [
    (KEY_LINKED_CARDS_COUNT, SettingKind::Int),
    (KEY_PRIMARY_COLOR_RED_VALUE, SettingKind::Int),
    (KEY_PRIMARY_COLOR_GREEN_VALUE, SettingKind::Int),
    (KEY_PRIMARY_COLOR_BLUE_VALUE, SettingKind::Int),
    (KEY_YOO_MONEY_ALLOWED, SettingKind::Bool),
    (KEY_SBERBANK_ONLINE_ALLOWED, SettingKind::Bool),
    (KEY_GOOGLE_PAY_ALLOWED, SettingKind::Bool),
    (KEY_NEW_CARD_ALLOWED, SettingKind::Bool),
    (KEY_SHOW_CHECKOUT_LOGO, SettingKind::Bool),
    (KEY_AUTOFILL_USER_PHONE_NUMBER, SettingKind::Bool),
    (KEY_TEST_MODE_ENABLED, SettingKind::Bool),
    (KEY_PAYMENT_AUTH_PASSED, SettingKind::Bool),
    (KEY_SERVICE_FEE, SettingKind::Float),
    (KEY_SHOULD_COMPLETE_PAYMENT_WITH_ERROR, SettingKind::Bool),
    (KEY_SAVE_PAYMENT_METHOD, SettingKind::Int),
    (KEY_AMOUNT, SettingKind::String),
];

/// Returns the kind of a known settings key.
pub fn kind_of(key: &str) -> Option<SettingKind> {
    KNOWN_KEYS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, kind)| *kind)
}

/// Parses a raw string into the value type a known key expects.
pub fn parse_value(key: &str, raw: &str) -> Result<PreferenceValue> {
    let kind = kind_of(key).ok_or_else(|| CheckoutError::UnknownSetting(key.to_string()))?;
    let invalid = || CheckoutError::ValidationError(format!("Invalid value for {key}: {raw}"));
    let raw = raw.trim();
    Ok(match kind {
        SettingKind::Bool => PreferenceValue::Bool(raw.parse().map_err(|_| invalid())?),
        SettingKind::Int => PreferenceValue::Int(raw.parse().map_err(|_| invalid())?),
        SettingKind::Float => PreferenceValue::Float(raw.parse().map_err(|_| invalid())?),
        SettingKind::String => PreferenceValue::String(raw.to_string()),
    })
}

/// Typed, read-only view over the sample's settings.
pub struct Settings<'a> {
    store: &'a dyn PreferenceStore,
}

impl<'a> Settings<'a> {
    pub fn new(store: &'a dyn PreferenceStore) -> Self {
        Self { store }
    }

    pub fn is_yoo_money_allowed(&self) -> Result<bool> {
        self.store.get_bool(KEY_YOO_MONEY_ALLOWED, true)
    }

    pub fn is_sberbank_online_allowed(&self) -> Result<bool> {
        self.store.get_bool(KEY_SBERBANK_ONLINE_ALLOWED, true)
    }

    pub fn is_google_pay_allowed(&self) -> Result<bool> {
        self.store.get_bool(KEY_GOOGLE_PAY_ALLOWED, true)
    }

    pub fn is_new_card_allowed(&self) -> Result<bool> {
        self.store.get_bool(KEY_NEW_CARD_ALLOWED, true)
    }

    pub fn show_checkout_logo(&self) -> Result<bool> {
        self.store.get_bool(KEY_SHOW_CHECKOUT_LOGO, true)
    }

    pub fn autofill_user_phone_number(&self) -> Result<bool> {
        self.store.get_bool(KEY_AUTOFILL_USER_PHONE_NUMBER, false)
    }

    pub fn is_test_mode_enabled(&self) -> Result<bool> {
        self.store.get_bool(KEY_TEST_MODE_ENABLED, false)
    }

    pub fn is_payment_auth_passed(&self) -> Result<bool> {
        self.store.get_bool(KEY_PAYMENT_AUTH_PASSED, false)
    }

    pub fn should_complete_payment_with_error(&self) -> Result<bool> {
        self.store
            .get_bool(KEY_SHOULD_COMPLETE_PAYMENT_WITH_ERROR, false)
    }

    pub fn service_fee(&self) -> Result<f32> {
        self.store.get_float(KEY_SERVICE_FEE, 0.0)
    }

    pub fn linked_cards_count(&self) -> Result<i32> {
        self.store.get_int(KEY_LINKED_CARDS_COUNT, 1)
    }

    pub fn save_payment_method(&self) -> Result<SavePaymentMethod> {
        Ok(SavePaymentMethod::from_id(
            self.store.get_int(KEY_SAVE_PAYMENT_METHOD, 0)?,
        ))
    }

    /// Stored components outside `0..=255` are clamped.
    pub fn primary_color(&self) -> Result<Rgb> {
        let component = |key: &str, default: u8| -> Result<u8> {
            let value = self.store.get_int(key, i32::from(default))?;
            Ok(value.clamp(0, 255) as u8)
        };
        Ok(Rgb::new(
            component(KEY_PRIMARY_COLOR_RED_VALUE, DEFAULT_PRIMARY_COLOR.red)?,
            component(KEY_PRIMARY_COLOR_GREEN_VALUE, DEFAULT_PRIMARY_COLOR.green)?,
            component(KEY_PRIMARY_COLOR_BLUE_VALUE, DEFAULT_PRIMARY_COLOR.blue)?,
        ))
    }

    /// Payment methods the SDK should offer, derived from the toggles.
    pub fn payment_method_types(&self) -> Result<BTreeSet<PaymentMethodType>> {
        let mut types = BTreeSet::new();
        if self.is_new_card_allowed()? {
            types.insert(PaymentMethodType::BankCard);
        }
        if self.is_yoo_money_allowed()? {
            types.insert(PaymentMethodType::YooMoney);
        }
        if self.is_sberbank_online_allowed()? {
            types.insert(PaymentMethodType::Sberbank);
        }
        if self.is_google_pay_allowed()? {
            types.insert(PaymentMethodType::GooglePay);
        }
        Ok(types)
    }

    /// Every known key with its effective value, stored or default.
    pub fn snapshot(&self) -> Result<Vec<(&'static str, PreferenceValue)>> {
        let color = self.primary_color()?;
        Ok(vec![
            (KEY_YOO_MONEY_ALLOWED, PreferenceValue::Bool(self.is_yoo_money_allowed()?)),
            (
                KEY_SBERBANK_ONLINE_ALLOWED,
                PreferenceValue::Bool(self.is_sberbank_online_allowed()?),
            ),
            (KEY_GOOGLE_PAY_ALLOWED, PreferenceValue::Bool(self.is_google_pay_allowed()?)),
            (KEY_NEW_CARD_ALLOWED, PreferenceValue::Bool(self.is_new_card_allowed()?)),
            (KEY_SHOW_CHECKOUT_LOGO, PreferenceValue::Bool(self.show_checkout_logo()?)),
            (
                KEY_AUTOFILL_USER_PHONE_NUMBER,
                PreferenceValue::Bool(self.autofill_user_phone_number()?),
            ),
            (KEY_TEST_MODE_ENABLED, PreferenceValue::Bool(self.is_test_mode_enabled()?)),
            (KEY_PAYMENT_AUTH_PASSED, PreferenceValue::Bool(self.is_payment_auth_passed()?)),
            (
                KEY_SHOULD_COMPLETE_PAYMENT_WITH_ERROR,
                PreferenceValue::Bool(self.should_complete_payment_with_error()?),
            ),
            (KEY_SERVICE_FEE, PreferenceValue::Float(self.service_fee()?)),
            (KEY_LINKED_CARDS_COUNT, PreferenceValue::Int(self.linked_cards_count()?)),
            (
                KEY_SAVE_PAYMENT_METHOD,
                PreferenceValue::Int(self.save_payment_method()?.id()),
            ),
            (KEY_PRIMARY_COLOR_RED_VALUE, PreferenceValue::Int(i32::from(color.red))),
            (KEY_PRIMARY_COLOR_GREEN_VALUE, PreferenceValue::Int(i32::from(color.green))),
            (KEY_PRIMARY_COLOR_BLUE_VALUE, PreferenceValue::Int(i32::from(color.blue))),
            (
                KEY_AMOUNT,
                PreferenceValue::String(self.store.get_string(KEY_AMOUNT, "0")?),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryPreferenceStore;

    #[test]
    fn test_defaults_when_store_is_empty() {
        let store = InMemoryPreferenceStore::new();
        let settings = Settings::new(&store);

        assert!(settings.is_yoo_money_allowed().unwrap());
        assert!(!settings.is_test_mode_enabled().unwrap());
        assert_eq!(settings.linked_cards_count().unwrap(), 1);
        assert_eq!(settings.service_fee().unwrap(), 0.0);
        assert_eq!(
            settings.save_payment_method().unwrap(),
            SavePaymentMethod::UserSelects
        );
        assert_eq!(settings.primary_color().unwrap(), Rgb::new(0, 168, 132));
        assert_eq!(settings.payment_method_types().unwrap().len(), 4);
    }

    #[test]
    fn test_toggles_narrow_payment_methods() {
        let store = InMemoryPreferenceStore::new();
        store
            .put(KEY_YOO_MONEY_ALLOWED, PreferenceValue::Bool(false))
            .unwrap();
        store
            .put(KEY_GOOGLE_PAY_ALLOWED, PreferenceValue::Bool(false))
            .unwrap();

        let types = Settings::new(&store).payment_method_types().unwrap();
        assert_eq!(
            types,
            BTreeSet::from([PaymentMethodType::BankCard, PaymentMethodType::Sberbank])
        );
    }

    #[test]
    fn test_mistyped_value_falls_back_to_default() {
        let store = InMemoryPreferenceStore::new();
        store
            .put(KEY_LINKED_CARDS_COUNT, PreferenceValue::String("3".to_string()))
            .unwrap();

        assert_eq!(Settings::new(&store).linked_cards_count().unwrap(), 1);
    }

    #[test]
    fn test_parse_value_by_key_kind() {
        assert_eq!(
            parse_value(KEY_TEST_MODE_ENABLED, "true").unwrap(),
            PreferenceValue::Bool(true)
        );
        assert_eq!(
            parse_value(KEY_LINKED_CARDS_COUNT, " 4 ").unwrap(),
            PreferenceValue::Int(4)
        );
        assert_eq!(
            parse_value(KEY_SERVICE_FEE, "12.5").unwrap(),
            PreferenceValue::Float(12.5)
        );
        assert!(matches!(
            parse_value(KEY_TEST_MODE_ENABLED, "yes"),
            Err(CheckoutError::ValidationError(_))
        ));
        assert!(matches!(
            parse_value("no_such_key", "1"),
            Err(CheckoutError::UnknownSetting(_))
        ));
    }
}
