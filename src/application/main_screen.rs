use super::ScreenEvent;
use super::amount_formatter::{AmountFormatter, AmountListener};
use super::messages;
use super::text_field::TextField;
use crate::config::MerchantConfig;
use crate::domain::checkout::{
    ActivityResult, ColorScheme, MockConfiguration, PaymentParameters, ResultIntent,
    TestParameters, TokenizeRequest, UiParameters,
};
use crate::domain::locale::Locale;
use crate::domain::money::{Amount, Currency, MAX_AMOUNT};
use crate::domain::ports::{CheckoutLauncher, PreferenceStoreBox, PreferenceValue};
use crate::domain::settings::{KEY_AMOUNT, Settings};
use crate::error::Result;
use rust_decimal::Decimal;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info};

pub const REQUEST_CODE_TOKENIZE: i32 = 33;

/// The amount entry screen: edit an amount, then pay for it.
pub struct MainScreen {
    store: PreferenceStoreBox,
    merchant: MerchantConfig,
    currency: Currency,
    amount: Rc<Cell<Decimal>>,
    field: TextField<AmountFormatter>,
}

impl MainScreen {
    /// Opens the screen and restores the draft amount saved on last close.
    pub fn open(store: PreferenceStoreBox, merchant: MerchantConfig, locale: Locale) -> Result<Self> {
        let currency = Currency::RUB;
        let amount = Rc::new(Cell::new(Decimal::ZERO));

        let sink = Rc::clone(&amount);
        let listener: AmountListener = Box::new(move |value| sink.set(value));
        let formatter = AmountFormatter::new(Some(listener), currency, locale, MAX_AMOUNT);

        let mut field = TextField::new(formatter);
        // drafts are stored with '.', which de-DE reads as grouping
        let draft = store
            .get_string(KEY_AMOUNT, &Decimal::ZERO.to_string())?
            .replace('.', &locale.decimal_separator.to_string());
        field.set_text(&draft);
        debug!(draft = %draft, "amount draft restored");

        Ok(Self {
            store,
            merchant,
            currency,
            amount,
            field,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount.get()
    }

    pub fn field(&self) -> &TextField<AmountFormatter> {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut TextField<AmountFormatter> {
        &mut self.field
    }

    /// The pay button is enabled only for a positive amount.
    pub fn is_pay_enabled(&self) -> bool {
        self.amount() > Decimal::ZERO
    }

    /// Builds the tokenize request for the current amount and settings.
    pub fn tokenize_request(&self) -> Result<TokenizeRequest> {
        let amount = Amount::positive(self.amount(), self.currency)?;
        let settings = Settings::new(self.store.as_ref());

        let payment_parameters = PaymentParameters {
            amount,
            title: self.merchant.product_name.clone(),
            subtitle: self.merchant.product_description.clone(),
            client_application_key: self.merchant.client_application_key.clone(),
            shop_id: self.merchant.shop_id.clone(),
            save_payment_method: settings.save_payment_method()?,
            payment_method_types: settings.payment_method_types()?,
            gateway_id: self.merchant.gateway_id.clone(),
            custom_return_url: self.merchant.return_url.clone(),
            user_phone_number: settings
                .autofill_user_phone_number()?
                .then(|| self.merchant.test_phone_number.clone()),
            auth_center_client_id: self.merchant.auth_center_client_id.clone(),
        };

        let ui_parameters = UiParameters {
            show_logo: settings.show_checkout_logo()?,
            color_scheme: ColorScheme {
                primary_color: settings.primary_color()?,
            },
        };

        let mock_configuration = if settings.is_test_mode_enabled()? {
            let fee = Decimal::try_from(settings.service_fee()?)
                .unwrap_or(Decimal::ZERO)
                .round_dp(2);
            Some(MockConfiguration {
                complete_with_error: settings.should_complete_payment_with_error()?,
                payment_auth_passed: settings.is_payment_auth_passed()?,
                linked_cards_count: settings.linked_cards_count()?,
                service_fee: Amount::new(fee, self.currency),
            })
        } else {
            None
        };

        Ok(TokenizeRequest {
            payment_parameters,
            test_parameters: TestParameters {
                show_logs: true,
                google_pay_test_environment: true,
                mock_configuration,
            },
            ui_parameters,
        })
    }

    /// Starts tokenization. Returns `false` when the amount does not allow paying.
    pub fn on_pay_clicked(&self, launcher: &mut dyn CheckoutLauncher) -> Result<bool> {
        if !self.is_pay_enabled() {
            debug!(amount = %self.amount(), "pay ignored for non-positive amount");
            return Ok(false);
        }
        let request = self.tokenize_request()?;
        info!(amount = %request.payment_parameters.amount.value, "starting tokenization");
        launcher.start_tokenize(request)?;
        Ok(true)
    }

    /// Handles the result of a flow this screen started.
    pub fn on_activity_result(&self, request_code: i32, intent: &ResultIntent) -> Option<ScreenEvent> {
        if request_code != REQUEST_CODE_TOKENIZE {
            return None;
        }
        match ActivityResult::from_tokenize_intent(intent) {
            ActivityResult::Ok(result) => {
                info!(method = %result.payment_method_type, "tokenization succeeded");
                Some(ScreenEvent::ShowSuccess {
                    payment_token: result.payment_token,
                    payment_method_type: result.payment_method_type,
                })
            }
            ActivityResult::Canceled => {
                Some(ScreenEvent::Toast(messages::TOKENIZATION_CANCELED.to_string()))
            }
            ActivityResult::Error { code, .. } => {
                debug!(code, "tokenization finished with an error");
                None
            }
        }
    }

    /// Closes the screen, saving a valid amount as the next draft.
    pub fn close(self) -> Result<()> {
        if self.is_pay_enabled() {
            self.store
                .put(KEY_AMOUNT, PreferenceValue::String(self.amount().to_string()))?;
            debug!(amount = %self.amount(), "amount draft saved");
        }
        Ok(())
    }
}
