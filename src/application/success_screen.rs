use super::ScreenEvent;
use super::messages;
use crate::domain::checkout::{ActivityResult, ConfirmationRequest, PaymentMethodType, ResultIntent};
use crate::domain::ports::CheckoutLauncher;
use crate::error::Result;
use tracing::{info, warn};

pub const REQUEST_CODE_3DS: i32 = 34;

const HTTPS_SCHEME: &str = "https://";
const ASSET_PREFIX: &str = "file:///android_asset/";

/// Shown after a successful tokenization. Displays the token and lets the
/// user run a 3-D Secure confirmation against an arbitrary url.
pub struct SuccessScreen {
    payment_token: String,
    payment_method_type: PaymentMethodType,
    confirmation_url: String,
}

impl SuccessScreen {
    pub fn new(payment_token: impl Into<String>, payment_method_type: PaymentMethodType) -> Self {
        Self {
            payment_token: payment_token.into(),
            payment_method_type,
            confirmation_url: String::new(),
        }
    }

    pub fn payment_token(&self) -> &str {
        &self.payment_token
    }

    pub fn token_message(&self) -> String {
        messages::token_message(&self.payment_token, self.payment_method_type)
    }

    pub fn set_confirmation_url(&mut self, url: impl Into<String>) {
        self.confirmation_url = url.into();
    }

    pub fn on_confirm_clicked(
        &self,
        launcher: &mut dyn CheckoutLauncher,
    ) -> Result<Option<ScreenEvent>> {
        confirm_3ds(&self.confirmation_url, launcher)
    }

    pub fn on_activity_result(&self, request_code: i32, intent: &ResultIntent) -> Option<ScreenEvent> {
        if request_code != REQUEST_CODE_3DS {
            return None;
        }
        let message = match ActivityResult::from_3ds_intent(intent) {
            ActivityResult::Ok(()) => messages::SUCCESS_3DS.to_string(),
            ActivityResult::Canceled => messages::CANCEL_3DS.to_string(),
            ActivityResult::Error {
                code,
                description,
                failing_url,
            } => messages::error_3ds_message(code, description.as_deref(), failing_url.as_deref()),
        };
        Some(ScreenEvent::Dialog(message))
    }
}

/// Starts 3-D Secure for `url`, or returns a toast when the url is neither
/// https nor a bundled asset.
pub fn confirm_3ds(url: &str, launcher: &mut dyn CheckoutLauncher) -> Result<Option<ScreenEvent>> {
    if !is_confirmation_url(url) {
        warn!(url, "rejected 3ds url");
        return Ok(Some(ScreenEvent::Toast(messages::WRONG_URL.to_string())));
    }
    info!(url, "starting 3ds confirmation");
    launcher.start_3ds(ConfirmationRequest {
        url: url.to_string(),
    })?;
    Ok(None)
}

/// An https url (scheme compared case-insensitively) or an asset url.
pub fn is_confirmation_url(url: &str) -> bool {
    let https = url
        .get(..HTTPS_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(HTTPS_SCHEME));
    https || url.starts_with(ASSET_PREFIX)
}
