//! Application layer: the amount formatter and the screens of the sample.
//!
//! Screens are plain state holders. Their methods stand in for UI callbacks
//! (clicks, text edits, results of launched SDK flows) and return a
//! [`ScreenEvent`] when the UI should react.

pub mod amount_formatter;
pub mod currencies;
pub mod cursor;
pub mod main_screen;
pub mod messages;
pub mod scan_card;
pub mod settings_screens;
pub mod success_screen;
pub mod text_field;

use crate::domain::checkout::PaymentMethodType;

/// Something the UI should do in response to a screen callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Open the success screen for a freshly issued token.
    ShowSuccess {
        payment_token: String,
        payment_method_type: PaymentMethodType,
    },
    /// Show a short transient message.
    Toast(String),
    /// Show a dismissable dialog.
    Dialog(String),
}
