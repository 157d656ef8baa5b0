//! Domain layer: money and locale value types, settings, the payment SDK
//! contract and the ports the application layer talks through.

pub mod checkout;
pub mod locale;
pub mod money;
pub mod ports;
pub mod settings;
