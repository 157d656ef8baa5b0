//! User-facing strings shown by the screens.

pub const TOKENIZATION_CANCELED: &str = "Tokenization canceled";
pub const SUCCESS_3DS: &str = "3DS confirmation succeeded";
pub const CANCEL_3DS: &str = "3DS confirmation canceled";
pub const ERROR_CODE_3DS: &str = "Error code: ";
pub const ERROR_DESCRIPTION_3DS: &str = "Description: ";
pub const ERROR_FAILING_URL_3DS: &str = "Failing url: ";
pub const WRONG_URL: &str = "Enter an https or asset url";

pub fn token_message(token: &str, payment_method_type: impl std::fmt::Display) -> String {
    format!("Token: {token}\nType: {payment_method_type}")
}

pub fn error_3ds_message(code: i32, description: Option<&str>, failing_url: Option<&str>) -> String {
    format!(
        "{ERROR_CODE_3DS}{code}\n{ERROR_DESCRIPTION_3DS}{}\n{ERROR_FAILING_URL_3DS}{}",
        description.unwrap_or("null"),
        failing_url.unwrap_or("null"),
    )
}
