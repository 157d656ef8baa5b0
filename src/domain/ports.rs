use super::checkout::{ConfirmationRequest, TokenizeRequest};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single stored setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PreferenceValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
}

impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceValue::Bool(value) => write!(f, "{value}"),
            PreferenceValue::Int(value) => write!(f, "{value}"),
            PreferenceValue::Float(value) => write!(f, "{value:?}"),
            PreferenceValue::String(value) => f.write_str(value),
        }
    }
}

/// Key-value storage for settings, modelled on platform shared preferences.
///
/// Typed getters return the default when the key is missing or holds a value
/// of another type.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<PreferenceValue>>;
    fn put(&self, key: &str, value: PreferenceValue) -> Result<()>;
    fn all(&self) -> Result<BTreeMap<String, PreferenceValue>>;

    fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(match self.get(key)? {
            Some(PreferenceValue::Bool(value)) => value,
            _ => default,
        })
    }

    fn get_int(&self, key: &str, default: i32) -> Result<i32> {
        Ok(match self.get(key)? {
            Some(PreferenceValue::Int(value)) => value,
            _ => default,
        })
    }

    fn get_float(&self, key: &str, default: f32) -> Result<f32> {
        Ok(match self.get(key)? {
            Some(PreferenceValue::Float(value)) => value,
            _ => default,
        })
    }

    fn get_string(&self, key: &str, default: &str) -> Result<String> {
        Ok(match self.get(key)? {
            Some(PreferenceValue::String(value)) => value,
            _ => default.to_string(),
        })
    }
}

pub type PreferenceStoreBox = Box<dyn PreferenceStore>;

/// Entry points of the payment SDK the sample hands control to.
///
/// Results come back separately, through the screen's `on_activity_result`.
pub trait CheckoutLauncher {
    fn start_tokenize(&mut self, request: TokenizeRequest) -> Result<()>;
    fn start_3ds(&mut self, request: ConfirmationRequest) -> Result<()>;
}
