//! Editors for the settings that need more than a toggle.

use super::text_field::{Editable, TextField, TextWatcher};
use crate::domain::checkout::Rgb;
use crate::domain::ports::{PreferenceStore, PreferenceValue};
use crate::domain::settings::{
    self, KEY_LINKED_CARDS_COUNT, KEY_PRIMARY_COLOR_BLUE_VALUE, KEY_PRIMARY_COLOR_GREEN_VALUE,
    KEY_PRIMARY_COLOR_RED_VALUE, KEY_SAVE_PAYMENT_METHOD, KEY_SERVICE_FEE, SettingKind, Settings,
};
use crate::error::{CheckoutError, Result};
use std::ops::RangeInclusive;
use tracing::{debug, info};

pub const MAX_LINKED_CARDS: i32 = 5;

const LINKED_CARDS_RANGE: RangeInclusive<i32> = 0..=MAX_LINKED_CARDS;
const COLOR_COMPONENT_RANGE: RangeInclusive<i32> = 0..=255;
const SAVE_PAYMENT_METHOD_RANGE: RangeInclusive<i32> = 0..=2;

/// Keeps a linked cards field at a single digit in `0..=5`.
pub struct LinkedCardsWatcher {
    last_count: i32,
}

impl LinkedCardsWatcher {
    pub fn new(last_count: i32) -> Self {
        Self { last_count }
    }

    pub fn last_count(&self) -> i32 {
        self.last_count
    }
}

impl TextWatcher for LinkedCardsWatcher {
    fn before_text_changed(&mut self, _text: &str, _start: usize, _count: usize, _after: usize) {}

    fn after_text_changed(&mut self, editable: &mut Editable) {
        match editable.text().parse::<i32>() {
            Ok(count) if editable.len() == 1 && LINKED_CARDS_RANGE.contains(&count) => {
                self.last_count = count;
            }
            _ => {
                debug!(input = editable.text(), last = self.last_count, "linked cards input reverted");
                editable.replace_all(&self.last_count.to_string());
            }
        }
        let end = editable.len();
        editable.set_selection(end);
    }
}

pub struct LinkedCardsScreen {
    field: TextField<LinkedCardsWatcher>,
}

impl LinkedCardsScreen {
    pub fn open(store: &dyn PreferenceStore) -> Result<Self> {
        let count = Settings::new(store).linked_cards_count()?;
        let mut field = TextField::new(LinkedCardsWatcher::new(count));
        field.set_text(&count.to_string());
        Ok(Self { field })
    }

    pub fn field_mut(&mut self) -> &mut TextField<LinkedCardsWatcher> {
        &mut self.field
    }

    pub fn count(&self) -> i32 {
        self.field.watcher().last_count()
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        info!(count = self.count(), "saving linked cards count");
        store.put(KEY_LINKED_CARDS_COUNT, PreferenceValue::Int(self.count()))
    }
}

/// Tracks the fee typed into a text field. Unparsable text means no fee.
#[derive(Debug, Default)]
pub struct FeeWatcher {
    fee: f32,
}

impl FeeWatcher {
    pub fn fee(&self) -> f32 {
        self.fee
    }
}

impl TextWatcher for FeeWatcher {
    fn before_text_changed(&mut self, _text: &str, _start: usize, _count: usize, _after: usize) {}

    fn after_text_changed(&mut self, editable: &mut Editable) {
        self.fee = editable
            .text()
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|fee| fee.is_finite())
            .unwrap_or(0.0);
    }
}

pub struct FeeScreen {
    field: TextField<FeeWatcher>,
}

impl FeeScreen {
    pub fn open(store: &dyn PreferenceStore) -> Result<Self> {
        let fee = Settings::new(store).service_fee()?;
        let mut field = TextField::new(FeeWatcher::default());
        field.set_text(&format!("{fee:?}"));
        Ok(Self { field })
    }

    pub fn field_mut(&mut self) -> &mut TextField<FeeWatcher> {
        &mut self.field
    }

    pub fn fee(&self) -> f32 {
        self.field.watcher().fee()
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        info!(fee = self.fee(), "saving service fee");
        store.put(KEY_SERVICE_FEE, PreferenceValue::Float(self.fee()))
    }
}

/// Raw red, green and blue inputs for the primary color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSchemeScreen {
    pub red: String,
    pub green: String,
    pub blue: String,
}

impl ColorSchemeScreen {
    pub fn open(store: &dyn PreferenceStore) -> Result<Self> {
        let color = Settings::new(store).primary_color()?;
        Ok(Self {
            red: color.red.to_string(),
            green: color.green.to_string(),
            blue: color.blue.to_string(),
        })
    }

    /// The color the inputs describe, if every component is in `0..=255`.
    pub fn color(&self) -> Result<Rgb> {
        Ok(Rgb::new(
            color_component("red", &self.red)?,
            color_component("green", &self.green)?,
            color_component("blue", &self.blue)?,
        ))
    }

    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        let color = self.color()?;
        info!(%color, "saving primary color");
        store.put(KEY_PRIMARY_COLOR_RED_VALUE, PreferenceValue::Int(color.red.into()))?;
        store.put(KEY_PRIMARY_COLOR_GREEN_VALUE, PreferenceValue::Int(color.green.into()))?;
        store.put(KEY_PRIMARY_COLOR_BLUE_VALUE, PreferenceValue::Int(color.blue.into()))
    }
}

fn color_component(name: &str, raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| CheckoutError::ValidationError(format!("{name} must be in 0..=255, got {raw}")))
}

/// Flips one of the boolean settings.
pub fn set_toggle(store: &dyn PreferenceStore, key: &str, enabled: bool) -> Result<()> {
    match settings::kind_of(key) {
        Some(SettingKind::Bool) => store.put(key, PreferenceValue::Bool(enabled)),
        Some(_) => Err(CheckoutError::ValidationError(format!("{key} is not a toggle"))),
        None => Err(CheckoutError::UnknownSetting(key.to_string())),
    }
}

pub fn set_save_payment_method(store: &dyn PreferenceStore, id: i32) -> Result<()> {
    check_range(KEY_SAVE_PAYMENT_METHOD, id, SAVE_PAYMENT_METHOD_RANGE)?;
    store.put(KEY_SAVE_PAYMENT_METHOD, PreferenceValue::Int(id))
}

/// Parses and stores a raw value for any known key, with the same bounds
/// the editors enforce.
pub fn apply(store: &dyn PreferenceStore, key: &str, raw: &str) -> Result<PreferenceValue> {
    let value = settings::parse_value(key, raw)?;
    if let PreferenceValue::Int(number) = value {
        let range = match key {
            KEY_LINKED_CARDS_COUNT => Some(LINKED_CARDS_RANGE),
            KEY_SAVE_PAYMENT_METHOD => Some(SAVE_PAYMENT_METHOD_RANGE),
            KEY_PRIMARY_COLOR_RED_VALUE
            | KEY_PRIMARY_COLOR_GREEN_VALUE
            | KEY_PRIMARY_COLOR_BLUE_VALUE => Some(COLOR_COMPONENT_RANGE),
            _ => None,
        };
        if let Some(range) = range {
            check_range(key, number, range)?;
        }
    }
    if matches!(value, PreferenceValue::Float(fee) if !fee.is_finite()) {
        return Err(CheckoutError::ValidationError(format!("{key} must be finite")));
    }
    store.put(key, value.clone())?;
    debug!(key, ?value, "setting stored");
    Ok(value)
}

fn check_range(key: &str, value: i32, range: RangeInclusive<i32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(CheckoutError::ValidationError(format!(
            "{key} must be in {}..={}, got {value}",
            range.start(),
            range.end()
        )))
    }
}
