use super::currencies::{self, TypedFraction};
use super::cursor::{cursor_position_after_format, first_digit_index, step_back_to_number};
use super::text_field::{Editable, TextWatcher};
use crate::domain::locale::Locale;
use crate::domain::money::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::{debug, trace};

const DEFAULT_STRING: &str = "0";

/// Callback receiving every amount the formatter accepts, floored to two
/// fraction digits.
pub type AmountListener = Box<dyn FnMut(Decimal)>;

/// Reformats an amount field as the user edits it.
///
/// After every edit the text is reduced to its digits and decimal point,
/// checked against `limit` and re-rendered as a currency string. The cursor
/// is put back among the same digits it was next to before reformatting.
/// Edits that would push the amount over `limit` are undone.
pub struct AmountFormatter {
    listener: Option<AmountListener>,
    currency: Currency,
    locale: Locale,
    limit: Decimal,
    previous_formatted: Option<String>,
    cursor_at_start_position: bool,
    force_position_calculation: bool,
    force_position_after_first_symbol: bool,
}

impl AmountFormatter {
    pub fn new(
        listener: Option<AmountListener>,
        currency: Currency,
        locale: Locale,
        limit: Decimal,
    ) -> Self {
        Self {
            listener,
            currency,
            locale,
            limit,
            previous_formatted: None,
            cursor_at_start_position: false,
            force_position_calculation: false,
            force_position_after_first_symbol: false,
        }
    }

    /// Reduces user text to a canonical numeric string such as `"1234.5"`.
    ///
    /// Keeps digits and the first decimal point, dropping everything else.
    /// Nothing numeric left yields `"0"`; a lone point yields `"0."`.
    pub fn extract_numeric_string(&self, text: &str) -> String {
        let mut numeric = String::with_capacity(text.len());
        let mut seen_point = false;
        for c in text.chars() {
            if c.is_ascii_digit() {
                numeric.push(c);
            } else if self.locale.is_decimal_point(c) && !seen_point {
                numeric.push('.');
                seen_point = true;
            }
        }

        match numeric.as_str() {
            "" => DEFAULT_STRING.to_string(),
            "." => "0.".to_string(),
            _ => numeric,
        }
    }

    fn is_within_limit(&self, numeric: &str) -> bool {
        parse_numeric(numeric).is_some_and(|amount| amount <= self.limit)
    }

    fn format_amount(&mut self, numeric: &str) -> String {
        let Some(amount) = parse_numeric(numeric) else {
            return String::new();
        };

        if let Some(listener) = self.listener.as_mut() {
            let mut validated = amount.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity);
            validated.rescale(2);
            trace!(amount = %validated, "amount validated");
            listener(validated);
        }

        currencies::format_as_user_input(
            amount,
            self.currency,
            &self.locale,
            TypedFraction::of(numeric),
        )
    }

    fn is_null_deletion_required(&self, numeric: &str) -> bool {
        numeric.len() == 2 && numeric.ends_with('0') && self.cursor_at_start_position
    }

    fn calculate_cursor_position(
        &mut self,
        editable: &mut Editable,
        current: &str,
        current_position: usize,
        formatted: &str,
    ) {
        self.force_position_calculation = false;

        let position = if self.force_position_after_first_symbol {
            self.force_position_after_first_symbol = false;
            first_digit_index(formatted).map_or(0, |index| index + 1)
        } else {
            let mut position = cursor_position_after_format(formatted, current, current_position);

            // typing right before the separator keeps the cursor before it
            let before_separator = current
                .chars()
                .nth(current_position)
                .is_some_and(|c| self.locale.is_decimal_point(c));
            if before_separator {
                position = position.saturating_sub(1);
            }

            if position == editable.len() {
                position = step_back_to_number(formatted, position, self.locale.decimal_separator);
            }
            position
        };

        if position <= editable.len() {
            editable.set_selection(position);
        }

        self.previous_formatted = Some(formatted.to_string());
    }
}

impl TextWatcher for AmountFormatter {
    fn before_text_changed(&mut self, text: &str, start: usize, count: usize, after: usize) {
        // inserting in front of the first digit
        self.cursor_at_start_position = count == 0
            && after > 0
            && first_digit_index(text).is_some_and(|first| start <= first);

        // deleting the trailing char, usually the currency glyph
        let len = text.chars().count();
        self.force_position_calculation = len > 0 && start == len - 1 && after == 0;
    }

    fn after_text_changed(&mut self, editable: &mut Editable) {
        let current = editable.text().to_string();
        let mut current_position = editable.selection();

        let mut numeric = self.extract_numeric_string(&current);
        if self.is_null_deletion_required(&numeric) {
            if numeric.starts_with('.') {
                // ".0" after typing a point in front of "0"
                numeric = "0.".to_string();
                current_position = current.chars().count();
            } else {
                numeric.pop();
                self.force_position_after_first_symbol = true;
            }
        }

        let formatted = if self.is_within_limit(&numeric) {
            self.format_amount(&numeric)
        } else {
            debug!(input = %numeric, limit = %self.limit, "amount over limit, edit rejected");
            let previous = self
                .previous_formatted
                .as_deref()
                .map_or_else(|| DEFAULT_STRING.to_string(), |text| self.extract_numeric_string(text));
            self.format_amount(&previous)
        };

        editable.replace_all(&formatted);

        let changed = self.previous_formatted.as_deref() != Some(formatted.as_str());
        if changed || self.force_position_calculation {
            self.calculate_cursor_position(editable, &current, current_position, &formatted);
        }
    }
}

/// Parses a canonical numeric string. `None` if it does not fit a `Decimal`.
fn parse_numeric(numeric: &str) -> Option<Decimal> {
    let trimmed = numeric.strip_suffix('.').unwrap_or(numeric);
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    if trimmed.starts_with('.') {
        return Decimal::from_str(&format!("0{trimmed}")).ok();
    }
    Decimal::from_str(trimmed).ok()
}
