//! Bridge between an external card scanner and the payment SDK.

use crate::domain::checkout::{
    ActivityResult, RESULT_CANCELED, RESULT_OK, ResultIntent, ScanBankCardResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const REQUEST_CODE_SCAN: i32 = 1;

/// What the scanner recognised on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCard {
    pub card_number: String,
    /// `MM/YY`, when the scanner could read it.
    pub expiration_date: Option<String>,
}

/// Converts a scanner outcome into the result handed back to the SDK.
///
/// `None` means the scan itself did not finish.
pub fn scan_result(card: Option<ScannedCard>) -> ActivityResult<ScanBankCardResult> {
    let Some(card) = card else {
        return ActivityResult::Canceled;
    };
    let Some(expiry) = card.expiration_date.as_deref() else {
        debug!("scanned card has no expiry date");
        return ActivityResult::Canceled;
    };
    match parse_expiry(expiry) {
        Some((expiry_month, expiry_year)) => ActivityResult::Ok(ScanBankCardResult {
            card_number: card.card_number,
            expiry_month,
            expiry_year,
        }),
        None => {
            debug!(expiry, "malformed expiry date");
            ActivityResult::Canceled
        }
    }
}

/// Builds the intent the SDK receives for a scan outcome.
pub fn into_result_intent(result: ActivityResult<ScanBankCardResult>) -> ResultIntent {
    match result {
        ActivityResult::Ok(card) => ResultIntent {
            result_code: RESULT_OK,
            extras: Some(card.into_extras()),
        },
        _ => ResultIntent::new(RESULT_CANCELED),
    }
}

/// Splits `MM/YY` into month and year.
fn parse_expiry(expiry: &str) -> Option<(u32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let year: u32 = year.trim().parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{EXTRA_CARD_NUMBER, EXTRA_EXPIRY_MONTH, EXTRA_EXPIRY_YEAR};
    use serde_json::Value;

    fn card(expiry: Option<&str>) -> Option<ScannedCard> {
        Some(ScannedCard {
            card_number: "4111111111111111".to_string(),
            expiration_date: expiry.map(str::to_string),
        })
    }

    #[test]
    fn test_expiry_is_split() {
        assert_eq!(
            scan_result(card(Some("07/27"))),
            ActivityResult::Ok(ScanBankCardResult {
                card_number: "4111111111111111".to_string(),
                expiry_month: 7,
                expiry_year: 27,
            })
        );
    }

    #[test]
    fn test_unusable_scans_are_cancelled() {
        assert_eq!(scan_result(None), ActivityResult::Canceled);
        assert_eq!(scan_result(card(None)), ActivityResult::Canceled);
        assert_eq!(scan_result(card(Some("0727"))), ActivityResult::Canceled);
        assert_eq!(scan_result(card(Some("13/27"))), ActivityResult::Canceled);
        assert_eq!(scan_result(card(Some("ab/cd"))), ActivityResult::Canceled);
    }

    #[test]
    fn test_result_intent_carries_card_extras() {
        let intent = into_result_intent(scan_result(card(Some("12/30"))));
        assert_eq!(intent.result_code, RESULT_OK);

        let extras = intent.extras.unwrap();
        assert_eq!(extras[EXTRA_CARD_NUMBER], Value::from("4111111111111111"));
        assert_eq!(extras[EXTRA_EXPIRY_MONTH], Value::from(12));
        assert_eq!(extras[EXTRA_EXPIRY_YEAR], Value::from(30));

        let cancelled = into_result_intent(ActivityResult::Canceled);
        assert_eq!(cancelled, ResultIntent::new(RESULT_CANCELED));
    }
}
