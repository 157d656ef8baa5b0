//! Cursor arithmetic over formatted amount strings. Offsets are in chars.

/// Index of the first ASCII digit in `text`.
pub fn first_digit_index(text: &str) -> Option<usize> {
    text.chars().position(|c| c.is_ascii_digit())
}

/// Cursor offset in `formatted` that leaves as many digits to its right as
/// `original` had to the right of `cursor`.
///
/// With no digits to the right the offset is the end of `formatted`.
pub fn cursor_position_after_format(formatted: &str, original: &str, cursor: usize) -> usize {
    let digits_after = original
        .chars()
        .skip(cursor)
        .filter(char::is_ascii_digit)
        .count();

    let formatted: Vec<char> = formatted.chars().collect();
    let mut position = formatted.len();
    let mut remaining = digits_after;
    while remaining > 0 && position > 0 {
        position -= 1;
        if formatted[position].is_ascii_digit() {
            remaining -= 1;
        }
    }
    position
}

/// Walks `position` left past currency glyphs and spaces until the char
/// before it is a digit or the decimal separator.
pub fn step_back_to_number(formatted: &str, position: usize, decimal_separator: char) -> usize {
    let formatted: Vec<char> = formatted.chars().collect();
    let mut position = position.min(formatted.len());
    while position > 0 {
        let c = formatted[position - 1];
        if c.is_ascii_digit() || c == decimal_separator {
            break;
        }
        position -= 1;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_digit_index() {
        assert_eq!(first_digit_index("$1,000"), Some(1));
        assert_eq!(first_digit_index("0 \u{20BD}"), Some(0));
        assert_eq!(first_digit_index(" \u{20BD}"), None);
        assert_eq!(first_digit_index(""), None);
    }

    #[test]
    fn test_cursor_keeps_digits_to_the_right() {
        // "19|2345 ₽" regrouped as "192,345 ₽"
        assert_eq!(
            cursor_position_after_format("192,345 \u{20BD}", "192345 \u{20BD}", 2),
            2
        );
        // cursor before "5" in "12.5"
        assert_eq!(
            cursor_position_after_format("12.5 \u{20BD}", "12.5 \u{20BD}", 3),
            3
        );
    }

    #[test]
    fn test_cursor_without_digits_to_the_right_goes_to_end() {
        assert_eq!(cursor_position_after_format("5 \u{20BD}", "05 \u{20BD}", 2), 3);
    }

    #[test]
    fn test_step_back_to_number() {
        assert_eq!(step_back_to_number("5 \u{20BD}", 3, '.'), 1);
        assert_eq!(step_back_to_number("5. \u{20BD}", 4, '.'), 2);
        assert_eq!(step_back_to_number("$12", 3, '.'), 3);
        assert_eq!(step_back_to_number(" \u{20BD}", 2, '.'), 0);
    }
}
