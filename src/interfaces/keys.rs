//! Keystroke strings for driving a text field from the command line.

use crate::application::text_field::{TextField, TextWatcher};

pub const BACKSPACE: char = '<';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
}

/// Splits a keystroke string: `<` is backspace, every other char is typed.
pub fn parse_keys(keys: &str) -> Vec<Key> {
    keys.chars()
        .map(|c| match c {
            BACKSPACE => Key::Backspace,
            other => Key::Char(other),
        })
        .collect()
}

/// Presses `key` in `field`.
pub fn press<W: TextWatcher>(field: &mut TextField<W>, key: Key) {
    match key {
        Key::Char(c) => field.insert(c.encode_utf8(&mut [0; 4])),
        Key::Backspace => field.backspace(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_keys("1.<2"),
            vec![Key::Char('1'), Key::Char('.'), Key::Backspace, Key::Char('2')]
        );
        assert!(parse_keys("").is_empty());
    }
}
