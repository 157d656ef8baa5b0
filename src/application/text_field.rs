//! A single-line editable text field that notifies a watcher about edits.
//!
//! All offsets are char offsets, so currency glyphs and no-break spaces count
//! as one position each.

use std::fmt;

/// Text buffer plus cursor, handed to watchers so they can rewrite the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editable {
    text: String,
    selection: usize,
}

impl Editable {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Moves the cursor, clamped to the text.
    pub fn set_selection(&mut self, position: usize) {
        self.selection = position.min(self.len());
    }

    /// Replaces the whole text.
    ///
    /// A cursor at the start stays there and one at the end stays at the end;
    /// a cursor in between keeps its relative position.
    pub fn replace_all(&mut self, text: &str) {
        let old_len = self.len();
        let new_len = text.chars().count();
        self.selection = if self.selection == 0 {
            0
        } else if self.selection >= old_len {
            new_len
        } else {
            self.selection * new_len / old_len
        };
        self.text = text.to_string();
    }

    fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let from = byte_offset(&self.text, start);
        let to = byte_offset(&self.text, end);
        self.text.replace_range(from..to, replacement);
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Observer of a [`TextField`]'s edits.
pub trait TextWatcher {
    /// Called before `count` chars at `start` of `text` are replaced by `after` new chars.
    fn before_text_changed(&mut self, text: &str, start: usize, count: usize, after: usize);

    /// Called once the edit is applied. May rewrite the text and move the cursor.
    fn after_text_changed(&mut self, editable: &mut Editable);
}

/// An input field driving a [`TextWatcher`].
pub struct TextField<W: TextWatcher> {
    editable: Editable,
    watcher: W,
}

impl<W: TextWatcher> TextField<W> {
    pub fn new(watcher: W) -> Self {
        Self {
            editable: Editable::default(),
            watcher,
        }
    }

    pub fn text(&self) -> &str {
        self.editable.text()
    }

    pub fn cursor(&self) -> usize {
        self.editable.selection()
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    pub fn set_cursor(&mut self, position: usize) {
        self.editable.set_selection(position);
    }

    /// Replaces chars `start..end` with `replacement`, leaving the cursor after it.
    pub fn replace(&mut self, start: usize, end: usize, replacement: &str) {
        let len = self.editable.len();
        let end = end.min(len);
        let start = start.min(end);
        let after = replacement.chars().count();

        self.watcher
            .before_text_changed(self.editable.text(), start, end - start, after);
        self.editable.replace_range(start, end, replacement);
        self.editable.selection = start + after;
        self.watcher.after_text_changed(&mut self.editable);
    }

    /// Types or pastes `text` at the cursor.
    pub fn insert(&mut self, text: &str) {
        let cursor = self.cursor();
        self.replace(cursor, cursor, text);
    }

    /// Deletes the char before the cursor.
    pub fn backspace(&mut self) {
        let cursor = self.cursor();
        if cursor > 0 {
            self.replace(cursor - 1, cursor, "");
        }
    }

    /// Deletes the char after the cursor.
    pub fn delete(&mut self) {
        let cursor = self.cursor();
        if cursor < self.editable.len() {
            self.replace(cursor, cursor + 1, "");
        }
    }

    /// Replaces the whole text, as a program would when restoring state.
    pub fn set_text(&mut self, text: &str) {
        let len = self.editable.len();
        self.replace(0, len, text);
    }
}

impl<W: TextWatcher> fmt::Display for TextField<W> {
    /// Renders the text with the cursor shown as `|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let split = byte_offset(self.text(), self.cursor());
        let (before, after) = self.text().split_at(split);
        write!(f, "{before}|{after}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        before: Vec<(String, usize, usize, usize)>,
        after: Vec<String>,
    }

    impl TextWatcher for Recorder {
        fn before_text_changed(&mut self, text: &str, start: usize, count: usize, after: usize) {
            self.before.push((text.to_string(), start, count, after));
        }

        fn after_text_changed(&mut self, editable: &mut Editable) {
            self.after.push(editable.text().to_string());
        }
    }

    #[test]
    fn test_edits_notify_watcher() {
        let mut field = TextField::new(Recorder::default());
        field.insert("ab");
        field.set_cursor(1);
        field.insert("\u{20BD}");
        field.backspace();
        field.delete();

        assert_eq!(field.text(), "a");
        assert_eq!(field.cursor(), 1);
        assert_eq!(
            field.watcher().before,
            vec![
                (String::new(), 0, 0, 2),
                ("ab".to_string(), 1, 0, 1),
                ("a\u{20BD}b".to_string(), 1, 1, 0),
                ("ab".to_string(), 1, 1, 0),
            ]
        );
        assert_eq!(field.watcher().after, vec!["ab", "a\u{20BD}b", "ab", "a"]);
    }

    #[test]
    fn test_backspace_at_start_is_ignored() {
        let mut field = TextField::new(Recorder::default());
        field.backspace();
        field.delete();
        assert!(field.watcher().before.is_empty());
    }

    #[test]
    fn test_replace_all_keeps_relative_cursor() {
        let mut editable = Editable::default();
        editable.replace_all("1.234 \u{20BD}");
        assert_eq!(editable.selection(), 0);

        editable.set_selection(5);
        editable.replace_all("1.23 \u{20BD}");
        assert_eq!(editable.selection(), 4);

        editable.set_selection(6);
        editable.replace_all("12.34 \u{20BD}");
        assert_eq!(editable.selection(), 7);
    }

    #[test]
    fn test_display_marks_cursor() {
        let mut field = TextField::new(Recorder::default());
        field.insert("5 \u{20BD}");
        field.set_cursor(1);
        assert_eq!(field.to_string(), "5| \u{20BD}");
    }
}
