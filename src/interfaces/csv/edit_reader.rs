use crate::application::text_field::{TextField, TextWatcher};
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    /// Type `text` at `position`, or at the cursor.
    Insert,
    Backspace,
    Delete,
    /// Move the cursor to `position`.
    Cursor,
    /// Replace the whole text with `text`.
    Set,
}

/// One scripted edit of a text field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditCommand {
    pub action: EditAction,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub position: Option<usize>,
}

impl EditCommand {
    /// Applies the edit to `field` the way a user would perform it.
    pub fn apply<W: TextWatcher>(&self, field: &mut TextField<W>) -> Result<()> {
        if let Some(position) = self.position {
            field.set_cursor(position);
        }
        match self.action {
            EditAction::Insert => field.insert(self.required_text()?),
            EditAction::Backspace => field.backspace(),
            EditAction::Delete => field.delete(),
            EditAction::Cursor => {
                if self.position.is_none() {
                    return Err(CheckoutError::ValidationError(
                        "cursor edit needs a position".to_string(),
                    ));
                }
            }
            EditAction::Set => field.set_text(self.text.as_deref().unwrap_or_default()),
        }
        Ok(())
    }

    fn required_text(&self) -> Result<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CheckoutError::ValidationError("insert edit needs text".to_string()))
    }
}

/// Reads edit scripts from a CSV source with an `action,text,position` header.
///
/// Wraps `csv::Reader`, trimming whitespace and accepting short records.
pub struct EditReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EditReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and deserializes the edits.
    pub fn edits(self) -> impl Iterator<Item = Result<EditCommand>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CheckoutError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::text_field::Editable;

    struct Plain;

    impl TextWatcher for Plain {
        fn before_text_changed(&mut self, _text: &str, _start: usize, _count: usize, _after: usize) {}
        fn after_text_changed(&mut self, _editable: &mut Editable) {}
    }

    #[test]
    fn test_reader_valid_stream() {
        let data = "action, text, position\ninsert, 12,\ncursor, , 1\nbackspace\nset, 7.5,";
        let edits: Vec<EditCommand> = EditReader::new(data.as_bytes())
            .edits()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(edits.len(), 4);
        assert_eq!(edits[0].action, EditAction::Insert);
        assert_eq!(edits[0].text.as_deref(), Some("12"));
        assert_eq!(edits[1].position, Some(1));
        assert_eq!(edits[2].action, EditAction::Backspace);
        assert_eq!(edits[2].text, None);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "action, text, position\npaste, 1, 1";
        let results: Vec<Result<EditCommand>> = EditReader::new(data.as_bytes()).edits().collect();
        assert!(results[0].is_err());
    }

    #[test]
    fn test_edits_apply_to_field() {
        let data = "action,text,position\ninsert,abc,\ncursor,,1\nbackspace,,\ninsert,x,3\ndelete,,0";
        let mut field = TextField::new(Plain);
        for edit in EditReader::new(data.as_bytes()).edits() {
            edit.unwrap().apply(&mut field).unwrap();
        }
        assert_eq!(field.text(), "cx");
    }

    #[test]
    fn test_insert_without_text_is_rejected() {
        let edit = EditCommand {
            action: EditAction::Insert,
            text: None,
            position: None,
        };
        let mut field = TextField::new(Plain);
        assert!(matches!(
            edit.apply(&mut field),
            Err(CheckoutError::ValidationError(_))
        ));
    }
}
