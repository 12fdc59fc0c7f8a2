//! Numeric input field: a [`NumericMask`] plus terminal key editing.
//!
//! Keys are turned into the candidate text and caret a text box would
//! hold after the keystroke, then handed to the mask, which accepts or
//! rejects them.

use crossterm::event::{KeyCode, KeyEvent};

use placeorder_core::mask::{Caret, Commit, MaskOptions, MaskRejection, NumericMask};

/// What a keystroke did to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldOutcome {
    /// Not an editing key.
    Ignored,
    /// Only the caret moved.
    Moved,
    Edited(Commit),
    Rejected(MaskRejection),
}

#[derive(Debug, Clone)]
pub struct NumberField {
    pub label: String,
    mask: NumericMask,
}

impl NumberField {
    pub fn new(label: impl Into<String>, options: MaskOptions, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            mask: NumericMask::new(options, value),
        }
    }

    pub fn text(&self) -> &str {
        self.mask.text()
    }

    pub fn caret(&self) -> Caret {
        self.mask.caret()
    }

    pub fn value(&self) -> Option<f64> {
        self.mask.value()
    }

    pub fn is_focused(&self) -> bool {
        self.mask.is_focused()
    }

    pub fn focus(&mut self) {
        self.mask.focus();
    }

    pub fn blur(&mut self) -> Commit {
        self.mask.blur()
    }

    pub fn set_value(&mut self, value: Option<f64>) -> Commit {
        self.mask.set_value(value)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FieldOutcome {
        let (start, end) = self.mask.caret().range();
        let len = self.text().chars().count();

        match key.code {
            KeyCode::Char(c) => self.replace(start, end, Some(c)),
            KeyCode::Backspace if start != end => self.replace(start, end, None),
            KeyCode::Backspace if start > 0 => self.replace(start - 1, start, None),
            KeyCode::Delete if start != end => self.replace(start, end, None),
            KeyCode::Delete if start < len => self.replace(start, start + 1, None),
            KeyCode::Left => self.move_to(start.saturating_sub(1)),
            KeyCode::Right => self.move_to((start + 1).min(len)),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(len),
            _ => FieldOutcome::Ignored,
        }
    }

    /// Replace the chars in `from..to` with `insert` and submit the result.
    fn replace(&mut self, from: usize, to: usize, insert: Option<char>) -> FieldOutcome {
        let mut candidate: String = self.text().chars().take(from).collect();
        candidate.extend(insert);
        candidate.extend(self.text().chars().skip(to));
        let caret = Caret::collapsed(from + usize::from(insert.is_some()));

        match self.mask.edit(&candidate, caret) {
            Ok(commit) => FieldOutcome::Edited(commit),
            Err(rejection) => {
                tracing::debug!(field = %self.label, %candidate, %rejection, "keystroke rejected");
                FieldOutcome::Rejected(rejection)
            }
        }
    }

    fn move_to(&mut self, position: usize) -> FieldOutcome {
        self.mask.move_caret(Caret::collapsed(position));
        FieldOutcome::Moved
    }
}
