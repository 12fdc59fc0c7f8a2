//! Numeric input mask: the formatting/parsing state machine behind every
//! numeric field of the form.
//!
//! A mask owns the display text, the caret and the focus flag of one field.
//! Keystrokes arrive as a whole candidate text (what the field would read
//! after the edit) and are either accepted, reformatted and committed, or
//! rejected with the field left untouched.
//!
//! While the field is focused, values pushed from outside are buffered so
//! the user's typing is never overwritten; blur reformats from the last
//! committed value.

pub mod format;
pub mod limits;
pub mod parse;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use format::{collapse_zeros, format_text, format_value, plain_decimal};
pub use limits::{clamp, Limits};
pub use parse::{clear_value, correct_sign, parse_keystroke, parse_number};

/// Why a candidate text was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MaskRejection {
    #[error("only digits, '-' and a single '.' are allowed")]
    InvalidSymbols,

    #[error("prefix and suffix must both be present")]
    BrokenWrapper,

    #[error("negative values are not allowed")]
    NegativeNotAllowed,

    #[error("not a number")]
    Malformed,
}

/// Display and range options of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    pub prefix: String,
    pub suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Digits kept after the decimal point; `None` keeps all of them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_scale: Option<u32>,
}

impl MaskOptions {
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_decimal_scale(mut self, decimal_scale: u32) -> Self {
        self.decimal_scale = Some(decimal_scale);
        self
    }

    pub fn limits(&self) -> Limits {
        Limits::new(self.min, self.max)
    }
}

/// Caret or selection, in character offsets into the display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caret {
    pub start: usize,
    pub end: usize,
}

impl Caret {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn collapsed(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Ordered `(low, high)` pair.
    pub fn range(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// What a mask operation hands to the field's value handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Commit {
    /// Nothing to report.
    Unchanged,
    /// The field was emptied (or holds no digit yet).
    Cleared,
    Value(f64),
}

impl Commit {
    /// `Some(value)` when the handler must be notified.
    pub fn emitted(self) -> Option<Option<f64>> {
        match self {
            Commit::Unchanged => None,
            Commit::Cleared => Some(None),
            Commit::Value(v) => Some(Some(v)),
        }
    }

    fn from_value(value: Option<f64>) -> Self {
        value.map_or(Commit::Cleared, Commit::Value)
    }
}

/// Per-field mask state.
#[derive(Debug, Clone)]
pub struct NumericMask {
    options: MaskOptions,
    limits: Limits,
    text: String,
    caret: Caret,
    focused: bool,
    committed: Option<f64>,
}

impl NumericMask {
    /// Start unfocused, showing `value` clamped into range.
    pub fn new(options: MaskOptions, value: Option<f64>) -> Self {
        let limits = options.limits();
        let mut mask = Self {
            options,
            limits,
            text: String::new(),
            caret: Caret::default(),
            focused: false,
            committed: value,
        };
        mask.reformat_committed();
        mask.caret = Caret::collapsed(mask.right_bound());
        mask
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Last committed value.
    pub fn value(&self) -> Option<f64> {
        self.committed
    }

    pub fn options(&self) -> &MaskOptions {
        &self.options
    }

    /// Enter the focused state. The display is left as is.
    pub fn focus(&mut self) {
        self.focused = true;
        self.caret = self.correct_caret(Caret::collapsed(self.right_bound()));
    }

    /// Leave the focused state and reformat from the committed value with
    /// a forced clamp.
    pub fn blur(&mut self) -> Commit {
        let commit = self.reformat_committed();
        self.focused = false;
        commit
    }

    /// Push a value from outside. Shown immediately when unfocused,
    /// buffered until blur otherwise.
    pub fn set_value(&mut self, value: Option<f64>) -> Commit {
        self.committed = value;
        if self.focused {
            return Commit::Unchanged;
        }
        let commit = self.reformat_committed();
        self.caret = Caret::collapsed(self.right_bound());
        commit
    }

    /// Reformat from the committed value regardless of focus.
    pub fn refresh(&mut self) -> Commit {
        let commit = self.reformat_committed();
        self.caret = self.correct_caret(self.caret);
        commit
    }

    /// Swap display options and reformat.
    pub fn set_options(&mut self, options: MaskOptions) -> Commit {
        self.limits = options.limits();
        self.options = options;
        self.refresh()
    }

    /// Validate `candidate` without touching state; returns its cleaned text.
    pub fn check(&self, candidate: &str) -> Result<String, MaskRejection> {
        parse_keystroke(
            &self.text,
            &normalize_separator(candidate),
            &self.options,
            self.limits.disallows_negative(),
        )
    }

    /// Apply an edit: `candidate` is the text the field would hold and
    /// `caret` the caret position within it.
    ///
    /// On rejection the display is kept and the caret collapses to its
    /// previous start.
    pub fn edit(&mut self, candidate: &str, caret: Caret) -> Result<Commit, MaskRejection> {
        let clear = match self.check(candidate) {
            Ok(clear) => clear,
            Err(rejection) => {
                self.caret = Caret::collapsed(self.caret.start);
                return Err(rejection);
            }
        };

        let (display, _) = self.validate_text(format_text(&clear, &self.options), false);
        let raw = parse_number(&clear);
        let emitted = self.limits.clamp(raw, false).or(raw);

        let shifted = if caret.is_collapsed() {
            let delta = char_len(&display) as isize - char_len(candidate) as isize;
            Caret::collapsed(caret.start.saturating_add_signed(delta))
        } else {
            caret
        };
        self.text = display;
        self.caret = self.correct_caret(shifted);
        self.committed = emitted;
        Ok(Commit::from_value(emitted))
    }

    /// Move the caret (arrow keys, pointer) and keep it off the wrapper.
    pub fn move_caret(&mut self, caret: Caret) {
        self.caret = self.correct_caret(caret);
    }

    /// Clamp a collapsed caret into the editable span between prefix (and
    /// sign) and suffix. Selections pass through unchanged.
    pub fn correct_caret(&self, caret: Caret) -> Caret {
        if !caret.is_collapsed() {
            return caret;
        }
        let left = self.left_bound();
        let right = self.right_bound();
        let position = if left <= right {
            caret.start.clamp(left, right)
        } else {
            caret.start
        };
        Caret::collapsed(position)
    }

    fn left_bound(&self) -> usize {
        let signed = self
            .text
            .strip_prefix('-')
            .is_some_and(|rest| rest.starts_with(self.options.prefix.as_str()));
        char_len(&self.options.prefix) + usize::from(signed)
    }

    fn right_bound(&self) -> usize {
        char_len(&self.text).saturating_sub(char_len(&self.options.suffix))
    }

    fn reformat_committed(&mut self) -> Commit {
        let (text, clamped) = self.validate_text(format_value(self.committed, &self.options), true);
        self.text = text;
        match clamped {
            Some(limit) => {
                self.committed = Some(limit);
                Commit::Value(limit)
            }
            None => Commit::Unchanged,
        }
    }

    /// Apply the range check to formatted text, returning the text to
    /// display and the limit it was snapped to, if any.
    fn validate_text(&self, text: String, forced: bool) -> (String, Option<f64>) {
        if text.is_empty() {
            return (text, None);
        }
        let value = parse_number(&clear_value(&text, &self.options));
        match self.limits.clamp(value, forced) {
            Some(limit) => (format_value(Some(limit), &self.options), Some(limit)),
            None => (text, None),
        }
    }
}

/// Accept `,` as decimal separator.
fn normalize_separator(text: &str) -> String {
    text.replacen(',', ".", 1)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
