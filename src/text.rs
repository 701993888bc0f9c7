//! Accumulated recognized text.

use crate::defaults;

/// Owns the growing text buffer.
///
/// Append-only except for explicit clear. Labels append verbatim, except the
/// reserved space label (compared trimmed, case-insensitively) which appends
/// a single literal space.
#[derive(Debug, Default)]
pub struct TextAccumulator {
    buffer: String,
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one committed symbol. Labels may be multi-character tokens.
    pub fn append(&mut self, label: &str) {
        if label.trim().eq_ignore_ascii_case(defaults::SPACE_LABEL) {
            self.buffer.push(' ');
        } else {
            self.buffer.push_str(label);
        }
    }

    /// Empties the buffer. The caller is responsible for resetting the gate
    /// alongside, so suppression state never outlives the text it guarded.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// The buffer verbatim. Never blocks.
    pub fn current_text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
