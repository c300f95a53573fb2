//! Free-text input collector.

use crate::{constants::MIN_TEXT_LENGTH, wizard::error::ValidationError};

/// Local text buffer for the text method.
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    buffer: String,
}

impl TextEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns the trimmed text if it is long enough to convert.
    pub fn validate(&self) -> Result<String, ValidationError> {
        let trimmed = self.buffer.trim();
        if trimmed.chars().count() < MIN_TEXT_LENGTH {
            return Err(ValidationError::TextTooShort {
                min: MIN_TEXT_LENGTH,
            });
        }
        Ok(trimmed.to_string())
    }
}
