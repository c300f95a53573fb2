//! Digital receipt URL input collector.

use url::Url;

use crate::wizard::error::ValidationError;

/// Local URL buffer.
#[derive(Debug, Clone, Default)]
pub struct ReceiptEntry {
    url: String,
}

impl ReceiptEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn validate(&self) -> Result<String, ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }
        if !is_valid_url(url) {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }
        Ok(url.to_string())
    }
}

/// Checks for an absolute http(s) URL with a non-empty host.
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
