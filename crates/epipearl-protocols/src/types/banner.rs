//! Inline warning/error banners rendered by the device web UI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Code attached to synthetic banners produced when a banner could not be
/// read.
pub const HTML_PARSING_ERROR_CODE: &str = "html_parsing_error";
pub const UNKNOWN_MESSAGE: &str = "unknown msg";
pub const UNKNOWN_CODE: &str = "unknown code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerCategory {
    Warning,
    Error,
}

impl fmt::Display for BannerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One banner scraped from a response page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerMessage {
    pub category: BannerCategory,
    pub message: String,
    pub code: String,
}

impl BannerMessage {
    pub fn new(
        category: BannerCategory,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            code: code.into(),
        }
    }

    pub fn warning(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(BannerCategory::Warning, message, code)
    }

    pub fn error(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(BannerCategory::Error, message, code)
    }

    /// Stand-in for a banner whose markup could not be read.
    pub fn parsing_error(message: impl Into<String>) -> Self {
        Self::error(message, HTML_PARSING_ERROR_CODE)
    }

    pub fn is_error(&self) -> bool {
        self.category == BannerCategory::Error
    }
}

impl fmt::Display for BannerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
