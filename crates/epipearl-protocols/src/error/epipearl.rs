//! Operation-level errors.

use std::fmt;

use thiserror::Error;

use super::transport::TransportError;
use crate::types::{BannerMessage, Mismatch};

/// Why the device rejected or did not apply a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingFailure {
    /// The response page carried inline warning/error banners.
    Banners(Vec<BannerMessage>),
    /// Verification found fields or checks that did not take.
    Mismatches(Vec<Mismatch>),
}

impl fmt::Display for SettingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = match self {
            Self::Banners(banners) => banners.iter().map(|b| b.message.clone()).collect(),
            Self::Mismatches(mismatches) => mismatches.iter().map(ToString::to_string).collect(),
        };
        f.write_str(&lines.join("\n"))
    }
}

/// The three outcomes an epipearl operation can fail with.
///
/// The kinds never overlap: a `SettingConfig` means the device answered and
/// said no, `IndiscernibleResponse` means it answered in a shape we do not
/// recognise, and `Request` means we never got a usable answer at all.
#[derive(Debug, Error)]
pub enum EpipearlError {
    #[error("error from call {path} - {failure}")]
    SettingConfig {
        path: String,
        failure: SettingFailure,
    },

    #[error("indiscernible response from {path} - {message}")]
    IndiscernibleResponse { path: String, message: String },

    #[error("failed to call {path} - {source}")]
    Request {
        path: String,
        #[source]
        source: TransportError,
    },
}

impl EpipearlError {
    pub fn banners(path: impl Into<String>, banners: Vec<BannerMessage>) -> Self {
        Self::SettingConfig {
            path: path.into(),
            failure: SettingFailure::Banners(banners),
        }
    }

    pub fn mismatches(path: impl Into<String>, mismatches: Vec<Mismatch>) -> Self {
        Self::SettingConfig {
            path: path.into(),
            failure: SettingFailure::Mismatches(mismatches),
        }
    }

    pub fn indiscernible(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::IndiscernibleResponse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn request(path: impl Into<String>, source: TransportError) -> Self {
        Self::Request {
            path: path.into(),
            source,
        }
    }

    /// Path of the call that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::SettingConfig { path, .. }
            | Self::IndiscernibleResponse { path, .. }
            | Self::Request { path, .. } => path,
        }
    }

    pub fn is_setting_config(&self) -> bool {
        matches!(self, Self::SettingConfig { .. })
    }

    pub fn is_indiscernible(&self) -> bool {
        matches!(self, Self::IndiscernibleResponse { .. })
    }

    /// Only transport failures leave the outcome unknown; those are the
    /// ones worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Mismatches carried by a verification failure, empty otherwise.
    pub fn mismatch_list(&self) -> &[Mismatch] {
        match self {
            Self::SettingConfig {
                failure: SettingFailure::Mismatches(m),
                ..
            } => m,
            _ => &[],
        }
    }

    /// Banners carried by a rejected submission, empty otherwise.
    pub fn banner_list(&self) -> &[BannerMessage] {
        match self {
            Self::SettingConfig {
                failure: SettingFailure::Banners(b),
                ..
            } => b,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, EpipearlError>;
