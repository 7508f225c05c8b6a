//! # Epipearl Protocols
//!
//! Vocabulary shared by every epipearl crate: scraped form values, banner
//! messages, verification mismatches, the error kinds surfaced to callers,
//! and the [`Transport`](transport::Transport) seam the client talks through.

pub mod error;
pub mod transport;
pub mod types;

pub use error::{EpipearlError, Result, SettingFailure, TransportError};
pub use transport::{FormParams, HttpResponse, RequestBody, Transport};
pub use types::{
    BannerCategory, BannerMessage, DeviceTarget, ExpectedConfig, FormValue, Mismatch,
    ScrapedForm, ScrapedFormBuilder,
};
