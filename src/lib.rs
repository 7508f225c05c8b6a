//! # Epipearl
//!
//! Client for configuring Epiphan Pearl capture appliances.
//!
//! The device offers a small parameter API (`get_params.cgi`/`set_params.cgi`)
//! and, for everything else, the HTML forms of its admin web UI. This crate
//! posts those forms the way a browser would, then scrapes the page that
//! comes back to confirm each setting actually took.
//!
//! ```no_run
//! # async fn demo() -> epipearl::Result<()> {
//! let pearl = epipearl::Epipearl::new("http://pearl.example.edu", "admin", "secret")?;
//! pearl.set_ntp("north-america.pool.ntp.org", "US/Alaska").await?;
//! let channel = pearl.create_channel().await?;
//! pearl.rename_channel(&channel, "lecture-hall").await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod endpoints;
pub mod logging;
pub mod webui;

pub use client::Epipearl;
pub use endpoints::{CHANNEL_ID_PATTERN, MHPEARL_FIELDS, MHPEARL_FORM, MhPearlSettings, RtmpSettings};
pub use logging::{LoggingError, init_logging};
pub use webui::{BannerPolicy, Submitter, VerifySource, decode_creation_redirect};

pub use epipearl_config::{
    ClientConfig, ConfigError, ConfigLoader, ConfigValidator, DeviceConfig, LoggingConfig,
};
pub use epipearl_protocols::{
    BannerCategory, BannerMessage, DeviceTarget, EpipearlError, ExpectedConfig, FormParams,
    FormValue, HttpResponse, Mismatch, RequestBody, Result, ScrapedForm, SettingFailure,
    Transport, TransportError,
};
pub use epipearl_scrape::{CheckSpec, Predicate};
