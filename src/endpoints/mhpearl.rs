//! Settings of the scheduling agent add-on (`mhcfg`).
//!
//! Not part of the stock firmware: the add-on exposes its own form and the
//! client drives it with the expected-value diff.

use serde::{Deserialize, Serialize};

use epipearl_protocols::{ExpectedConfig, FormValue, Result, ScrapedForm};

use crate::client::Epipearl;
use crate::webui::{VerifySource, configure_with_expected, scrape_form};

const MHCFG_PATH: &str = "admin/mhcfg";

pub const MHPEARL_FORM: &str = "mhcfg";

/// Fields of the `mhcfg` form the client reads and writes.
pub const MHPEARL_FIELDS: &[&str] = &[
    "DEVICE_NAME",
    "DEVICE_ADDRESS",
    "DEVICE_USERNAME",
    "DEVICE_PASSWORD",
    "DEVICE_CHANNEL",
    "DEVICE_LIVE_CHANNELS",
    "DEVICE_LIVE_STREAMS",
    "MANAGE_LIVE",
    "FILE_SEARCH_RANGE",
    "ADMIN_SERVER_URL",
    "ADMIN_SERVER_USER",
    "ADMIN_SERVER_PASSWD",
    "UPDATE_FREQUENCY",
    "CONNECTTIMEOUT",
    "LOW_SPEED_TIME",
    "MAX_INGEST",
    "INGEST_DELAY",
    "NUMBER_OF_RETRIES",
    "BACKUP_AGENT",
];

/// Kept out of mismatch reports even if the page renders them as text.
const CREDENTIAL_FIELDS: &[&str] = &["DEVICE_PASSWORD", "ADMIN_SERVER_PASSWD"];

/// What the caller controls on the scheduling agent. Connection tuning
/// (`CONNECTTIMEOUT`, `MAX_INGEST`, ...) keeps whatever the device has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MhPearlSettings {
    pub device_name: String,
    /// Recorder id used for recordings.
    pub device_channel: String,
    pub device_live_channels: Vec<String>,
    /// JSON object of live stream URLs by resolution.
    pub output_streams: String,
    /// Stream around the clock instead of only during scheduled events.
    pub live_nonstop: bool,
    pub file_search_range_seconds: Option<u64>,
    pub admin_server_url: String,
    pub admin_server_user: String,
    pub admin_server_password: String,
    pub update_frequency_seconds: u64,
    /// Keep recordings on the device instead of ingesting them.
    pub backup_agent: bool,
}

impl Default for MhPearlSettings {
    fn default() -> Self {
        Self {
            device_name: String::new(),
            device_channel: String::new(),
            device_live_channels: Vec::new(),
            output_streams: String::new(),
            live_nonstop: true,
            file_search_range_seconds: None,
            admin_server_url: String::new(),
            admin_server_user: String::new(),
            admin_server_password: String::new(),
            update_frequency_seconds: 120,
            backup_agent: false,
        }
    }
}

impl MhPearlSettings {
    /// Field overrides for `client`, the device being configured.
    fn overrides(&self, client: &Epipearl) -> Vec<(&'static str, FormValue)> {
        let search_range = self
            .file_search_range_seconds
            .map(|s| s.to_string())
            .unwrap_or_default();
        vec![
            ("DEVICE_NAME", FormValue::text(&self.device_name)),
            ("DEVICE_ADDRESS", FormValue::text(client.url())),
            ("DEVICE_USERNAME", FormValue::text(client.user())),
            ("DEVICE_PASSWORD", FormValue::text(client.password())),
            ("DEVICE_CHANNEL", FormValue::text(&self.device_channel)),
            (
                "DEVICE_LIVE_CHANNELS",
                FormValue::text(self.device_live_channels.join(",")),
            ),
            ("DEVICE_LIVE_STREAMS", FormValue::text(&self.output_streams)),
            ("MANAGE_LIVE", FormValue::Bool(!self.live_nonstop)),
            ("FILE_SEARCH_RANGE", FormValue::text(search_range)),
            ("ADMIN_SERVER_URL", FormValue::text(&self.admin_server_url)),
            ("ADMIN_SERVER_USER", FormValue::text(&self.admin_server_user)),
            ("ADMIN_SERVER_PASSWD", FormValue::text(&self.admin_server_password)),
            (
                "UPDATE_FREQUENCY",
                FormValue::text(self.update_frequency_seconds.to_string()),
            ),
            ("BACKUP_AGENT", FormValue::Bool(self.backup_agent)),
        ]
    }
}

impl Epipearl {
    /// Current scheduling agent settings, restricted to [`MHPEARL_FIELDS`].
    pub async fn get_mhpearl_settings(&self) -> Result<ScrapedForm> {
        let result = self.fetch_mhpearl_settings().await;
        self.report("get_mhpearl_settings", result)
    }

    /// Apply `settings` on top of the current values and verify every field
    /// took. Returns the de-facto form.
    pub async fn set_mhpearl_settings(&self, settings: &MhPearlSettings) -> Result<ScrapedForm> {
        let result = async {
            let current = self.fetch_mhpearl_settings().await?;
            let expected = CREDENTIAL_FIELDS.iter().fold(
                ExpectedConfig::merged(&current, settings.overrides(self)),
                |expected, name| expected.with_sensitive(*name),
            );
            configure_with_expected(
                &self.submitter(),
                MHCFG_PATH,
                MHPEARL_FORM,
                &expected,
                VerifySource::Response,
            )
            .await
        }
        .await;
        self.report("set_mhpearl_settings", result)
    }

    async fn fetch_mhpearl_settings(&self) -> Result<ScrapedForm> {
        let response = self.submitter().fetch(MHCFG_PATH).await?;
        scrape_form(MHCFG_PATH, &response.body, MHPEARL_FORM, Some(MHPEARL_FIELDS))
    }
}
