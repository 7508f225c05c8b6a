//! Channels, recorders, layouts and streaming.

use serde::{Deserialize, Serialize};
use tracing::info;

use epipearl_protocols::{DeviceTarget, EpipearlError, RequestBody, Result};
use epipearl_scrape::{CheckSpec, Predicate};

use crate::client::Epipearl;
use crate::webui::{configure_with_checks, decode_creation_redirect};

/// Matches the id in the `Location` the device redirects to after creating
/// a channel.
pub const CHANNEL_ID_PATTERN: &str = r"/admin/channel(\d+)";

const DELETED_MARKER: &str = "successfully deleted";

/// RTMP push target for live streaming from one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RtmpSettings {
    pub url: String,
    pub stream: String,
    pub username: String,
    pub password: String,
}

impl RtmpSettings {
    fn checks(&self) -> Vec<CheckSpec> {
        vec![
            CheckSpec::new(
                format!("rtmp_usr expected({})", self.username),
                Predicate::id_value("rtmp_username", &self.username),
            ),
            CheckSpec::new(
                format!("rtmp_url expected({})", self.url),
                Predicate::id_value("rtmp_url", &self.url),
            ),
            CheckSpec::new(
                format!("rtmp_stream expected({})", self.stream),
                Predicate::id_value("rtmp_stream", &self.stream),
            ),
            CheckSpec::new(
                "not the rtmp_pwd expected",
                Predicate::id_value("rtmp_password", &self.password),
            ),
        ]
    }
}

fn delete_request(target: &DeviceTarget) -> (String, String) {
    match target {
        DeviceTarget::Channel(id) => (format!("admin/channel{id}/status"), id.clone()),
        DeviceTarget::Recorder(id) => (format!("admin/recorder{id}/archive"), format!("m{id}")),
    }
}

impl Epipearl {
    /// Create an unnamed channel and return its id.
    pub async fn create_channel(&self) -> Result<String> {
        let path = "admin/add_channel.cgi";
        let result = async {
            let response = self.submitter().get_raw(path, &[]).await?;
            decode_creation_redirect(&response, CHANNEL_ID_PATTERN, path)
        }
        .await;
        self.report("create_channel", result)
    }

    /// Rename channel `channel_id`; returns the new name.
    pub async fn rename_channel(&self, channel_id: &str, name: &str) -> Result<String> {
        let path = "admin/ajax/rename_channel.cgi";
        let form = vec![
            ("value".to_string(), name.to_string()),
            ("id".to_string(), "channelname".to_string()),
            ("channel".to_string(), channel_id.to_string()),
        ];
        let result = async {
            let response = self
                .submitter()
                .post_raw(path, RequestBody::form(form))
                .await?;
            if response.status != 200 {
                return Err(EpipearlError::indiscernible(
                    path,
                    format!("response status({})", response.status),
                ));
            }
            Ok(name.to_string())
        }
        .await;
        self.report("rename_channel", result)
    }

    /// Upload a layout definition; returns the layout the device echoes back.
    pub async fn set_channel_layout(
        &self,
        channel_id: &str,
        layout: &serde_json::Value,
        layout_id: &str,
    ) -> Result<String> {
        let path = format!("admin/channel{channel_id}/layouts/{layout_id}");
        let result = async {
            let response = self
                .submitter()
                .post_raw(&path, RequestBody::json(layout.to_string()))
                .await?;
            if response.status != 200 {
                return Err(EpipearlError::indiscernible(
                    &path,
                    format!("response status({})", response.status),
                ));
            }
            Ok(response.body)
        }
        .await;
        self.report("set_channel_layout", result)
    }

    /// Create a channel, name it and lay it out; returns the new channel id.
    ///
    /// Steps are not rolled back: a failure after creation leaves an unnamed
    /// or unlaid-out channel behind.
    pub async fn create_named_channel(
        &self,
        name: &str,
        layout: &serde_json::Value,
        layout_id: &str,
    ) -> Result<String> {
        let channel_id = self.create_channel().await?;
        self.rename_channel(&channel_id, name).await?;
        self.set_channel_layout(&channel_id, layout, layout_id).await?;
        info!("created channel {} ({})", channel_id, name);
        Ok(channel_id)
    }

    /// Point channel `channel_id` at an RTMP server.
    pub async fn set_channel_rtmp(&self, channel_id: &str, rtmp: &RtmpSettings) -> Result<()> {
        let path = format!("admin/channel{channel_id}/streamsetup");
        let form = vec![
            ("rtmp_url".to_string(), rtmp.url.clone()),
            ("rtmp_stream".to_string(), rtmp.stream.clone()),
            ("rtmp_username".to_string(), rtmp.username.clone()),
            ("rtmp_password".to_string(), rtmp.password.clone()),
        ];
        let result = configure_with_checks(&self.submitter(), &path, form, &rtmp.checks()).await;
        self.report("set_channel_rtmp", result)
    }

    /// Move a channel or recorder to the trash.
    ///
    /// The device reports success for ids that do not exist.
    pub async fn delete(&self, target: &DeviceTarget) -> Result<()> {
        let (path, delete_id) = delete_request(target);
        let form = vec![
            ("deleteid".to_string(), delete_id),
            ("deletemode".to_string(), "trash".to_string()),
        ];
        let checks = [CheckSpec::new(
            "successful deletion message not found",
            Predicate::text_contains(DELETED_MARKER),
        )];
        let result = configure_with_checks(&self.submitter(), &path, form, &checks).await;
        self.report(&format!("delete {target}"), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_request_paths() {
        assert_eq!(
            delete_request(&DeviceTarget::channel("39")),
            ("admin/channel39/status".to_string(), "39".to_string())
        );
        assert_eq!(
            delete_request(&DeviceTarget::recorder("2")),
            ("admin/recorder2/archive".to_string(), "m2".to_string())
        );
    }

    #[test]
    fn test_rtmp_password_is_never_echoed() {
        let rtmp = RtmpSettings {
            url: "rtmp://cp1.live.edgefcs.net/live".to_string(),
            stream: "lab-2".to_string(),
            username: "usr".to_string(),
            password: "s3cret".to_string(),
        };
        let checks = rtmp.checks();
        assert_eq!(checks.len(), 4);
        assert!(checks.iter().all(|c| !c.description.contains("s3cret")));
        assert_eq!(checks[3].predicate, Predicate::id_value("rtmp_password", "s3cret"));
    }
}
