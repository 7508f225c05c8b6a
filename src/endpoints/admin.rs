//! The documented HTTP parameter API.

use std::collections::BTreeMap;

use epipearl_protocols::{EpipearlError, Result};

use crate::client::Epipearl;

fn parse_params(body: &str) -> BTreeMap<String, String> {
    body.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

impl Epipearl {
    /// Read channel parameters through `get_params.cgi`.
    pub async fn get_params(&self, channel: &str, keys: &[&str]) -> Result<BTreeMap<String, String>> {
        let path = format!("admin/channel{channel}/get_params.cgi");
        let query: Vec<(String, String)> = keys.iter().map(|k| (k.to_string(), String::new())).collect();

        let result = async {
            let response = self.submitter().get_raw(&path, &query).await?;
            if response.status != 200 {
                return Err(EpipearlError::indiscernible(
                    &path,
                    format!("response status({})", response.status),
                ));
            }
            Ok(parse_params(&response.body))
        }
        .await;
        self.report("get_params", result)
    }

    /// Write channel parameters through `set_params.cgi`.
    pub async fn set_params(&self, channel: &str, params: &[(&str, &str)]) -> Result<()> {
        let path = format!("admin/channel{channel}/set_params.cgi");
        let query: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let result = async {
            let response = self.submitter().get_raw(&path, &query).await?;
            if !response.is_success() {
                return Err(EpipearlError::indiscernible(
                    &path,
                    format!("response status({})", response.status),
                ));
            }
            Ok(())
        }
        .await;
        self.report("set_params", result)
    }
}
