//! The `Epipearl` client facade.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use epipearl_config::DeviceConfig;
use epipearl_http::{HttpOptions, HttpTransport};
use epipearl_protocols::{EpipearlError, Result, Transport};

use crate::webui::{BannerPolicy, Submitter};

/// Client for one Epiphan Pearl device.
///
/// Every public operation is a short, strictly sequential chain of round
/// trips. Failures are returned as [`EpipearlError`] values and logged once,
/// here, with `warn!`.
#[derive(Clone)]
pub struct Epipearl {
    url: String,
    user: String,
    password: String,
    transport: Arc<dyn Transport>,
    banner_policy: BannerPolicy,
}

impl Epipearl {
    /// Client over the default HTTP transport.
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(&DeviceConfig::new(base_url, user, password))
    }

    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        let options = HttpOptions::default()
            .with_timeout(config.timeout())
            .with_max_redirects(config.max_redirects)
            .with_user_agent(config.user_agent.clone());
        let transport =
            HttpTransport::with_options(&config.url, &config.user, &config.password, options)
                .map_err(|e| EpipearlError::request(&config.url, e))?;
        Ok(Self::with_transport(
            &config.url,
            &config.user,
            &config.password,
            Arc::new(transport),
        ))
    }

    /// Client over any transport. `user` and `password` are still needed
    /// because some settings pages echo the device's own credentials.
    pub fn with_transport(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            url: base_url.into(),
            user: user.into(),
            password: password.into(),
            transport,
            banner_policy: BannerPolicy::default(),
        }
    }

    pub fn with_banner_policy(mut self, policy: BannerPolicy) -> Self {
        self.banner_policy = policy;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn banner_policy(&self) -> BannerPolicy {
        self.banner_policy
    }

    pub(crate) fn submitter(&self) -> Submitter<'_> {
        Submitter::new(self.transport.as_ref()).with_policy(self.banner_policy)
    }

    /// Log a failed operation at the calling boundary and hand the result
    /// back untouched.
    pub(crate) fn report<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            warn!("{} on {} failed: {}", operation, self.url, err);
        }
        result
    }
}

impl fmt::Debug for Epipearl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Epipearl")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("banner_policy", &self.banner_policy)
            .finish_non_exhaustive()
    }
}
