//! Configuration submitter.

use tracing::debug;

use epipearl_protocols::{
    BannerMessage, EpipearlError, FormParams, HttpResponse, RequestBody, Result, Transport,
};
use epipearl_scrape::detect_banners;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Which banner categories make a 200 response count as rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerPolicy {
    /// Warnings are escalated along with errors.
    #[default]
    Strict,
    /// Only error banners fail the call.
    ErrorsOnly,
}

impl BannerPolicy {
    pub fn escalates(&self, banner: &BannerMessage) -> bool {
        match self {
            Self::Strict => true,
            Self::ErrorsOnly => banner.is_error(),
        }
    }
}

/// Performs one request against the device and sorts the outcome into
/// success or one of the three error kinds.
pub struct Submitter<'a> {
    transport: &'a dyn Transport,
    policy: BannerPolicy,
}

impl<'a> Submitter<'a> {
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self {
            transport,
            policy: BannerPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BannerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> BannerPolicy {
        self.policy
    }

    /// GET without classification; only transport failures are errors.
    pub async fn get_raw(&self, path: &str, query: &[(String, String)]) -> Result<HttpResponse> {
        self.transport
            .get(path, query, &[])
            .await
            .map_err(|e| EpipearlError::request(path, e))
    }

    /// POST without classification; only transport failures are errors.
    pub async fn post_raw(&self, path: &str, body: RequestBody) -> Result<HttpResponse> {
        let headers = match body {
            RequestBody::Form(_) => vec![("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string())],
            RequestBody::Raw { .. } => Vec::new(),
        };
        self.transport
            .post(path, body, &headers)
            .await
            .map_err(|e| EpipearlError::request(path, e))
    }

    /// POST form `params` to `path` and classify the response.
    pub async fn submit(&self, path: &str, params: FormParams) -> Result<HttpResponse> {
        let response = self.post_raw(path, RequestBody::form(params)).await?;
        self.classify(path, response)
    }

    /// GET `path` and classify the response.
    pub async fn fetch(&self, path: &str) -> Result<HttpResponse> {
        let response = self.get_raw(path, &[]).await?;
        self.classify(path, response)
    }

    /// A 200 passes unless it carries a banner the policy escalates, in
    /// which case every banner on the page is reported. Any other status is
    /// indiscernible.
    pub fn classify(&self, path: &str, response: HttpResponse) -> Result<HttpResponse> {
        if response.status != 200 {
            return Err(EpipearlError::indiscernible(
                path,
                format!("response status({})", response.status),
            ));
        }

        let banners = detect_banners(&response.body);
        if banners.iter().any(|b| self.policy.escalates(b)) {
            return Err(EpipearlError::banners(path, banners));
        }
        if !banners.is_empty() {
            debug!("{} answered with {} tolerated banner(s)", path, banners.len());
        }
        Ok(response)
    }
}
