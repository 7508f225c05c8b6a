//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use epipearl_protocols::{HttpResponse, RequestBody, Transport, TransportError};

pub const DEFAULT_USER_AGENT: &str = concat!("epipearl/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
pub const DEFAULT_ACCEPT: &str = "text/html, text/*, video/avi";
pub const DEFAULT_ACCEPT_ENCODING: &str = "gzip, deflate";

/// Tunables for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Applies to each round trip, redirect hops included.
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Talks to one device over HTTP(S) with Basic authentication.
pub struct HttpTransport {
    client: Client,
    base: Url,
    user: String,
    password: String,
    default_headers: HeaderMap,
    max_redirects: usize,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, TransportError> {
        Self::with_options(base_url, user, password, HttpOptions::default())
    }

    pub fn with_options(
        base_url: &str,
        user: impl Into<String>,
        password: impl Into<String>,
        options: HttpOptions,
    ) -> Result<Self, TransportError> {
        let base = Url::parse(base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{base_url}: {e}")))?;

        // redirects are followed by hand so every hop can be recorded
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(options.timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build http client: {e}")))?;

        let mut default_headers = HeaderMap::new();
        insert_header(&mut default_headers, "user-agent", &options.user_agent)?;
        insert_header(&mut default_headers, "accept", DEFAULT_ACCEPT)?;
        insert_header(&mut default_headers, "accept-encoding", DEFAULT_ACCEPT_ENCODING)?;
        insert_header(&mut default_headers, "x-requested-auth", "Basic")?;

        Ok(Self {
            client,
            base,
            user: user.into(),
            password: password.into(),
            default_headers,
            max_redirects: options.max_redirects,
        })
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request_headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, TransportError> {
        let mut headers = self.default_headers.clone();
        for (name, value) in extra {
            insert_header(&mut headers, name, value)?;
        }
        Ok(headers)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<RequestBody>,
        extra_headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let headers = self.request_headers(extra_headers)?;
        let mut url = self.resolve(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut method = method;
        let mut body = body;
        let mut history = Vec::new();
        loop {
            let response = self
                .round_trip(&method, &url, body.as_ref(), &headers)
                .await?;

            let location = response
                .location()
                .filter(|_| follows(response.status))
                .map(str::to_string);
            let Some(location) = location else {
                return Ok(response.with_history(history));
            };

            if history.len() >= self.max_redirects {
                return Err(TransportError::Redirect(format!(
                    "more than {} redirects starting at {}",
                    self.max_redirects, path
                )));
            }
            url = url
                .join(&location)
                .map_err(|e| TransportError::InvalidUrl(format!("{location}: {e}")))?;
            if matches!(response.status, 301..=303) {
                method = Method::GET;
                body = None;
            }
            debug!("following {} redirect to {}", response.status, url);
            history.push(response);
        }
    }

    async fn round_trip(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&RequestBody>,
        headers: &HeaderMap,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = headers.clone();
        if let Some(RequestBody::Raw { content_type, .. }) = body {
            insert_header(&mut headers, CONTENT_TYPE.as_str(), content_type)?;
        }

        let request = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(&self.user, Some(&self.password))
            .headers(headers);
        let request = match body {
            Some(RequestBody::Form(params)) => request.form(params),
            Some(RequestBody::Raw { body, .. }) => request.body(body.clone()),
            None => request,
        };

        let response = request.send().await.map_err(map_error)?;
        let status = response.status().as_u16();
        debug!("{} {} -> {}", method, url, status);

        let mut converted = HttpResponse::new(status);
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes());
            converted
                .headers
                .entry(name.as_str().to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert_with(|| value.to_string());
        }
        converted.body = response.text().await.map_err(map_error)?;
        Ok(converted)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.execute(Method::GET, path, query, None, headers).await
    }

    async fn post(
        &self,
        path: &str,
        body: RequestBody,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.execute(Method::POST, path, &[], Some(body), headers).await
    }
}

fn follows(status: u16) -> bool {
    matches!(status, 301..=303 | 307 | 308)
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<(), TransportError> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError::Other(format!("invalid header name ({name}): {e}")))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| TransportError::Other(format!("invalid value for header {name}: {e}")))?;
    headers.insert(header_name, header_value);
    Ok(())
}

fn map_error(err: reqwest::Error) -> TransportError {
    let message = err.to_string();
    if err.is_timeout() {
        TransportError::Timeout(message)
    } else if err.is_connect() {
        TransportError::Connect(message)
    } else if err.is_redirect() {
        TransportError::Redirect(message)
    } else if err.is_builder() {
        TransportError::InvalidUrl(message)
    } else {
        TransportError::Other(message)
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
