//! The HTTP seam between the client and the device.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::TransportError;

/// Ordered url-encoded pairs; a key may repeat (multi-selects).
pub type FormParams = Vec<(String, String)>;

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` pairs.
    Form(FormParams),
    /// A pre-encoded body sent as-is.
    Raw { content_type: String, body: String },
}

impl RequestBody {
    pub fn form(params: FormParams) -> Self {
        Self::Form(params)
    }

    pub fn json(body: impl Into<String>) -> Self {
        Self::Raw {
            content_type: "application/json".to_string(),
            body: body.into(),
        }
    }
}

/// A response as seen by the engine, including the redirects that led to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header names are stored lower-cased.
    pub headers: BTreeMap<String, String>,
    /// Redirect hops before this response, oldest first.
    pub history: Vec<HttpResponse>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_history(mut self, history: Vec<HttpResponse>) -> Self {
        self.history = history;
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

/// Anything able to perform one HTTP round trip against the device.
///
/// Implementations apply authentication and default headers themselves and
/// must follow redirects, recording each hop in [`HttpResponse::history`].
/// Non-2xx statuses are *not* errors at this layer; only failures to obtain a
/// response are.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;

    async fn post(
        &self,
        path: &str,
        body: RequestBody,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let resp = HttpResponse::new(302).with_header("Location", "/admin/channel57/mediasources");
        assert_eq!(resp.location(), Some("/admin/channel57/mediasources"));
        assert_eq!(resp.header("LOCATION"), Some("/admin/channel57/mediasources"));
        assert!(resp.is_redirect());
        assert!(!resp.is_success());
    }

    #[test]
    fn test_response_builders() {
        let hop = HttpResponse::new(302);
        let resp = HttpResponse::new(200)
            .with_body("<html></html>")
            .with_history(vec![hop.clone()]);
        assert_eq!(resp.body, "<html></html>");
        assert_eq!(resp.history, vec![hop]);
        assert!(resp.is_success());
    }

    #[test]
    fn test_json_body() {
        let body = RequestBody::json("{}");
        match body {
            RequestBody::Raw { content_type, body } => {
                assert_eq!(content_type, "application/json");
                assert_eq!(body, "{}");
            }
            RequestBody::Form(_) => panic!("expected raw body"),
        }
    }

    struct Canned;

    #[async_trait]
    impl Transport for Canned {
        async fn get(
            &self,
            path: &str,
            _query: &[(String, String)],
            _headers: &[(String, String)],
        ) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200).with_body(path.to_string()))
        }

        async fn post(
            &self,
            _path: &str,
            _body: RequestBody,
            _headers: &[(String, String)],
        ) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connect("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_transport_as_trait_object() {
        let transport: Box<dyn Transport> = Box::new(Canned);
        let resp = transport.get("admin/mhcfg", &[], &[]).await.unwrap();
        assert_eq!(resp.body, "admin/mhcfg");
        let err = transport
            .post("admin/mhcfg", RequestBody::form(vec![]), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)));
    }
}
