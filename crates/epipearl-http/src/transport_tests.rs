use super::*;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&server.uri(), "johnny", "cash").unwrap()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_default_options() {
    let options = HttpOptions::default();
    assert_eq!(options.timeout, Duration::from_secs(5));
    assert_eq!(options.max_redirects, 10);
    assert!(options.user_agent.starts_with("epipearl/"));
}

#[test]
fn test_invalid_base_url() {
    let err = HttpTransport::new("not a url", "u", "p").err().unwrap();
    assert!(matches!(err, TransportError::InvalidUrl(_)));
}

#[test]
fn test_invalid_user_agent_is_rejected() {
    let options = HttpOptions::default().with_user_agent("bad\nagent");
    let err = HttpTransport::with_options("http://device.local", "u", "p", options)
        .err()
        .unwrap();
    assert!(matches!(err, TransportError::Other(_)));
}

#[tokio::test]
async fn test_get_sends_auth_and_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/mhcfg"))
        .and(header("authorization", "Basic am9obm55OmNhc2g="))
        .and(header("x-requested-auth", "Basic"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let resp = transport(&server).get("admin/mhcfg", &[], &[]).await.unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "<html>ok</html>");
    assert!(resp.history.is_empty());
}

#[tokio::test]
async fn test_get_with_query_and_extra_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/channel1/get_params.cgi"))
        .and(query_param("publish_type", ""))
        .and(header("x-custom", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("publish_type = 6"))
        .mount(&server)
        .await;

    let resp = transport(&server)
        .get(
            "/admin/channel1/get_params.cgi",
            &pairs(&[("publish_type", "")]),
            &pairs(&[("X-Custom", "yes")]),
        )
        .await
        .unwrap();
    assert_eq!(resp.body, "publish_type = 6");
}

#[tokio::test]
async fn test_post_form_keeps_repeated_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/sources/D2P280762.hdmi-a"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("s=a&s=b&pfd_form_id=vsource"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let body = RequestBody::form(pairs(&[("s", "a"), ("s", "b"), ("pfd_form_id", "vsource")]));
    let resp = transport(&server)
        .post("admin/sources/D2P280762.hdmi-a", body, &[])
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_post_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/channel3/layouts/1"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"video":[]}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let resp = transport(&server)
        .post("admin/channel3/layouts/1", RequestBody::json(r#"{"video":[]}"#), &[])
        .await
        .unwrap();
    assert_eq!(resp.body, "{}");
}

#[tokio::test]
async fn test_redirect_is_followed_and_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/add_channel.cgi"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", "/admin/channel57/mediasources"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/channel57/mediasources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("sources"))
        .mount(&server)
        .await;

    let resp = transport(&server)
        .get("admin/add_channel.cgi", &[], &[])
        .await
        .unwrap();
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "sources");
    assert_eq!(resp.history.len(), 1);
    assert_eq!(resp.history[0].status, 302);
    assert_eq!(
        resp.history[0].location(),
        Some("/admin/channel57/mediasources")
    );
}

#[tokio::test]
async fn test_post_redirect_becomes_get() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/remotesupport.cgi"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/admin/infocfg"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/infocfg"))
        .respond_with(ResponseTemplate::new(200).set_body_string("info"))
        .expect(1)
        .mount(&server)
        .await;

    let resp = transport(&server)
        .post("admin/remotesupport.cgi", RequestBody::form(vec![]), &[])
        .await
        .unwrap();
    assert_eq!(resp.body, "info");
    assert_eq!(resp.history[0].status, 303);
}

#[tokio::test]
async fn test_redirect_without_location_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/add_channel.cgi"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let resp = transport(&server)
        .get("admin/add_channel.cgi", &[], &[])
        .await
        .unwrap();
    assert_eq!(resp.status, 302);
    assert!(resp.history.is_empty());
}

#[tokio::test]
async fn test_redirect_loop_is_cut_off() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .expect(4)
        .mount(&server)
        .await;

    let options = HttpOptions::default().with_max_redirects(3);
    let transport = HttpTransport::with_options(&server.uri(), "u", "p", options).unwrap();
    let err = transport.get("loop", &[], &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Redirect(_)));
}

#[tokio::test]
async fn test_error_status_is_not_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/ajax/rename_channel.cgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let resp = transport(&server)
        .post("admin/ajax/rename_channel.cgi", RequestBody::form(vec![]), &[])
        .await
        .unwrap();
    assert_eq!(resp.status, 500);
    assert_eq!(resp.body, "boom");
}

#[tokio::test]
async fn test_timeout_maps_to_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let options = HttpOptions::default().with_timeout(Duration::from_millis(50));
    let transport = HttpTransport::with_options(&server.uri(), "u", "p", options).unwrap();
    let err = transport.get("slow", &[], &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Timeout(_)));
}

#[tokio::test]
async fn test_refused_connection_maps_to_connect() {
    let transport = HttpTransport::new("http://127.0.0.1:1", "u", "p").unwrap();
    let err = transport.get("admin/mhcfg", &[], &[]).await.unwrap_err();
    assert!(matches!(err, TransportError::Connect(_)));
}
