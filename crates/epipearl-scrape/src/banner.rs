//! Error/banner detector.
//!
//! The firmware reports rejected settings inline, as banner blocks inside
//! the same page it returns with status 200. Detection is total: a banner
//! that cannot be read becomes a synthetic `html_parsing_error` entry
//! instead of aborting the pass.

use scraper::{ElementRef, Html, Selector};
use tracing::error;

use epipearl_protocols::types::{UNKNOWN_CODE, UNKNOWN_MESSAGE};
use epipearl_protocols::{BannerCategory, BannerMessage};

/// CSS class markers identifying banner markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMarkers {
    pub warning_container: String,
    pub error_container: String,
    pub banner: String,
}

impl Default for BannerMarkers {
    fn default() -> Self {
        Self {
            warning_container: "wui-message-warning".to_string(),
            error_container: "wui-message-error".to_string(),
            banner: "wui-message-banner-inner".to_string(),
        }
    }
}

/// Detect banners using the stock firmware markers.
pub fn detect_banners(html: &str) -> Vec<BannerMessage> {
    detect_banners_with(html, &BannerMarkers::default())
}

/// Detect banners in `html`: warnings first, then errors.
///
/// Only the first container of each category is inspected; every banner
/// nested in it yields one message.
pub fn detect_banners_with(html: &str, markers: &BannerMarkers) -> Vec<BannerMessage> {
    let document = Html::parse_document(html);
    let mut found = scan_container(
        &document,
        &markers.warning_container,
        &markers.banner,
        BannerCategory::Warning,
    );
    found.extend(scan_container(
        &document,
        &markers.error_container,
        &markers.banner,
        BannerCategory::Error,
    ));
    found
}

fn scan_container(
    document: &Html,
    container_class: &str,
    banner_class: &str,
    category: BannerCategory,
) -> Vec<BannerMessage> {
    let selectors = class_selector("div", container_class)
        .and_then(|container| Ok((container, class_selector("div", banner_class)?)));
    let (container, banner) = match selectors {
        Ok(pair) => pair,
        Err(msg) => return vec![parsing_failure(msg)],
    };

    let Some(first) = document.select(&container).next() else {
        return Vec::new();
    };
    first
        .select(&banner)
        .map(|inner| match read_banner(inner, category) {
            Ok(message) => message,
            Err(msg) => parsing_failure(msg),
        })
        .collect()
}

fn read_banner(inner: ElementRef<'_>, category: BannerCategory) -> Result<BannerMessage, String> {
    let mut pieces = inner
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty());
    let message = pieces.next().unwrap_or(UNKNOWN_MESSAGE);
    let code = pieces.next().unwrap_or(UNKNOWN_CODE);
    if message.contains('\u{fffd}') {
        return Err(format!("undecodable banner text: {}", inner.html()));
    }
    Ok(BannerMessage::new(category, message, code))
}

fn class_selector(tag: &str, class: &str) -> Result<Selector, String> {
    let css = format!("{tag}.{class}");
    Selector::parse(&css).map_err(|e| format!("invalid banner selector ({css}): {e}"))
}

fn parsing_failure(detail: String) -> BannerMessage {
    let msg = format!("could not scrape epiphan webui response: {detail}");
    error!("{}", msg);
    BannerMessage::parsing_error(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use epipearl_protocols::types::HTML_PARSING_ERROR_CODE;

    const BANNERS_PAGE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../testdata/banners.html"
    ));
    const INVALID_TZ_PAGE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../testdata/timesynccfg_invalid_tz.html"
    ));

    #[test]
    fn test_no_banners() {
        assert!(detect_banners("<html><body><p>fine</p></body></html>").is_empty());
        assert!(detect_banners("").is_empty());
    }

    #[test]
    fn test_warnings_then_errors() {
        let banners = detect_banners(BANNERS_PAGE);
        assert_eq!(
            banners,
            vec![
                BannerMessage::warning("Source has no signal", "W-101"),
                BannerMessage::warning("Disk almost full", UNKNOWN_CODE),
                BannerMessage::error("Invalid server address", "E-7"),
                BannerMessage::error(UNKNOWN_MESSAGE, UNKNOWN_CODE),
            ]
        );
    }

    #[test]
    fn test_only_first_container_is_read() {
        let banners = detect_banners(BANNERS_PAGE);
        assert!(banners.iter().all(|b| b.message != "Ignored second container"));
    }

    #[test]
    fn test_error_banner_on_settings_page() {
        let banners = detect_banners(INVALID_TZ_PAGE);
        assert_eq!(banners.len(), 1);
        assert!(banners[0].is_error());
        assert_eq!(banners[0].message, "Unsupported time zone");
        assert_eq!(banners[0].code, "Error code: 5");
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = r#"<div class="wui-message-error"><div class="wui-message-banner-inner">
            <b>Broken <i>markup</b> here</div>"#;
        let banners = detect_banners(html);
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].category, BannerCategory::Error);
        assert_eq!(banners[0].message, "Broken");
    }

    #[test]
    fn test_invalid_marker_yields_synthetic_banner() {
        let markers = BannerMarkers {
            warning_container: "bad[".to_string(),
            ..BannerMarkers::default()
        };
        let banners = detect_banners_with(INVALID_TZ_PAGE, &markers);
        assert_eq!(banners.len(), 2);
        assert_eq!(banners[0].code, HTML_PARSING_ERROR_CODE);
        assert!(banners[0].is_error());
        assert_eq!(banners[1].message, "Unsupported time zone");
    }

    #[test]
    fn test_custom_markers() {
        let html = r#"<div class="alert-warn"><div class="alert-body">Low disk<br>D1</div></div>"#;
        let markers = BannerMarkers {
            warning_container: "alert-warn".to_string(),
            error_container: "alert-err".to_string(),
            banner: "alert-body".to_string(),
        };
        assert_eq!(
            detect_banners_with(html, &markers),
            vec![BannerMessage::warning("Low disk", "D1")]
        );
    }
}
