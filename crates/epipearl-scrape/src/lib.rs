//! # Epipearl Scrape
//!
//! Turns device web UI pages into structured data and checks them against
//! what the caller meant to configure:
//!
//! - [`form`] extracts name to value mappings from HTML forms the way a
//!   browser would submit them
//! - [`banner`] finds the inline warning/error banners the firmware renders
//! - [`checks`] holds named predicates for checklist-style verification
//! - [`verify`] diffs expected values against freshly scraped ones

pub mod banner;
pub mod checks;
mod error;
pub mod form;
pub mod verify;

pub use banner::{BannerMarkers, detect_banners, detect_banners_with};
pub use checks::{CheckSpec, Predicate, run_checklist};
pub use error::ScrapeError;
pub use form::{find_named_forms, scrape, scrape_html, scrape_named_form};
pub use verify::{VerificationResult, diff};
