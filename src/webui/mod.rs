//! The submit/verify engine over the device web UI.
//!
//! [`Submitter`] performs one round trip and classifies it, [`verify`]
//! layers checklist or expected-value verification on top, and
//! [`decode_creation_redirect`] handles endpoints that answer with a
//! redirect instead of a page.

mod redirect;
mod submit;
pub mod verify;

pub use redirect::decode_creation_redirect;
pub use submit::{BannerPolicy, FORM_CONTENT_TYPE, Submitter};
pub use verify::{
    VerifySource, configure_with_checks, configure_with_expected, fetch_form, scrape_form,
    submit_form,
};
