//! Data types shared across the scrape engine and the client.

mod banner;
mod form;
mod mismatch;
mod target;

pub use banner::*;
pub use form::*;
pub use mismatch::*;
pub use target::*;
