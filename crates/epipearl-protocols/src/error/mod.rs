//! Error types surfaced by epipearl operations.

mod epipearl;
mod transport;

pub use epipearl::*;
pub use transport::*;
