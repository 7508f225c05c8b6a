//! Device operations, grouped the way the web UI groups them.
//!
//! Each submodule adds methods to [`Epipearl`](crate::Epipearl).

mod admin;
mod channel;
mod config;
mod forms;
mod mhpearl;

pub use channel::{CHANNEL_ID_PATTERN, RtmpSettings};
pub use mhpearl::{MHPEARL_FIELDS, MHPEARL_FORM, MhPearlSettings};
