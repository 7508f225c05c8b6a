//! # Epipearl HTTP
//!
//! [`HttpTransport`] is the production [`Transport`](epipearl_protocols::Transport):
//! it resolves paths against the device base URL, authenticates with HTTP
//! Basic, sends the default header set, and follows redirects itself so the
//! hops stay visible in [`HttpResponse::history`](epipearl_protocols::HttpResponse).

mod transport;

pub use transport::{
    DEFAULT_ACCEPT, DEFAULT_ACCEPT_ENCODING, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, HttpOptions, HttpTransport,
};
