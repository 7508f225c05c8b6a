//! Redirect-result decoder.

use regex::Regex;

use epipearl_protocols::{EpipearlError, HttpResponse, Result};

/// Extract the id of a resource whose creation is acknowledged only by a
/// `302` redirect.
///
/// `response` is the final response after the transport followed the
/// redirect; the first hop's `Location` header must match `pattern` exactly
/// once, and the first capture group of that match is the id.
pub fn decode_creation_redirect(response: &HttpResponse, pattern: &str, path: &str) -> Result<String> {
    if response.status != 200 {
        let message = if response.status == 302 {
            "location header missing for response status 302".to_string()
        } else {
            format!("expect response status 302, but got ({})", response.status)
        };
        return Err(EpipearlError::indiscernible(path, message));
    }

    let Some(hop) = response.history.first() else {
        return Err(EpipearlError::indiscernible(
            path,
            "expect response status 302, but got (200) without redirect",
        ));
    };
    if hop.status != 302 {
        return Err(EpipearlError::indiscernible(
            path,
            format!("expect redirect status 302, but got ({})", hop.status),
        ));
    }
    let Some(location) = hop.location() else {
        return Err(EpipearlError::indiscernible(
            path,
            "missing header location for response status 302",
        ));
    };

    let re = Regex::new(pattern)
        .map_err(|e| EpipearlError::indiscernible(path, format!("invalid id pattern: {e}")))?;
    let ids: Vec<&str> = re
        .captures_iter(location)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str())
        .collect();
    match ids.as_slice() {
        [id] => Ok(id.to_string()),
        _ => Err(EpipearlError::indiscernible(
            path,
            format!("cannot parse id created from location header({location})"),
        )),
    }
}
