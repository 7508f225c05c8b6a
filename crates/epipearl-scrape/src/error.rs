//! Scrape errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("zero or more than one form named ({name}) returned: found {count}")]
    FormCount { name: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_count_error() {
        let err = ScrapeError::FormCount {
            name: "mhcfg".to_string(),
            count: 2,
        };
        let display = err.to_string();
        assert!(display.contains("mhcfg"));
        assert!(display.contains("found 2"));
    }
}
