//! Sanity checks on a loaded [`ClientConfig`] before any device is contacted.

use url::Url;

use crate::error::ConfigError;
use crate::schema::ClientConfig;

/// Problems found in one configuration. Errors make it unusable; warnings
/// are worth surfacing but do not stop the client.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn caution(&mut self, field: &str, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Fail on the first error; otherwise hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(ValidationError { field, message }) => {
                Err(ConfigError::InvalidValue { field, message })
            }
            None => Ok(self.warnings),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted key, e.g. `device.url`.
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &ClientConfig) -> ValidationResult {
        let mut result = ValidationResult::default();
        let device = &config.device;

        match Url::parse(&device.url) {
            Ok(url) if url.scheme() == "https" => {}
            Ok(url) if url.scheme() == "http" => {
                if !device.password.is_empty() {
                    result.caution("device.url", "Basic auth credentials will be sent over plain http");
                }
            }
            Ok(_) => result.reject("device.url", "url must start with http:// or https://"),
            Err(e) => result.reject("device.url", format!("invalid url ({}): {}", device.url, e)),
        }
        if device.user.is_empty() {
            result.reject("device.user", "user cannot be empty");
        }
        if device.timeout_seconds == 0 {
            result.reject("device.timeout_seconds", "a zero timeout would fail every request");
        }
        if device.max_redirects == 0 {
            result.caution(
                "device.max_redirects",
                "redirects disabled, channel creation cannot succeed",
            );
        }

        if config.logging.level.trim().is_empty() {
            result.caution("logging.level", "empty log level, falling back to info");
        }
        result
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
