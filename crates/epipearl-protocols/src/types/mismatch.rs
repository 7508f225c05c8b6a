//! Verification mismatches.

use std::fmt;

use serde::Serialize;

use super::form::FormValue;

/// One failed expectation found while verifying a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// A scraped field did not hold the expected value.
    Field {
        field: String,
        expected: FormValue,
        actual: FormValue,
    },
    /// A field holding a secret did not take; neither value is kept.
    Redacted { field: String },
    /// A checklist predicate found no matching element.
    Check { description: String },
}

impl Mismatch {
    pub fn field(field: impl Into<String>, expected: FormValue, actual: FormValue) -> Self {
        Self::Field {
            field: field.into(),
            expected,
            actual,
        }
    }

    pub fn redacted(field: impl Into<String>) -> Self {
        Self::Redacted {
            field: field.into(),
        }
    }

    pub fn check(description: impl Into<String>) -> Self {
        Self::Check {
            description: description.into(),
        }
    }

    /// Name of the offending field, when there is one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field { field, .. } | Self::Redacted { field } => Some(field),
            Self::Check { .. } => None,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field {
                field,
                expected,
                actual,
            } => write!(f, "{field} expected({expected}), got({actual})"),
            Self::Redacted { field } => write!(f, "{field} not the value expected"),
            Self::Check { description } => f.write_str(description),
        }
    }
}
