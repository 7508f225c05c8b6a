//! Field-level verification of a configuration against a fresh scrape.

use epipearl_protocols::{EpipearlError, ExpectedConfig, FormValue, Mismatch, ScrapedForm};

/// Outcome of a verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Verified,
    /// Every expectation that did not hold, in field-name order.
    Mismatch(Vec<Mismatch>),
}

impl VerificationResult {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Self::Verified => &[],
            Self::Mismatch(m) => m,
        }
    }

    /// Turn a failed verification of the call at `path` into an error.
    pub fn into_result(self, path: &str) -> Result<(), EpipearlError> {
        match self {
            Self::Verified => Ok(()),
            Self::Mismatch(mismatches) => Err(EpipearlError::mismatches(path, mismatches)),
        }
    }
}

impl From<Vec<Mismatch>> for VerificationResult {
    fn from(mismatches: Vec<Mismatch>) -> Self {
        if mismatches.is_empty() {
            Self::Verified
        } else {
            Self::Mismatch(mismatches)
        }
    }
}

/// Compare every expected field against `actual`.
///
/// Fields present only in `actual` are ignored. A field missing from
/// `actual`, or scraped as absent, compares as the empty counterpart of the
/// expected value, so an unchecked checkbox the browser never sends still
/// matches `false`. A valueless input compares as empty text.
///
/// Multi-select lists are compared as multisets: both sides are sorted
/// first, so order is ignored but duplicate options still count.
///
/// Fields marked sensitive on either side are reported without values.
pub fn diff(expected: &ExpectedConfig, actual: &ScrapedForm) -> VerificationResult {
    let mismatches: Vec<Mismatch> = expected
        .iter()
        .filter_map(|(name, want)| {
            let got = actual.submitted_value(name).unwrap_or(FormValue::Absent);
            let unordered = expected.is_multi_select(name) || actual.is_multi_select(name);
            if values_match(want, &got, unordered) {
                None
            } else if expected.is_sensitive(name) || actual.is_sensitive(name) {
                Some(Mismatch::redacted(name))
            } else {
                Some(Mismatch::field(name, want.clone(), got))
            }
        })
        .collect();
    mismatches.into()
}

fn values_match(expected: &FormValue, actual: &FormValue, unordered: bool) -> bool {
    let missing;
    let actual = if actual.is_absent() {
        missing = expected.missing_counterpart();
        &missing
    } else {
        actual
    };

    match (expected, actual) {
        (FormValue::List(want), FormValue::List(got)) if unordered => {
            let mut want = want.clone();
            let mut got = got.clone();
            want.sort();
            got.sort();
            want == got
        }
        _ => expected == actual,
    }
}
