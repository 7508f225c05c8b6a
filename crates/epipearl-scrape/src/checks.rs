//! Checklist-style verification.
//!
//! Each [`CheckSpec`] pairs a human-readable description with a
//! [`Predicate`] over the elements of a response page. A check holds when at
//! least one element satisfies its predicate.

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use epipearl_protocols::Mismatch;

use crate::form::elements;
use crate::verify::VerificationResult;

/// Element predicates, expressed as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Element with this `id` carries `checked`.
    IdChecked { id: String },
    /// Element with this `id` exists and lacks `checked`.
    IdUnchecked { id: String },
    /// Some element carries `selected` and this `value`.
    SelectedValue { value: String },
    /// Within the control group `name`, the option or checkable input with
    /// this `value` is chosen.
    MultiValueContains { name: String, value: String },
    /// Element with this `id` has exactly this `value` attribute.
    IdValue { id: String, value: String },
    /// Element with this `name` has exactly this `value` attribute.
    NameValue { name: String, value: String },
    /// Element with this `id` has exactly this text content.
    IdText { id: String, text: String },
    /// Some element's text content contains `text`.
    TextContains { text: String },
}

impl Predicate {
    pub fn id_checked(id: impl Into<String>) -> Self {
        Self::IdChecked { id: id.into() }
    }

    pub fn id_unchecked(id: impl Into<String>) -> Self {
        Self::IdUnchecked { id: id.into() }
    }

    pub fn selected_value(value: impl Into<String>) -> Self {
        Self::SelectedValue {
            value: value.into(),
        }
    }

    pub fn multi_value_contains(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MultiValueContains {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn id_value(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::IdValue {
            id: id.into(),
            value: value.into(),
        }
    }

    pub fn name_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NameValue {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn id_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::IdText {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn text_contains(text: impl Into<String>) -> Self {
        Self::TextContains { text: text.into() }
    }

    /// Whether `element` on its own satisfies the predicate.
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let el = element.value();
        let has = |attr: &str| el.attr(attr).is_some();
        match self {
            Self::IdChecked { id } => el.id() == Some(id.as_str()) && has("checked"),
            Self::IdUnchecked { id } => el.id() == Some(id.as_str()) && !has("checked"),
            Self::SelectedValue { value } => {
                has("selected") && el.attr("value") == Some(value.as_str())
            }
            Self::MultiValueContains { name, value } => match el.name() {
                "select" => {
                    el.attr("name") == Some(name.as_str())
                        && elements(element).any(|opt| {
                            opt.value().name() == "option"
                                && opt.value().attr("selected").is_some()
                                && opt.value().attr("value") == Some(value.as_str())
                        })
                }
                "input" => {
                    el.attr("name") == Some(name.as_str())
                        && has("checked")
                        && el.attr("value") == Some(value.as_str())
                }
                _ => false,
            },
            Self::IdValue { id, value } => {
                el.id() == Some(id.as_str()) && el.attr("value") == Some(value.as_str())
            }
            Self::NameValue { name, value } => {
                el.attr("name") == Some(name.as_str()) && el.attr("value") == Some(value.as_str())
            }
            Self::IdText { id, text } => {
                el.id() == Some(id.as_str()) && element.text().collect::<String>() == *text
            }
            Self::TextContains { text } => element.text().collect::<String>().contains(text.as_str()),
        }
    }

    /// Whether any element of `document` satisfies the predicate.
    pub fn holds(&self, document: &Html) -> bool {
        elements(document.root_element()).any(|el| self.matches(el))
    }
}

/// A named assertion over a response document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSpec {
    pub description: String,
    pub predicate: Predicate,
}

impl CheckSpec {
    pub fn new(description: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            description: description.into(),
            predicate,
        }
    }

    pub fn holds(&self, document: &Html) -> bool {
        self.predicate.holds(document)
    }
}

/// Evaluate `checks` in order against `html`, stopping at the first that
/// fails.
pub fn run_checklist(html: &str, checks: &[CheckSpec]) -> VerificationResult {
    let document = Html::parse_document(html);
    match checks.iter().find(|check| !check.holds(&document)) {
        Some(failed) => VerificationResult::Mismatch(vec![Mismatch::check(&failed.description)]),
        None => VerificationResult::Verified,
    }
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
