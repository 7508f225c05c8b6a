//! Scraped form values and the maps built from them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transport::FormParams;

/// Value a checked checkbox transmits when the form is submitted.
pub const CHECKBOX_ON: &str = "on";

/// The scraped value of one named form control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Nothing would be submitted for this control (e.g. a radio group with
    /// no checked member).
    Absent,
    /// Checkbox state.
    Bool(bool),
    /// Text-like input, radio choice or textarea content.
    Text(String),
    /// Selected options of a `<select>`, in document order. `None` stands
    /// for an option without a `value` attribute.
    List(Vec<Option<String>>),
}

impl FormValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a list value where every entry carries a value.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(|v| Some(v.into())).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Option<String>]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// What a control that was never scraped amounts to when compared
    /// against `self`: unchecked for checkboxes, empty for lists and text.
    pub fn missing_counterpart(&self) -> FormValue {
        match self {
            Self::Bool(_) => Self::Bool(false),
            Self::List(_) => Self::List(Vec::new()),
            Self::Text(_) => Self::Text(String::new()),
            Self::Absent => Self::Absent,
        }
    }

    /// Append the pairs a browser would transmit for this control.
    pub fn append_params(&self, name: &str, params: &mut FormParams) {
        match self {
            Self::Absent | Self::Bool(false) => {}
            Self::Bool(true) => params.push((name.to_string(), CHECKBOX_ON.to_string())),
            Self::Text(value) => params.push((name.to_string(), value.clone())),
            Self::List(values) => {
                for value in values.iter().flatten() {
                    params.push((name.to_string(), value.clone()));
                }
            }
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("None"),
            Self::Bool(true) => f.write_str("ON"),
            Self::Bool(false) => f.write_str("OFF"),
            Self::Text(s) => f.write_str(s),
            Self::List(values) => {
                let rendered: Vec<&str> = values
                    .iter()
                    .map(|v| v.as_deref().unwrap_or("None"))
                    .collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Field name to value mapping scraped from one HTML snapshot.
///
/// Built once through [`ScrapedFormBuilder`] and read-only afterwards.
/// Besides the values it remembers how each control takes part in a
/// submission, so a snapshot can be re-posted the way a browser would.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrapedForm {
    fields: BTreeMap<String, FormValue>,
    #[serde(skip)]
    multi_selects: BTreeSet<String>,
    #[serde(skip)]
    valueless: BTreeSet<String>,
    #[serde(skip)]
    unsubmitted: BTreeSet<String>,
    #[serde(skip)]
    sensitive: BTreeSet<String>,
}

impl ScrapedForm {
    pub fn builder() -> ScrapedFormBuilder {
        ScrapedFormBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Whether the field came from a `<select multiple>`.
    pub fn is_multi_select(&self, name: &str) -> bool {
        self.multi_selects.contains(name)
    }

    /// Whether the control had no `value` attribute. Its scraped value is a
    /// placeholder; a browser would send an empty string.
    pub fn is_valueless(&self, name: &str) -> bool {
        self.valueless.contains(name)
    }

    /// Whether the control is a button, only sent when it is the one clicked.
    pub fn is_unsubmitted(&self, name: &str) -> bool {
        self.unsubmitted.contains(name)
    }

    /// Whether the value must never appear in diagnostics.
    pub fn is_sensitive(&self, name: &str) -> bool {
        self.sensitive.contains(name)
    }

    /// The value a browser would transmit for `name`, as opposed to the
    /// scraped view: valueless inputs read as empty text.
    pub fn submitted_value(&self, name: &str) -> Option<FormValue> {
        let value = self.fields.get(name)?;
        if self.is_valueless(name) {
            Some(FormValue::Text(String::new()))
        } else {
            Some(value.clone())
        }
    }
}

/// Accumulates fields for a [`ScrapedForm`] with first-seen-wins semantics.
#[derive(Debug, Default)]
pub struct ScrapedFormBuilder {
    fields: BTreeMap<String, FormValue>,
    multi_selects: BTreeSet<String>,
    valueless: BTreeSet<String>,
    unsubmitted: BTreeSet<String>,
    sensitive: BTreeSet<String>,
}

impl ScrapedFormBuilder {
    /// Insert `value` unless `name` is already present. Returns whether the
    /// value was stored.
    pub fn insert(&mut self, name: impl Into<String>, value: FormValue) -> bool {
        let name = name.into();
        if self.fields.contains_key(&name) {
            return false;
        }
        self.fields.insert(name, value);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn mark_multi_select(&mut self, name: impl Into<String>) {
        self.multi_selects.insert(name.into());
    }

    pub fn mark_valueless(&mut self, name: impl Into<String>) {
        self.valueless.insert(name.into());
    }

    pub fn mark_unsubmitted(&mut self, name: impl Into<String>) {
        self.unsubmitted.insert(name.into());
    }

    pub fn mark_sensitive(&mut self, name: impl Into<String>) {
        self.sensitive.insert(name.into());
    }

    /// Chaining form of [`insert`](Self::insert), handy for fixtures.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn build(self) -> ScrapedForm {
        ScrapedForm {
            fields: self.fields,
            multi_selects: self.multi_selects,
            valueless: self.valueless,
            unsubmitted: self.unsubmitted,
            sensitive: self.sensitive,
        }
    }
}

/// Expected field values for a verification pass.
///
/// Usually built by taking a fresh snapshot of the device form and layering
/// the caller's overrides on top; consuming builder methods keep every
/// instance immutable once handed to the verifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpectedConfig {
    fields: BTreeMap<String, FormValue>,
    #[serde(skip)]
    multi_selects: BTreeSet<String>,
    #[serde(skip)]
    sensitive: BTreeSet<String>,
}

impl ExpectedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from what a browser would submit for the current form:
    /// buttons are left out and valueless inputs become empty text.
    pub fn from_snapshot(current: &ScrapedForm) -> Self {
        Self {
            fields: current
                .names()
                .filter(|name| !current.is_unsubmitted(name))
                .filter_map(|name| Some((name.to_string(), current.submitted_value(name)?)))
                .collect(),
            multi_selects: current.multi_selects.clone(),
            sensitive: current.sensitive.clone(),
        }
    }

    /// Snapshot plus overrides; an override replaces the scraped value.
    pub fn merged<I, K>(current: &ScrapedForm, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, FormValue)>,
        K: Into<String>,
    {
        overrides
            .into_iter()
            .fold(Self::from_snapshot(current), |acc, (k, v)| acc.with(k, v))
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Mark `name` as a multi-select so list comparison ignores order.
    pub fn with_multi_select(mut self, name: impl Into<String>) -> Self {
        self.multi_selects.insert(name.into());
        self
    }

    /// Keep the value of `name` out of mismatch reports.
    pub fn with_sensitive(mut self, name: impl Into<String>) -> Self {
        self.sensitive.insert(name.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_multi_select(&self, name: &str) -> bool {
        self.multi_selects.contains(name)
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.sensitive.contains(name)
    }

    /// The url-encoded pairs a browser would post for these values.
    pub fn to_form_params(&self) -> FormParams {
        let mut params = FormParams::new();
        for (name, value) in &self.fields {
            value.append_params(name, &mut params);
        }
        params
    }
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
