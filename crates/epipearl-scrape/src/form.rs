//! Form scraper.
//!
//! Predicts what a browser would transmit for a form: unnamed controls are
//! never submitted, radio inputs sharing a name collapse into one field,
//! unchecked checkboxes read as `false`, and every `<select>` yields a list
//! of its selected options. Buttons, valueless inputs and password inputs
//! are recorded as such on the snapshot.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use epipearl_protocols::{FormValue, ScrapedForm, ScrapedFormBuilder};

use crate::error::ScrapeError;

/// Reported for value-bearing inputs that have no `value` attribute.
pub const UNKNOWN_VALUE: &str = "unknown";

const VALUE_INPUT_TYPES: &[&str] = &[
    "hidden",
    "text",
    "password",
    "search",
    "email",
    "number",
    "url",
    "tel",
    "date",
    "time",
    "datetime-local",
    "month",
    "week",
    "color",
    "range",
    "submit",
    "button",
    "reset",
];

/// Only sent by a browser when used to submit the form.
const BUTTON_INPUT_TYPES: &[&str] = &["submit", "button", "reset", "image"];

/// Scrape every named control inside `scope` (a `<form>` or any other
/// element). With `field_names`, only those fields are kept.
pub fn scrape(scope: ElementRef<'_>, field_names: Option<&[&str]>) -> ScrapedForm {
    let mut builder = ScrapedForm::builder();

    for control in controls(scope) {
        let Some(name) = control_name(control) else {
            continue;
        };
        if field_names.is_some_and(|wanted| !wanted.contains(&name)) {
            continue;
        }
        if builder.contains(name) {
            // radio group already resolved, or a duplicate name
            continue;
        }

        match control.value().name() {
            "input" => {
                if let Some(value) = scrape_input(control, name, scope) {
                    builder.insert(name, value);
                    mark_input(&mut builder, control, name);
                }
            }
            "select" => {
                builder.insert(name, scrape_select(control));
                if control.value().attr("multiple").is_some() {
                    builder.mark_multi_select(name);
                }
            }
            "textarea" => {
                builder.insert(name, FormValue::Text(control.text().collect()));
            }
            _ => {}
        }
    }

    builder.build()
}

/// Scrape a whole HTML document as one form scope.
pub fn scrape_html(html: &str, field_names: Option<&[&str]>) -> ScrapedForm {
    let document = Html::parse_document(html);
    scrape(document.root_element(), field_names)
}

/// All `<form>` elements whose `name` attribute equals `form_name`.
pub fn find_named_forms<'a>(document: &'a Html, form_name: &str) -> Vec<ElementRef<'a>> {
    elements(document.root_element())
        .filter(|el| el.value().name() == "form" && el.value().attr("name") == Some(form_name))
        .collect()
}

/// Scrape the single form named `form_name` in `html`.
///
/// Fails when the document holds zero or several such forms, since either
/// means the page is not the one we think it is.
pub fn scrape_named_form(
    html: &str,
    form_name: &str,
    field_names: Option<&[&str]>,
) -> Result<ScrapedForm, ScrapeError> {
    let document = Html::parse_document(html);
    match find_named_forms(&document, form_name).as_slice() {
        [form] => Ok(scrape(*form, field_names)),
        forms => Err(ScrapeError::FormCount {
            name: form_name.to_string(),
            count: forms.len(),
        }),
    }
}

pub(crate) fn elements<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    scope.descendants().filter_map(ElementRef::wrap)
}

fn controls<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    elements(scope).filter(|el| matches!(el.value().name(), "input" | "select" | "textarea"))
}

fn control_name<'a>(control: ElementRef<'a>) -> Option<&'a str> {
    let name = control.value().attr("name");
    if name.is_none() {
        warn!(
            "ignoring form <{}> - missing name: {}",
            control.value().name(),
            control.html()
        );
    }
    name
}

fn scrape_input(input: ElementRef<'_>, name: &str, scope: ElementRef<'_>) -> Option<FormValue> {
    let Some(kind) = input.value().attr("type") else {
        warn!("failed to process form <input> - missing type: {}", input.html());
        return None;
    };
    let kind = kind.to_ascii_lowercase();

    if VALUE_INPUT_TYPES.contains(&kind.as_str()) {
        let value = input.value().attr("value").unwrap_or(UNKNOWN_VALUE);
        return Some(FormValue::text(value));
    }

    match kind.as_str() {
        "checkbox" => Some(FormValue::Bool(input.value().attr("checked").is_some())),
        "radio" => Some(radio_group_value(scope, name)),
        other => {
            debug!("input ({}) has unhandled type ({}), recording as absent", name, other);
            Some(FormValue::Absent)
        }
    }
}

fn mark_input(builder: &mut ScrapedFormBuilder, input: ElementRef<'_>, name: &str) {
    let input = input.value();
    let kind = input.attr("type").unwrap_or_default().to_ascii_lowercase();
    if BUTTON_INPUT_TYPES.contains(&kind.as_str()) {
        builder.mark_unsubmitted(name);
    }
    if VALUE_INPUT_TYPES.contains(&kind.as_str()) && input.attr("value").is_none() {
        builder.mark_valueless(name);
    }
    if kind == "password" {
        builder.mark_sensitive(name);
    }
}

fn radio_group_value(scope: ElementRef<'_>, name: &str) -> FormValue {
    let checked = controls(scope).find(|el| {
        let el = el.value();
        el.name() == "input"
            && el.attr("type").is_some_and(|t| t.eq_ignore_ascii_case("radio"))
            && el.attr("name") == Some(name)
            && el.attr("checked").is_some()
    });

    match checked {
        Some(radio) => match radio.value().attr("value") {
            Some(value) => FormValue::text(value),
            None => FormValue::Text(radio.text().collect()),
        },
        None => FormValue::Absent,
    }
}

fn scrape_select(select: ElementRef<'_>) -> FormValue {
    let selected = elements(select)
        .filter(|el| el.value().name() == "option" && el.value().attr("selected").is_some())
        .map(|opt| opt.value().attr("value").map(str::to_string))
        .collect();
    FormValue::List(selected)
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
