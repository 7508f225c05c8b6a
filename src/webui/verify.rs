//! Submit-then-verify flows.

use epipearl_protocols::{EpipearlError, ExpectedConfig, FormParams, Result, ScrapedForm};
use epipearl_scrape::{CheckSpec, diff, run_checklist, scrape_named_form};

use super::submit::Submitter;

/// Where the de-facto values for an expected-value diff come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerifySource {
    /// The page the device answered the POST with.
    #[default]
    Response,
    /// A fresh GET of the same path after the POST.
    Refetch,
}

/// Scrape the single form named `form_name` out of a page fetched from
/// `path`, keeping only `field_names` when given. Zero or several such forms
/// mean we are not looking at the page we expected.
pub fn scrape_form(
    path: &str,
    html: &str,
    form_name: &str,
    field_names: Option<&[&str]>,
) -> Result<ScrapedForm> {
    scrape_named_form(html, form_name, field_names)
        .map_err(|e| EpipearlError::indiscernible(path, format!("ambiguous form count - {e}")))
}

/// GET `path` and scrape its single `form_name` form.
pub async fn fetch_form(submitter: &Submitter<'_>, path: &str, form_name: &str) -> Result<ScrapedForm> {
    let response = submitter.fetch(path).await?;
    scrape_form(path, &response.body, form_name, None)
}

/// POST `params` to `path` and scrape the `form_name` form the device
/// answers with.
pub async fn submit_form(
    submitter: &Submitter<'_>,
    path: &str,
    form_name: &str,
    params: FormParams,
) -> Result<ScrapedForm> {
    let response = submitter.submit(path, params).await?;
    scrape_form(path, &response.body, form_name, None)
}

/// Submit `params` and require every check to hold on the response page.
pub async fn configure_with_checks(
    submitter: &Submitter<'_>,
    path: &str,
    params: FormParams,
    checks: &[CheckSpec],
) -> Result<()> {
    let response = submitter.submit(path, params).await?;
    run_checklist(&response.body, checks).into_result(path)
}

/// Submit `expected` as a browser would and diff the de-facto form against
/// it, reporting every field that did not take.
pub async fn configure_with_expected(
    submitter: &Submitter<'_>,
    path: &str,
    form_name: &str,
    expected: &ExpectedConfig,
    source: VerifySource,
) -> Result<ScrapedForm> {
    let response = submitter.submit(path, expected.to_form_params()).await?;
    let html = match source {
        VerifySource::Response => response.body,
        VerifySource::Refetch => submitter.fetch(path).await?.body,
    };

    let actual = scrape_form(path, &html, form_name, None)?;
    diff(expected, &actual).into_result(path)?;
    Ok(actual)
}
