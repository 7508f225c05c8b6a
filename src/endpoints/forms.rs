//! Generic access to any settings form, for pages without a dedicated
//! operation.

use epipearl_protocols::{ExpectedConfig, FormParams, FormValue, Result, ScrapedForm};
use epipearl_scrape::CheckSpec;

use crate::client::Epipearl;
use crate::webui::{self, VerifySource};

impl Epipearl {
    /// Scrape the single `form_name` form served at `path`.
    pub async fn fetch_form(&self, path: &str, form_name: &str) -> Result<ScrapedForm> {
        let result = webui::fetch_form(&self.submitter(), path, form_name).await;
        self.report("fetch_form", result)
    }

    /// Post `params` to `path` and return the form the device answers with,
    /// unverified.
    pub async fn submit_form(
        &self,
        path: &str,
        form_name: &str,
        params: FormParams,
    ) -> Result<ScrapedForm> {
        let result = webui::submit_form(&self.submitter(), path, form_name, params).await;
        self.report("submit_form", result)
    }

    pub async fn configure_with_checks(
        &self,
        path: &str,
        params: FormParams,
        checks: &[CheckSpec],
    ) -> Result<()> {
        let result = webui::configure_with_checks(&self.submitter(), path, params, checks).await;
        self.report("configure_with_checks", result)
    }

    /// Overlay `overrides` on the current `form_name` form at `path`, post
    /// it, and diff-verify every field.
    pub async fn update_form<I, K>(
        &self,
        path: &str,
        form_name: &str,
        overrides: I,
        source: VerifySource,
    ) -> Result<ScrapedForm>
    where
        I: IntoIterator<Item = (K, FormValue)>,
        K: Into<String>,
    {
        let result = async {
            let submitter = self.submitter();
            let current = webui::fetch_form(&submitter, path, form_name).await?;
            let expected = ExpectedConfig::merged(&current, overrides);
            webui::configure_with_expected(&submitter, path, form_name, &expected, source).await
        }
        .await;
        self.report("update_form", result)
    }
}
