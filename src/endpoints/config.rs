//! Device-wide settings pages.

use epipearl_protocols::{FormParams, Result};
use epipearl_scrape::{CheckSpec, Predicate};

use crate::client::Epipearl;
use crate::webui::configure_with_checks;

const REMOTE_SUPPORT_SERVER: &str = "epiphany.epiphan.com";
const REMOTE_SUPPORT_PORT: &str = "30";

fn params(pairs: &[(&str, &str)]) -> FormParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn ntp_checks(server: &str, timezone: &str) -> Vec<CheckSpec> {
    vec![
        CheckSpec::new(
            format!("timezone setting expected({timezone})"),
            Predicate::selected_value(timezone),
        ),
        CheckSpec::new("protocol setting expected(NTP)", Predicate::selected_value("NTP")),
        CheckSpec::new("expected to enable sync(auto)", Predicate::id_checked("rdate_auto")),
        CheckSpec::new(
            format!("expected ntp server({server})"),
            Predicate::id_value("server", server),
        ),
    ]
}

fn touchscreen_checks(screen_timeout: u32) -> Vec<CheckSpec> {
    vec![
        CheckSpec::new("epiScreenEnable ON expected", Predicate::id_checked("epiScreenEnable")),
        CheckSpec::new("showPreview ON expected", Predicate::id_checked("showVideo")),
        CheckSpec::new("showSystemStatus ON expected", Predicate::id_checked("showInfo")),
        CheckSpec::new("changeSettings ON expected", Predicate::id_checked("changeSettings")),
        CheckSpec::new("recordControl OFF expected", Predicate::id_unchecked("recordControl")),
        CheckSpec::new(
            format!("epiScreenTimeout expected({screen_timeout})"),
            Predicate::id_value("epiScreenTimeout", screen_timeout.to_string()),
        ),
    ]
}

impl Epipearl {
    /// Sync the clock against `server` over NTP and set the time zone.
    pub async fn set_ntp(&self, server: &str, timezone: &str) -> Result<()> {
        let form = params(&[
            ("server", server),
            ("tz", timezone),
            ("fn", "date"),
            ("rdate", "auto"),
            ("rdate_proto", "NTP"),
            ("rdate_secs", "900"),
            ("ptp_domain", "_DFLT"),
        ]);
        let checks = ntp_checks(server, timezone);
        let result =
            configure_with_checks(&self.submitter(), "admin/timesynccfg", form, &checks).await;
        self.report("set_ntp", result)
    }

    /// Configure the front touchscreen: screen, preview, status and settings
    /// pages on, recording control off.
    pub async fn set_touchscreen(&self, screen_timeout: u32) -> Result<()> {
        let timeout = screen_timeout.to_string();
        let form = params(&[
            ("pdf_form_id", "fn_episcreen"),
            ("epiScreenTimeout", timeout.as_str()),
            ("changeSettings", "on"),
            ("showVideo", "on"),
            ("epiScreenEnable", "on"),
            ("showInfo", "on"),
        ]);
        let checks = touchscreen_checks(screen_timeout);
        let result =
            configure_with_checks(&self.submitter(), "admin/touchscreencfg", form, &checks).await;
        self.report("set_touchscreen", result)
    }

    /// Enable the remote support tunnel, with permanent logs on or off.
    ///
    /// The device answers with a meta refresh rather than the settings form,
    /// so only the banner check applies.
    pub async fn set_remote_support_and_permanent_logs(&self, log_enabled: bool) -> Result<()> {
        let mut form = params(&[
            ("fn", "maint"),
            ("enablessh", "on"),
            ("tunnel", "on"),
            ("tunnelsrv", REMOTE_SUPPORT_SERVER),
            ("tunnelport", REMOTE_SUPPORT_PORT),
        ]);
        if log_enabled {
            form.push(("permanent_logs".to_string(), "on".to_string()));
        }
        let result =
            configure_with_checks(&self.submitter(), "admin/remotesupport.cgi", form, &[]).await;
        self.report("set_remote_support_and_permanent_logs", result)
    }

    /// Turn deinterlacing on or off for one video source.
    pub async fn set_source_deinterlacing(&self, source: &str, enabled: bool) -> Result<()> {
        let path = format!("admin/sources/{source}");
        let mut form = params(&[("pfd_form_id", "vsource")]);
        let check = if enabled {
            form.push(("deinterlacing".to_string(), "on".to_string()));
            CheckSpec::new("deinterlacing expected to be ON", Predicate::id_checked("deinterlacing"))
        } else {
            CheckSpec::new(
                "deinterlacing expected to be OFF",
                Predicate::id_unchecked("deinterlacing"),
            )
        };
        let result = configure_with_checks(&self.submitter(), &path, form, &[check]).await;
        self.report("set_source_deinterlacing", result)
    }
}
