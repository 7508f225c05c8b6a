use super::*;

#[test]
fn test_form_value_display() {
    assert_eq!(FormValue::Absent.to_string(), "None");
    assert_eq!(FormValue::Bool(true).to_string(), "ON");
    assert_eq!(FormValue::Bool(false).to_string(), "OFF");
    assert_eq!(FormValue::text("US/Alaska").to_string(), "US/Alaska");
    assert_eq!(
        FormValue::List(vec![Some("a".to_string()), None]).to_string(),
        "[a, None]"
    );
}

#[test]
fn test_form_value_list_helper() {
    let value = FormValue::list(["NTP"]);
    assert_eq!(value.as_list(), Some(&[Some("NTP".to_string())][..]));
}

#[test]
fn test_missing_counterpart() {
    assert_eq!(FormValue::Bool(true).missing_counterpart(), FormValue::Bool(false));
    assert_eq!(FormValue::list(["x"]).missing_counterpart(), FormValue::List(vec![]));
    assert_eq!(FormValue::text("x").missing_counterpart(), FormValue::text(""));
    assert_eq!(FormValue::Absent.missing_counterpart(), FormValue::Absent);
}

#[test]
fn test_append_params_follows_browser_submission() {
    let mut params = FormParams::new();
    FormValue::Bool(true).append_params("on_box", &mut params);
    FormValue::Bool(false).append_params("off_box", &mut params);
    FormValue::Absent.append_params("radio", &mut params);
    FormValue::text("v").append_params("text", &mut params);
    FormValue::List(vec![Some("a".into()), None, Some("b".into())])
        .append_params("multi", &mut params);

    assert_eq!(
        params,
        vec![
            ("on_box".to_string(), "on".to_string()),
            ("text".to_string(), "v".to_string()),
            ("multi".to_string(), "a".to_string()),
            ("multi".to_string(), "b".to_string()),
        ]
    );
}

#[test]
fn test_form_value_serde_untagged() {
    let json = serde_json::to_string(&FormValue::list(["a"])).unwrap();
    assert_eq!(json, r#"["a"]"#);
    let back: FormValue = serde_json::from_str("true").unwrap();
    assert_eq!(back, FormValue::Bool(true));
    let absent: FormValue = serde_json::from_str("null").unwrap();
    assert_eq!(absent, FormValue::Absent);
}

#[test]
fn test_builder_first_seen_wins() {
    let mut builder = ScrapedForm::builder();
    assert!(builder.insert("name", FormValue::text("first")));
    assert!(!builder.insert("name", FormValue::text("second")));
    let form = builder.build();
    assert_eq!(form.get("name"), Some(&FormValue::text("first")));
    assert_eq!(form.len(), 1);
}

#[test]
fn test_scraped_form_multi_select_flag() {
    let mut builder = ScrapedForm::builder().field("fruits", FormValue::list(["a", "b"]));
    builder.mark_multi_select("fruits");
    let form = builder.build();
    assert!(form.is_multi_select("fruits"));
    assert!(!form.is_multi_select("other"));
}

#[test]
fn test_expected_config_merge_overrides_snapshot() {
    let current = ScrapedForm::builder()
        .field("DEVICE_NAME", "lab-2")
        .field("BACKUP_AGENT", false)
        .field("MAX_INGEST", "1")
        .build();

    let expected = ExpectedConfig::merged(
        &current,
        [
            ("DEVICE_NAME", FormValue::text("room-1")),
            ("BACKUP_AGENT", FormValue::Bool(true)),
        ],
    );

    assert_eq!(expected.get("DEVICE_NAME"), Some(&FormValue::text("room-1")));
    assert_eq!(expected.get("BACKUP_AGENT"), Some(&FormValue::Bool(true)));
    assert_eq!(expected.get("MAX_INGEST"), Some(&FormValue::text("1")));
    // the snapshot itself is untouched
    assert_eq!(current.get("DEVICE_NAME"), Some(&FormValue::text("lab-2")));
}

#[test]
fn test_expected_config_form_params() {
    let expected = ExpectedConfig::new()
        .with("b", true)
        .with("a", "1")
        .with("c", false);
    assert_eq!(
        expected.to_form_params(),
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "on".to_string()),
        ]
    );
}

#[test]
fn test_expected_config_keeps_multi_select_marks() {
    let mut builder = ScrapedForm::builder().field("tags", FormValue::list(["x"]));
    builder.mark_multi_select("tags");
    let expected = ExpectedConfig::from_snapshot(&builder.build());
    assert!(expected.is_multi_select("tags"));
}

#[test]
fn test_snapshot_reposts_like_a_browser() {
    let mut builder = ScrapedForm::builder()
        .field("note", "unknown")
        .field("secret", "unknown")
        .field("contact", "ops@example.edu")
        .field("factory_reset", "Reset")
        .field("flag", false);
    builder.mark_valueless("note");
    builder.mark_valueless("secret");
    builder.mark_sensitive("secret");
    builder.mark_unsubmitted("factory_reset");
    let current = builder.build();

    // the scraped view keeps the placeholder
    assert_eq!(current.get("note"), Some(&FormValue::text("unknown")));
    assert_eq!(current.submitted_value("note"), Some(FormValue::text("")));

    let expected = ExpectedConfig::merged(&current, [("flag", FormValue::Bool(true))]);
    assert!(expected.get("factory_reset").is_none());
    assert!(expected.is_sensitive("secret"));
    assert_eq!(
        expected.to_form_params(),
        vec![
            ("contact".to_string(), "ops@example.edu".to_string()),
            ("flag".to_string(), "on".to_string()),
            ("note".to_string(), String::new()),
            ("secret".to_string(), String::new()),
        ]
    );
}

#[test]
fn test_override_can_post_a_button() {
    let mut builder = ScrapedForm::builder().field("apply", "Apply");
    builder.mark_unsubmitted("apply");
    let expected = ExpectedConfig::merged(&builder.build(), [("apply", FormValue::text("Apply"))]);
    assert_eq!(
        expected.to_form_params(),
        vec![("apply".to_string(), "Apply".to_string())]
    );
}

#[test]
fn test_with_sensitive_marks_field() {
    let expected = ExpectedConfig::new()
        .with("DEVICE_PASSWORD", "cash")
        .with_sensitive("DEVICE_PASSWORD");
    assert!(expected.is_sensitive("DEVICE_PASSWORD"));
    assert!(!expected.is_sensitive("DEVICE_USERNAME"));
}
