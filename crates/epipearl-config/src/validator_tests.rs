    use super::*;
    use crate::schema::DeviceConfig;

    fn config(url: &str, user: &str, password: &str) -> ClientConfig {
        ClientConfig {
            device: DeviceConfig::new(url, user, password),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_good_config() {
        let result = ConfigValidator::validate(&config("https://pearl.example.edu", "admin", "x"));
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_default_config_is_invalid() {
        let result = ConfigValidator::validate(&ClientConfig::default());
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "device.url"));
        assert!(result.errors.iter().any(|e| e.field == "device.user"));
    }

    #[test]
    fn test_validate_non_http_scheme() {
        let result = ConfigValidator::validate(&config("ftp://pearl.example.edu", "admin", ""));
        assert!(!result.is_valid());
        assert!(result.errors[0].message.contains("http://"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = config("https://pearl.example.edu", "admin", "x");
        config.device.timeout_seconds = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.errors.iter().any(|e| e.field == "device.timeout_seconds"));
    }

    #[test]
    fn test_plain_http_with_password_warns() {
        let result = ConfigValidator::validate(&config("http://fake.example.edu", "johnny", "cash"));
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "device.url"));
    }

    #[test]
    fn test_zero_redirects_warns() {
        let mut config = config("https://pearl.example.edu", "admin", "");
        config.device.max_redirects = 0;

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "device.max_redirects"));
    }

    #[test]
    fn test_into_result() {
        let ok = ConfigValidator::validate(&config("http://fake.example.edu", "johnny", "cash"))
            .into_result()
            .unwrap();
        assert_eq!(ok.len(), 1);

        let err = ConfigValidator::validate(&config("", "johnny", ""))
            .into_result()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "device.url"));
    }

    #[test]
    fn test_blank_log_level_warns() {
        let mut config = config("https://pearl.example.edu", "admin", "");
        config.logging.level = " ".to_string();

        let result = ConfigValidator::validate(&config);
        assert!(result.is_valid());
        assert_eq!(result.warnings[0].field, "logging.level");
    }
