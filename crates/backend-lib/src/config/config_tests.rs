use super::*;
use figment::Jail;

fn valid_settings() -> Settings {
    let mut settings = Settings::default();
    settings.token.secret = "test-secret".to_string();
    settings
}

#[test]
fn test_settings_validation() {
    let settings = valid_settings();
    assert!(settings.validate().is_ok());

    // Test invalid log level
    let mut invalid_settings = settings.clone();
    invalid_settings.log_level = "invalid".to_string();
    assert!(invalid_settings.validate().is_err());

    // Secret is mandatory
    let mut invalid_settings = settings.clone();
    invalid_settings.token.secret = "  ".to_string();
    assert!(invalid_settings.validate().is_err());

    // Test invalid token TTL
    let mut invalid_settings = settings.clone();
    invalid_settings.token.ttl_secs = 0;
    assert!(invalid_settings.validate().is_err());

    let mut invalid_settings = settings.clone();
    invalid_settings.token.ttl_secs = MAX_TOKEN_TTL_SECS + 1;
    assert!(invalid_settings.validate().is_err());

    let mut edge_settings = settings.clone();
    edge_settings.token.ttl_secs = MAX_TOKEN_TTL_SECS;
    assert!(edge_settings.validate().is_ok());

    let mut invalid_settings = settings;
    invalid_settings.store.backend = StoreBackend::File;
    invalid_settings.store.path = PathBuf::new();
    assert!(invalid_settings.validate().is_err());
}

#[test]
fn test_default_has_no_secret() {
    let settings = Settings::default();
    assert!(settings.token.secret.is_empty());
    assert!(settings.bootstrap.is_none());
    assert_eq!(settings.token.ttl_secs, 3600);
    assert!(settings.validate().is_err());
}

#[test]
fn test_debug_redacts_secret() {
    let settings = valid_settings();
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains("test-secret"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_load_settings() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            bind_addr = "127.0.0.1:4000"
            log_level = "debug"

            [store]
            backend = "file"
            path = "users.json"

            [token]
            secret = "from-file"
            "#,
        )?;
        // Environment variable takes precedence
        jail.set_env("USERMGMT_LOG_LEVEL", "warn");
        jail.set_env("USERMGMT_TOKEN__TTL_SECS", "120");

        let settings = Settings::load().expect("settings should load");
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:4000");
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.store.backend, StoreBackend::File);
        assert_eq!(settings.store.path, PathBuf::from("users.json"));
        assert_eq!(settings.token.secret, "from-file");
        assert_eq!(settings.token.ttl_secs, 120);
        Ok(())
    });
}

#[test]
fn test_load_rejects_huge_ttl() {
    Jail::expect_with(|jail| {
        jail.set_env("USERMGMT_TOKEN__SECRET", "env-secret");
        jail.set_env("USERMGMT_TOKEN__TTL_SECS", "1152921504606846976");
        assert!(Settings::load().is_err());
        Ok(())
    });
}

#[test]
fn test_bootstrap_user_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("USERMGMT_TOKEN__SECRET", "env-secret");
        jail.set_env("USERMGMT_BOOTSTRAP__LOGIN", "admin");
        jail.set_env("USERMGMT_BOOTSTRAP__EMAIL", "admin@example.com");
        jail.set_env("USERMGMT_BOOTSTRAP__PASSWORD", "changeme");

        let settings = Settings::load().expect("settings should load");
        let user = settings.bootstrap.expect("bootstrap user");
        assert_eq!(user.login, "admin");
        assert_eq!(user.role, "admin");
        assert!(!format!("{user:?}").contains("changeme"));
        Ok(())
    });
}

#[test]
fn test_incomplete_bootstrap_user_is_rejected() {
    let mut settings = valid_settings();
    settings.bootstrap = Some(BootstrapUser {
        login: "admin".to_string(),
        email: "admin@example.com".to_string(),
        password: String::new(),
        role: "admin".to_string(),
    });
    assert!(settings.validate().is_err());
}

#[test]
fn test_load_without_secret_fails() {
    Jail::expect_with(|_jail| {
        assert!(Settings::load().is_err());
        Ok(())
    });
}

#[test]
fn test_load_from_missing_file_fails() {
    Jail::expect_with(|jail| {
        jail.set_env("USERMGMT_TOKEN__SECRET", "env-secret");
        assert!(Settings::load_from("nope.toml").is_err());

        jail.create_file("custom.toml", "log_level = \"error\"")?;
        let settings = Settings::load_from("custom.toml").expect("settings should load");
        assert_eq!(settings.log_level, "error");
        assert_eq!(settings.token.secret, "env-secret");
        Ok(())
    });
}
