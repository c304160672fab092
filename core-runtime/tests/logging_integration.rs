//! Integration tests for logging system

use bridge_traits::time::LogLevel;
use core_runtime::logging::{redact_if_sensitive, LogFormat, LoggingConfig};

#[test]
fn test_logging_initialization() {
    // Test that we can configure logging in different shapes.
    // Note: We can only initialize once per process, so we test the config builder

    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.enable_spans);
}

#[test]
fn test_pii_redaction_tokens() {
    let token = "sensitive_push_token";
    let redacted = redact_if_sensitive("fcm_token", token);
    assert_eq!(redacted, "[REDACTED]");

    let apns = "apns_token_value";
    let redacted = redact_if_sensitive("apns_token", apns);
    assert_eq!(redacted, "[REDACTED]");

    let phone = "+155512345";
    let redacted = redact_if_sensitive("phone", phone);
    assert_eq!(redacted, "[REDACTED]");
}

#[test]
fn test_pii_redaction_emails() {
    let email = "user@example.com";
    let redacted = redact_if_sensitive("email", email);

    // Should start with first char
    assert!(redacted.starts_with('u'));
    // Should contain redacted marker
    assert!(redacted.contains("[REDACTED]"));
    // Should not contain full email
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_pii_redaction_normal_values() {
    // Normal values should pass through unchanged
    assert_eq!(redact_if_sensitive("topic", "news"), "news");
    assert_eq!(redact_if_sensitive("channel_id", "promo"), "promo");
    assert_eq!(redact_if_sensitive("device_id", "device_123"), "device_123");
}

#[test]
fn test_format_selection() {
    // Debug builds should default to Pretty
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    // Release builds should default to JSON
    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_filter_configuration() {
    let config = LoggingConfig::default().with_filter("core_runtime=debug,core_service=trace");

    assert_eq!(
        config.filter,
        Some("core_runtime=debug,core_service=trace".to_string())
    );
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
