//! Logging system demonstration
//!
//! This example shows how to use the logging infrastructure in different modes.
//!
//! Run with:
//! ```bash
//! # Pretty format (default in debug)
//! cargo run --example logging_demo
//!
//! # JSON format
//! cargo run --example logging_demo -- json
//!
//! # Compact format
//! cargo run --example logging_demo -- compact
//!
//! # With custom filter
//! cargo run --example logging_demo -- pretty "core_runtime=trace"
//! ```

use bridge_traits::time::LogLevel;
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};
use std::env;
use tracing::{debug, info, span, warn, Level};

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let format = if args.len() > 1 {
        match args[1].as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    } else {
        LogFormat::default()
    };

    let filter = args.get(2).cloned();

    let mut config = LoggingConfig::default()
        .with_format(format)
        .with_level(LogLevel::Trace)
        .with_spans(true)
        .with_target(true);

    if let Some(f) = filter {
        config = config.with_filter(f);
    }

    init_logging(config).expect("Failed to initialize logging");

    info!(format = ?format, "Logging initialized");

    demo_structured_logging();
    demo_redaction();

    info!("Demo complete");
}

fn demo_structured_logging() {
    let span = span!(Level::INFO, "notification_flow", kind = "clicked");
    let _enter = span.enter();

    info!(
        channel = "Pushe-Clicked",
        title = "Welcome",
        "Notification delivered to handler"
    );

    debug!(pending = 1, handlers = 0, "Cached notification for later");
    warn!(missed = 3, "Broadcast listener lagged");
}

fn demo_redaction() {
    let span = span!(Level::INFO, "identity_update");
    let _enter = span.enter();

    let email = "user@example.com";
    let phone = "+15551234567";

    info!(
        email = %redact_if_sensitive("email", email),
        phone = %redact_if_sensitive("phone", phone),
        "Updated user identity"
    );
}
