//! Subscriber setup for the contacts binary.
//!
//! A bare level such as `debug` applies to the contacts crates and to the
//! `tower_http` request traces; everything else stays at `warn` so hyper and
//! friends do not drown out request logs. Anything that already looks like an
//! `EnvFilter` directive is used verbatim, and `RUST_LOG` beats both.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::TelemetryConfig;

/// Targets that follow the configured level.
const SERVICE_TARGETS: &[&str] = &[
    "contacts",
    "contacts_core",
    "contacts_server",
    "contacts_store",
    "contacts_telemetry",
    "tower_http",
];

/// Expands a configured level into filter directives.
#[must_use]
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = String::from("warn");
    for target in SERVICE_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push('=');
        directives.push_str(level);
    }
    directives
}

/// Installs the global subscriber.
///
/// Later calls leave the first subscriber in place.
pub fn init_logging(config: &TelemetryConfig) {
    let directives = filter_directives(&config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directives));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json_logs {
        registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    if installed.is_err() {
        tracing::debug!("Subscriber already installed");
        return;
    }

    tracing::info!(
        service = %config.service_name,
        filter = %directives,
        json = config.json_logs,
        "Contacts logging ready"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_scopes_service_crates() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("contacts_server=debug"));
        assert!(directives.contains("contacts_store=debug"));
        assert!(directives.contains("tower_http=debug"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_directive_strings_pass_through() {
        assert_eq!(filter_directives("hyper=info,contacts=trace"), "hyper=info,contacts=trace");
        assert_eq!(filter_directives(" contacts_store=debug "), "contacts_store=debug");
    }

    #[test]
    fn test_second_init_is_harmless() {
        let config = crate::TelemetryConfig::new("contacts");
        init_logging(&config);
        init_logging(&config);
    }
}
