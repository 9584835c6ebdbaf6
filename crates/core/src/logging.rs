//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::CoreConfig;

/// Filter directives used when the configured ones fail to parse
const FALLBACK_FILTER: &str = "info";

/// Filter directives for a config
///
/// `debug = true` wins over `log_filter`.
pub fn filter_directives(config: &CoreConfig) -> &str {
    if config.debug {
        "debug"
    } else {
        &config.log_filter
    }
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over the config when set. Calling this again
/// after a subscriber is installed does nothing.
///
/// # Returns
/// `true` if this call installed the subscriber.
pub fn init_logging(config: &CoreConfig) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = filter_directives(config);
        EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Invalid log filter {:?}: {}", directives, e);
            EnvFilter::new(FALLBACK_FILTER)
        })
    });

    fmt()
        .with_env_filter(filter)
        .with_thread_ids(true)
        .try_init()
        .is_ok()
}
