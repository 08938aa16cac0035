//! Diagnostic logging for the binary.
//!
//! Library code only emits `tracing` events; this installs the subscriber.
//! Logs go to stderr so translated text on stdout stays pipeable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `mtgate=debug`.
pub const LOG_ENV: &str = "MTGATE_LOG";

/// Filter used when `MTGATE_LOG` is unset or unparsable.
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "mtgate=debug" } else { "warn" }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
