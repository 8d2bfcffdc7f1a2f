//! Logging configuration.
//!
//! Everything goes to stderr so stdout stays free for command replies.
//! `RUST_LOG` overrides the built-in filter when set.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,sightfront=debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. Call once, before anything logs.
///
/// A second call is ignored; the first subscriber stays installed.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let installed = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(debug = verbose, "logging initialized");
    }
}
