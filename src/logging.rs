//! Logging and tracing infrastructure for urlcanon.
//!
//! This module provides structured logging using the tracing crate.
//! Diagnostics always go to stderr: stdout carries normalized URLs.

use std::sync::Once;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

static INIT: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// This should be called once at program startup.
/// Subsequent calls are ignored.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        // stdout is the output stream; keep diagnostics on stderr
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, error, info, trace, warn};

    #[test]
    fn test_init_tracing_once() {
        // Should be callable multiple times without panic
        init_tracing();
        init_tracing();
    }

    #[test]
    fn test_log_levels() {
        init_tracing();
        trace!("This is a trace message");
        debug!("This is a debug message");
        info!("This is an info message");
        warn!("This is a warning message");
        error!("This is an error message");
    }
}
