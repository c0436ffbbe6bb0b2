//! Logging to stderr, or to the javascript console in the browser.

use tracing_subscriber::{EnvFilter, prelude::*};

const DEFAULT_FILTER: &str = "error,client=debug";

/// Initialize logging. Later calls are no-ops.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    #[cfg(target_arch = "wasm32")]
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_ansi(false) // Only partially supported across browsers
        .without_time() // std::time is not available in browsers
        .with_writer(
            tracing_web::MakeWebConsoleWriter::new().with_pretty_level(),
        )
        .with_level(false);

    #[cfg(not(target_arch = "wasm32"))]
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("Initialized logs");
    }
}
