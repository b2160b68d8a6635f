//! Diagnostic logging to stderr.
//!
//! Chat output owns stdout, so logs stay quiet unless asked for: `RUST_LOG`
//! wins when set, otherwise `--verbose` selects `debug` and the default is
//! `warn`.

use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "gemini_chat=debug,warn"
    } else {
        "warn"
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
