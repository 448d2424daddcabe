//! Log output setup.
//!
//! Status lines go to stdout through a compact `tracing-subscriber` formatter.
//! `RUST_LOG` overrides everything; otherwise `-v` selects debug, `-vv` and
//! above trace, and without flags the configured level applies.

use tracing_subscriber::EnvFilter;

/// Level used for a given verbosity count, falling back to `configured`.
pub fn effective_level(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => configured.to_ascii_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber. Calling this twice is harmless.
pub fn init(configured: &str, verbosity: u8) {
    let level = effective_level(configured, verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .compact()
        .try_init();
}
