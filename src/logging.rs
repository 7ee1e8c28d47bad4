//! Tracing setup for the `fintrack` binary
//!
//! Library code only emits events; installing a subscriber is up to the
//! caller. `RUST_LOG` takes precedence over the verbosity flag.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "fintrack=warn",
        1 => "fintrack=info",
        2 => "fintrack=debug",
        _ => "fintrack=trace",
    }
}

/// Install the global subscriber, writing to stderr. Later calls are no-ops.
pub fn init(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        // Another subscriber may already be installed by an embedding program
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "fintrack=warn");
        assert_eq!(default_directive(1), "fintrack=info");
        assert_eq!(default_directive(2), "fintrack=debug");
        assert_eq!(default_directive(9), "fintrack=trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(2);
    }
}
