//! Logging setup for the `fakezip` binary.
//!
//! The library logs through `tracing` macros: `debug!` for each walk and
//! `trace!` for every record visited. Output goes to stderr so it never
//! mixes with the verdict on stdout.
//!
//! Set `RUST_LOG` to control log levels at runtime:
//! ```bash
//! RUST_LOG=fakezip=debug fakezip -f data.zip
//! RUST_LOG=fakezip::zip=trace fakezip -f data.zip -g
//! ```

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "fakezip=warn";

/// Initialize the global subscriber. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .compact(),
    );

    // Ignore the error if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}
