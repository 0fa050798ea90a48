//! Log output for the `snowfall` binary.
//!
//! Events go to stderr so that stdout carries nothing but IDs and decoded
//! fields. The level is taken from `RUST_LOG` and defaults to `info`:
//!
//! ```bash
//! RUST_LOG=snowfall=debug snowfall generate -n 5000
//! ```

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_line_number(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(())
}
