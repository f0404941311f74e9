//! Tracing setup for binaries and tests using `chart-axis`.
//!
//! The library only emits `tracing` events (scale selection at `debug`,
//! search candidates at `trace`). Hosts either call `init_default_tracing`
//! or install their own subscriber.

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "chart_axis=warn";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
