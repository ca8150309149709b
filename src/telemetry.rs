//! Opt-in `tracing` setup for hosts that do not install their own subscriber.
//!
//! The engine logs view changes and selections at `debug`, grid building at
//! `trace`, and payload failures at `warn`, all under the `jalali_engine`
//! target.

/// Installs a compact stderr subscriber filtered by `RUST_LOG`, or by
/// `jalali_engine=info` when it is unset.
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("jalali_engine=info")
}

/// Like [`init_default_tracing`], with `fallback` used as the filter when
/// `RUST_LOG` is unset or unparsable.
#[must_use]
#[cfg_attr(not(feature = "telemetry"), allow(unused_variables))]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
