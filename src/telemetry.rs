//! Tracing bootstrap for hosts embedding `graph-view`.
//!
//! The engine only emits `tracing` events. Installing a subscriber is left to
//! the host; this helper exists for demos and quick diagnostics.

/// Installs a compact `tracing` fmt subscriber filtered by `RUST_LOG`
/// (falling back to `default_directive`).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing_with_default(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}

/// Same as [`init_tracing_with_default`] with an `info` fallback filter.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default("info")
}
