//! Telemetry helpers for applications embedding `plotline`.
//!
//! Tracing setup stays explicit and opt-in: hosts either call
//! [`init_default_tracing`] or install their own subscriber and filters.
//! The engine itself only emits `tracing` events.

/// Installs an env-filtered default subscriber when the `telemetry`
/// feature is enabled.
///
/// Returns `true` on success, `false` when the feature is disabled or a
/// global subscriber is already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

/// Like [`init_default_tracing`] with an explicit fallback filter used
/// when `RUST_LOG` is unset.
#[must_use]
pub fn init_tracing_with_default_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
