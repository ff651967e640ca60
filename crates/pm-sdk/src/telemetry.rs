use tracing_subscriber::EnvFilter;

/// Filter used when none is configured or the configured one is invalid.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a global fmt subscriber filtered by `filter` (`EnvFilter` syntax,
/// e.g. `"info,pm_local=debug"`).
///
/// Returns `false` if a global subscriber was already installed; the call is
/// then a no-op.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
