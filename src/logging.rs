use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "MEMORY_LOG";

/// Install the fmt subscriber. Filter comes from `MEMORY_LOG`, `info` otherwise.
/// Calling it twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
