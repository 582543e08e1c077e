//! `tracing` subscriber setup for binaries.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
