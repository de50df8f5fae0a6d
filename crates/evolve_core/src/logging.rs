//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Installs a global fmt subscriber writing to stderr, so log lines never
/// interleave with the console narration on stdout. `RUST_LOG` wins over
/// `level` when set. Calling it twice is harmless.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
