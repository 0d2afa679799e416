/*
 * Logging Module
 *
 * Installs the global tracing subscriber. `RUST_LOG` wins over the default
 * directive passed in by the binary.
 */

use tracing_subscriber::EnvFilter;

/// Initialize tracing with a stderr fmt subscriber.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second call (tests, embedding) keeps the first subscriber
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
