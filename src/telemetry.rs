//! Tracing subscriber setup.
//!
//! `RUST_LOG` overrides the configured filter. Production emits JSON lines
//! for log shipping; development keeps the human-readable format.

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let already_set = if config.is_production() {
        builder.json().try_init().is_err()
    } else {
        builder.try_init().is_err()
    };

    if already_set {
        tracing::debug!("tracing subscriber already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        let config = ServerConfig::default();
        init_tracing(&config);
        init_tracing(&config);
    }
}
