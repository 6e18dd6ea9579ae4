//! Diagnostic logging setup.

use anyhow::{Context as _, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `filter` when set.
///
/// # Errors
///
/// Fails if `filter` is not a valid directive or a global subscriber is
/// already installed.
pub fn init_tracing(filter: &str) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => EnvFilter::try_new(filter)
            .with_context(|| format!("invalid log filter '{}'", filter))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error() {
        let _ = init_tracing("info");
        assert!(init_tracing("info").is_err());
    }
}
