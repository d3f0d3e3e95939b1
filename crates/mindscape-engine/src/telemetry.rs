//! Tracing subscriber setup for binaries and tools embedding the engine.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str =
    "mindscape_engine=info,mindscape_analysis=info,mindscape_layout=info";

/// Install a fmt subscriber; `RUST_LOG` overrides `default_filter`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(default_filter: &str) -> mindscape_core::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| mindscape_core::Error::Config(format!("tracing init failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        let _ = init_tracing(DEFAULT_FILTER);
        assert!(init_tracing("warn").is_err());
    }
}
