//! Log subscriber for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Filter used when `-v` is given.
pub const VERBOSE_FILTER: &str = "sortviz=debug";
/// Filter used when neither `-v` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter: `-v` wins, then `RUST_LOG`, then warnings only.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install a stderr subscriber. A second call is ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_overrides_env() {
        assert!(filter(true).to_string().contains("sortviz=debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::debug!("after init");
    }
}
