use env_logger::{Builder, Env};

/// Intercept messages using the `log` crate and print them to STDERR. The filter defaults to
/// `info` and can be overridden with `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn setup() {
    setup_with_default_filter("info");
}

/// Like `setup`, but with a different default when `RUST_LOG` is unset.
pub fn setup_with_default_filter(default_filter: &str) {
    let result = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
    if result.is_ok() {
        log::debug!("Logging initialized with default filter {}", default_filter);
    }
}
