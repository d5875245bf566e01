use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` for
/// this crate and everything else stays at `warn`. Logs go to stderr so
/// stdout carries only rendered results.
pub fn setup_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,product_search=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
