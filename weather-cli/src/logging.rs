use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins; otherwise `warn`, or
/// `info` when `verbose` is set.
pub fn init(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
