use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize diagnostic logging
///
/// Logs go to stderr so they never mix with command output. The level can be
/// controlled via the RUST_LOG environment variable:
/// - RUST_LOG=debug sandbox-ui add button  (everything)
/// - RUST_LOG=sandbox_ui=warn               (default)
///
/// `--verbose` raises the default to debug; an explicit RUST_LOG still wins.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "sandbox_ui=debug"
    } else {
        "sandbox_ui=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init();
}
