use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Installs the stderr subscriber. `RUST_LOG` overrides the default `warn`
/// filter, e.g. `RUST_LOG=suited_engine=debug`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        eprintln!("WARNING: logging already initialised: {}", e);
    }
}
