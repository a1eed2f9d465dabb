use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::EnvFilter;

/// Configure tracing once at startup. `RUST_LOG` controls verbosity and
/// defaults to `info`.
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(uptime())
        .compact()
        .init();
}
