use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a `fmt` subscriber writing to stderr, filtered by `directives`
/// (same syntax as `RUST_LOG`).
pub fn init_tracing(directives: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;
    Ok(())
}
