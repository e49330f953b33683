use {
    anyhow::Result,
    clap::Parser,
    per_metrics::MetricsLayer,
    server::start_server,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::LevelFilter,
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
        Layer,
    },
};

mod api;
mod auction;
mod config;
mod kernel;
mod per_metrics;
mod server;
mod state;
mod user;

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let fmt_layer = if std::io::stderr().is_terminal() {
        fmt_layer.compact().boxed()
    } else {
        fmt_layer.json().boxed()
    };

    tracing_subscriber::registry()
        .with(MetricsLayer)
        .with(fmt_layer.with_filter(env_filter))
        .try_init()?;

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
