mod args;

use std::process::ExitCode;

use pdex::config::Config;

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    use clap::Parser;

    init_logger();

    let config = Config::from(args::Args::parse());
    if config.name.is_some() && !config.variant.supports_name() {
        tracing::warn!(target: "main", "{:?} pages cannot be looked up by name, using #{}", config.variant, config.first);
    }

    tracing::info!(target: "main", "extracting data from {}", config.base_url);
    let summary = pdex::runner::run(&config, &mut std::io::stdout().lock()).await?;

    tracing::info!(
        target: "main",
        "{} requested, {} succeeded, {} failed",
        summary.requested,
        summary.succeeded(),
        summary.failed(),
    );
    for (outcome, err) in summary.failures() {
        tracing::error!(target: "main", "#{} ({}): {err}", outcome.target.id, outcome.url);
    }

    Ok(if summary.failed() == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
