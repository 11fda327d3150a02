use anyhow::Context;
use stagehand::domain::config::{ApiConfig, LoggingConfig};
use stagehand::kernel::config::load_config;
use stagehand_logger::Logger;
use stagehand_server::Server;

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .level_name(&cfg.level)?
        .console(cfg.console)
        .json(cfg.json);
    let builder = match &cfg.filter {
        Some(filter) => builder.env_filter(filter),
        None => builder,
    };

    match &cfg.directory {
        Some(directory) => builder.path(directory).init(),
        None => builder.init(),
    }
    .context("Failed to initialize logging")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "server".to_owned());
    let cfg: ApiConfig = load_config(Some(&path)).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging)?;
    tracing::info!(config = %path, "Configuration loaded");

    Server::builder().config(cfg).build().await?.run().await
}
