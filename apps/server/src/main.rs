use anyhow::Context;
use castellan::domain::config::ApiConfig;
use castellan::kernel::config::load_config;
use castellan_logger::{Logger, parse_level};
use castellan_server::Server;

#[castellan_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let mut logger = Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&cfg.logging.level)?);
    if let Some(filter) = &cfg.logging.filter {
        logger = logger.env_filter(filter);
    }
    if cfg.logging.json {
        logger = logger.json();
    }
    let _log = match &cfg.logging.directory {
        Some(directory) => logger.path(directory).init()?,
        None => logger.init()?,
    };

    Server::builder().config(cfg).build().await?.run().await
}
