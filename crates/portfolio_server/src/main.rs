use anyhow::anyhow;
use portfolio_core::init_logging;
use portfolio_server::{config::Config, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal in deployed environments.
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_logging(&config.log_level, config.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    start_server(config).await
}
