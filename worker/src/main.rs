use anyhow::Context;
use tracing::{error, info};

use tienda_shared::AppConfig;
use tienda_worker::{init_tracing, Worker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tienda_infra::load_dotenv();

    let config = AppConfig::from_env();
    init_tracing(&config.logging)?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        anyhow::bail!("Invalid configuration: {}", e);
    }

    info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Tienda worker"
    );

    let worker = Worker::build(&config)
        .await
        .context("Failed to start worker")?;

    worker
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await;

    info!("Tienda worker stopped");
    Ok(())
}
