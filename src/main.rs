use std::net::SocketAddr;

use anyhow::Result;

use taskdeck::config::Config;
use taskdeck::storage::Storage;
use taskdeck::{api, logger};

#[tokio::main]
async fn main() -> Result<()> {
    // Write a commented default config and exit
    if std::env::args().any(|arg| arg == "--init-config") {
        Config::generate_default_config(Config::get_default_config_path()?)?;
        return Ok(());
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    let storage = Storage::connect(&config.database.url).await?;
    if config.seed.default_categories {
        let seeded = storage.seed_default_categories().await?;
        if seeded > 0 {
            log::info!("seeded {seeded} default categories");
        }
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|err| anyhow::anyhow!("invalid server address: {err}"))?;

    let app = api::router(storage);

    log::info!("taskdeck listening on http://{addr}");
    log::info!("health check: http://{addr}/api/health");
    log::info!("todos API: http://{addr}/api/todos");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
