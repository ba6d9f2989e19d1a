//! lunar-api entry point.
//!
//! Sets up tracing, builds the app from the environment, starts the
//! consumers and serves HTTP until Ctrl-C.

use anyhow::Context;
use lunar_api::routes::{self, AppState};
use lunar_core::Config;
use lunar_core::app::AppBuilder;
use lunar_core::observability;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("load config")?;
    observability::init(config.log_json);

    let app = AppBuilder::new()
        .config(config)
        .build()
        .context("build app")?;
    let consumers = app.start();
    info!(
        consumers = consumers.len(),
        topic = %app.config.topic,
        "consumers started"
    );

    let router = routes::build_router(AppState {
        ingest: app.ingest.clone(),
        reader: app.reader(),
    });

    let addr = app.config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!("lunar-api listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server crashed")?;

    info!("draining consumers");
    consumers.shutdown_and_join().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler failed");
    }
}
