use anyhow::Context;
use puntos_server::{app, ServerSettings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let settings = ServerSettings::from_env()?;
    let addr = settings.addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Puntos server running at http://{}", addr);

    axum::serve(listener, app()).await.context("Server error")?;
    Ok(())
}
