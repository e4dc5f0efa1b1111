use std::net::SocketAddr;
use taskcache_api::{create_api_routes, AppState};
use taskcache_domain::config::ServerConfig;
use tracing::info;

pub async fn start_web_server(cfg: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", cfg.bind_address, cfg.port).parse()?;
    let app = create_api_routes(state, &cfg.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web Server: http://{}", addr);
    info!("   API: http://{}/api/v1/todo", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
