use clap::Parser;
use edital::config::ServerConfig;
use edital::processor::Processor;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let app = edital::api::router(Processor::default(), config.max_upload_bytes());
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        max_upload_mb = config.max_upload_mb,
        "edital listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("edital stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
