use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use article_summarizer::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // A missing API key aborts here, before anything is bound
    let config = Config::load().inspect_err(|e| tracing::error!(error = %e, "failed to load configuration"))?;
    let server_addr = config.server_addr;
    tracing::info!(static_dir = %config.static_dir.display(), domain = %config.article_domain, "configuration loaded");

    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(server_addr).await?;

    tracing::info!(%server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
