use std::sync::Arc;

use tower_http::cors::CorsLayer;

use spark_chat::{config::ServerConfig, init_tracing, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env()?;

    let state = Arc::new(AppState::from_config(&config));
    let cleaner = state.sessions.spawn_cleaner(config.cleanup_interval);

    let cors = CorsLayer::very_permissive();

    // Page assets, including `/`, are served from public/.
    let app = routes::create_router()
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(
        %addr,
        upstream = config.model.is_some(),
        "chat server running"
    );

    axum::serve(listener, app).await?;
    cleaner.abort();
    Ok(())
}
