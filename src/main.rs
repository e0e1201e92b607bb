use tokio::net::TcpListener;
use tracing::info;
use study_assistant::{agents::StudyAgent, config::Config, routes::create_router, utils, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config);

    let agent = StudyAgent::from_config(&config.llm)?;
    let state = AppState::new(config.clone(), agent);

    state
        .uploads
        .ensure_dir()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory {}: {}", state.uploads.upload_dir().display(), e))?;
    info!(dir = %state.uploads.upload_dir().display(), "Upload directory ready");

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
