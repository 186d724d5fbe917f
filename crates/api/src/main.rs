use anyhow::{Context, Result};
use api::{AppConfig, AppState, LogFormat};
use recommend::{OpenAiClient, Recommender};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Local secrets live in an untracked .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.server.log_format);

    tracing::info!(
        model = %config.llm.model,
        base_url = %config.llm.base_url,
        timeout_secs = config.llm.timeout.map(|t| t.as_secs()),
        "Loaded configuration"
    );

    let bind_addr = config.server.bind_addr;
    let client = OpenAiClient::new(config.llm).context("Failed to build chat completion client")?;
    let state = AppState::new(Recommender::new(client));

    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
    }
}
