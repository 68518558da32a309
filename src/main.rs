use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url_summarizer::{AppState, api::routes::create_router, config::Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load()?;
    let server_addr = config.server_addr;
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; summarize requests will fail until it is configured");
    }

    // Create application state
    let app_state = AppState::new(config);

    // Build the router with routes
    let app = create_router(app_state);

    // Create the listener
    let listener = TcpListener::bind(server_addr).await?;

    // Start the server
    info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
