use offer_board_rust::config::Config;
use offer_board_rust::router::create_app_router;
use offer_board_rust::session::AppState;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    offer_board_rust::logging::init(&config.log_filter);

    // Initialize application state
    let state = Arc::new(AppState::new());

    // Periodic idle session cleanup (every minute)
    if let Some(max_idle) = config.session_idle_timeout() {
        let state = state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
            loop {
                interval.tick().await;
                let purged = state.purge_idle(max_idle, chrono::Utc::now());
                if purged > 0 {
                    tracing::info!(purged, live = state.sessions.len(), "Idle sessions purged");
                }
            }
        });
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
