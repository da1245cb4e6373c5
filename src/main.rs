use std::sync::Arc;

mod config;
mod decode;
mod error;
mod gemini;
mod mock;
mod models;
mod routes;

use config::AppConfig;
use gemini::{CompletionService, GeminiClient};
use routes::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::info!("loaded .env from {}", path.display()),
        Err(_) => tracing::info!("no .env file found, using process environment"),
    }

    let config = AppConfig::from_env();

    let completion: Option<Arc<dyn CompletionService>> = match &config.api_key {
        Some(key) => {
            tracing::info!(model = %config.model, "API key found, completion service configured");
            Some(Arc::new(GeminiClient::new(key, &config.model)))
        }
        None => {
            tracing::warn!(
                "GOOGLE_API_KEY is missing; real completions are disabled. \
                 Put GOOGLE_API_KEY=your_key_here in a .env file to enable them"
            );
            None
        }
    };

    if config.use_mock {
        tracing::warn!("mock mode enabled (SIMPLIFY_USE_MOCK), requests return canned data");
    }

    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState { config, completion });
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    tracing::info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
