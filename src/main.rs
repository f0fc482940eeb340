mod api;
mod config;
mod error;
mod core {
    pub mod assembler;
    pub mod document;
    pub mod normalize;
    pub mod processor;
    pub mod repair;
    pub mod validator;
}
mod ai {
    pub mod client;
    pub mod prompts;
    pub mod schema_utils;
}
mod orchestrator;

use ai::client::GeminiClient;
use api::AppState;
use config::Settings;
use dotenv::dotenv;
use orchestrator::Orchestrator;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Arc::new(Settings::from_env());
    if settings.api_key.is_none() {
        log::warn!("No GOOGLE_API_KEY set; generation requests will fail until one is configured");
    }

    let orchestrator = Orchestrator::new(GeminiClient::new(&settings));
    let app = api::build_router(AppState {
        orchestrator: Arc::new(orchestrator),
        settings: settings.clone(),
    });

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("🤖 GameGPT backend listening on http://{addr}");
    log::info!("Model: {}, allowed origins: {:?}", settings.model, settings.allowed_origins);

    axum::serve(listener, app).await?;
    Ok(())
}
