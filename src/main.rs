use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use bonsai_appraiser::bot::{build_router, AppState, Orchestrator};
use bonsai_appraiser::config::AppConfig;
use bonsai_appraiser::generation::GenerationClient;
use bonsai_appraiser::messaging::MessagingClient;
use bonsai_appraiser::pending_store::PendingImageStore;
use bonsai_appraiser::vision::{VisionClient, VisionLabeler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting bonsai appraiser bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;

    let store = Arc::new(match config.pending_image_ttl_secs {
        Some(secs) => PendingImageStore::with_ttl(std::time::Duration::from_secs(secs)),
        None => PendingImageStore::new(),
    });

    let messaging = Arc::new(MessagingClient::new(config.channel_access_token.clone()));

    let vision = config
        .vision_api_key
        .as_ref()
        .map(|key| Arc::new(VisionClient::new(key.clone())) as Arc<dyn VisionLabeler>);
    if vision.is_some() {
        info!("Vision labeling enabled");
    }

    let generator = Arc::new(GenerationClient::new(
        config.generation_api_key.clone(),
        config.generation_model.clone(),
        config.max_tokens,
    ));

    let orchestrator = Arc::new(Orchestrator::new(
        store,
        messaging.clone(),
        vision,
        generator,
        messaging,
    ));

    let state = AppState {
        channel_secret: config.channel_secret.clone(),
        orchestrator,
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Webhook server listening");

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
