use std::{sync::Arc, time::Duration};

use tracing_subscriber::EnvFilter;

use trip_personalization::{
    api::{create_router, AppState},
    config::Config,
    services::{HttpTripBackend, Personalizer},
    store::{create_redis_client, PreferenceStore, RedisSlotStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trip_personalization=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let redis_client = create_redis_client(&config.redis_url)?;
    let slots = RedisSlotStore::new(redis_client, config.slot_prefix.clone());
    let engine = Personalizer::load(PreferenceStore::new(Arc::new(slots))).await;

    let backend = HttpTripBackend::new(
        config.api_base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let state = AppState::new(engine, Arc::new(backend));

    // Catalog load and cold start run alongside the server; the snapshot
    // reports `loading` until the candidate fetch resolves
    let recommendations = state.recommendations.clone();
    tokio::spawn(async move { recommendations.refresh_catalog().await });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %config.bind_address(), "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
