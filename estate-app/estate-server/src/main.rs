use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, info, warn};

use estate_api::{build_router, AppState};
use estate_core::gateway::RoomHub;
use estate_core::repositories::{ConversationRepository, ReservationStore};
use estate_core::services::{ConversationGateway, PriceQuoter, PricingPolicy, ReservationSubmitter};
use estate_infrastructure::{
    create_pool, run_migrations, InMemoryConversationRepository, PgConversationRepository,
    RestClientSettings, RestReservationStore,
};
use estate_shared::config::{AppConfig, StorageBackend};
use estate_shared::telemetry::init_telemetry;

const ROOM_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let _log_guard = init_telemetry(&config.logging)?;
    info!("{} starting ({})", config.app.name, config.app.env);

    // Reservation collaborator
    let store: Arc<dyn ReservationStore> = Arc::new(RestReservationStore::new(RestClientSettings {
        base_url: config.collaborator.base_url.clone(),
        timeout: Duration::from_secs(config.collaborator.timeout_seconds),
        auth_token: config.collaborator.auth_token.clone(),
    })?);
    info!("Reservation collaborator at {}", config.collaborator.base_url);

    let quoter = PriceQuoter::new(PricingPolicy {
        application_fee: config.pricing.application_fee,
        cleaning_fee: config.pricing.cleaning_fee,
        purchase_tax_bps: config.pricing.purchase_tax_bps,
        currency: config.pricing.currency.clone(),
    });
    let submitter = Arc::new(
        ReservationSubmitter::new(store.clone(), quoter)
            .with_overlap_check(config.reservations.reject_overlapping),
    );

    // Conversation store
    let (repo, backend): (Arc<dyn ConversationRepository>, &'static str) = match config.storage.backend {
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .context("database.url is required for the postgres backend")?;
            info!("Connecting to conversation database...");
            let pool = create_pool(url, config.database.max_connections, config.database.acquire_timeout_seconds).await?;
            run_migrations(&pool).await?;
            info!("Database connection established.");
            (Arc::new(PgConversationRepository::new(pool)), "postgres")
        }
        StorageBackend::Memory => {
            warn!("Using in-memory conversation store; messages are lost on restart");
            (Arc::new(InMemoryConversationRepository::new()), "memory")
        }
    };

    let rooms = Arc::new(RoomHub::new(config.gateway.room_capacity));
    let gateway = Arc::new(ConversationGateway::new(repo, rooms.clone()));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ROOM_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            let pruned = rooms.prune_idle();
            if pruned > 0 {
                debug!("Pruned {} idle room(s)", pruned);
            }
        }
    });

    let state = AppState::new(store, submitter, gateway)
        .with_outbound_buffer(config.gateway.outbound_buffer)
        .with_storage_backend(backend);
    let app = build_router(state, &config.app.cors_origins);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
