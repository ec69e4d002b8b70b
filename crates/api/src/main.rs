use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vuement_api::config::{ServerConfig, StoreBackend};
use vuement_api::router::build_app_router;
use vuement_api::state::AppState;
use vuement_core::service::ComponentService;
use vuement_core::store::ComponentStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vuement_api=debug,vuement_core=debug,vuement_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = ?config.store_backend,
        "Loaded server configuration"
    );

    // --- Store ---
    let store: Arc<dyn ComponentStore> = match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set when STORE_BACKEND=postgres");

            let pool = vuement_db::create_pool(database_url, config.db_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            vuement_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            vuement_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(vuement_db::PgComponentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory component store, data is lost on restart");
            Arc::new(vuement_db::MemoryComponentStore::new())
        }
    };

    // --- App state ---
    let components = ComponentService::with_defaults(store);
    let state = AppState::new(config.clone(), components);
    let forced_shutdown = state.shutdown.clone();

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let draining = CancellationToken::new();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let draining = draining.clone();
            async move {
                shutdown_signal().await;
                draining.cancel();
            }
        })
        .into_future();
    tokio::pin!(server);

    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    tokio::select! {
        result = &mut server => {
            result.expect("Server error");
        }
        () = async {
            draining.cancelled().await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_secs = config.shutdown_timeout_secs,
                "Shutdown grace period elapsed, cancelling in-flight requests"
            );
            forced_shutdown.cancel();
            if tokio::time::timeout(Duration::from_secs(5), &mut server).await.is_err() {
                tracing::error!("Server did not stop after cancellation");
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
