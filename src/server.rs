//! Process wiring: builds every adapter and handler from configuration and
//! serves the router until shutdown.

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::adapters::broadcast::BroadcastStream;
use crate::adapters::controller::LoopbackLightController;
use crate::adapters::http::{app_router, AppState};
use crate::adapters::render::HtmlTileRenderer;
use crate::adapters::storage::YamlConfigStorage;
use crate::application::{
    CommitPageHandler, ConnectionWorker, DashboardSettings, HandleUserActionHandler,
    OpenConnectionHandler, PublishLightUpdateHandler, ResolveSessionHandler, SharedStateStore,
    StatePersister,
};
use crate::config::{AppConfig, ConfigError, ValidationError};
use crate::ports::{ConfigStorage, PersistedState, StorageError};

/// Errors that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load persisted state: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a running server owns.
pub struct Services {
    pub state: AppState,
    pub stream: BroadcastStream,
    pub persister: StatePersister,
}

/// Builds adapters and handlers around an already loaded state.
pub fn build_services(
    config: &AppConfig,
    persisted: PersistedState,
    storage: Arc<dyn ConfigStorage>,
) -> Services {
    let settings = DashboardSettings {
        title: config.dashboard.title.clone(),
        diagnostics: config.dashboard.diagnostics,
    };
    let store = Arc::new(SharedStateStore::from_persisted(settings, persisted));
    let stream = BroadcastStream::new(config.stream.capacity);

    let commit = Arc::new(CommitPageHandler::new(Arc::new(HtmlTileRenderer::new())));
    let persister = StatePersister::new(store.clone(), storage);
    let controller = Arc::new(LoopbackLightController::new(
        store.clone(),
        Arc::new(stream.clone()),
    ));

    let open_connection = OpenConnectionHandler::new(
        Arc::new(stream.clone()),
        ResolveSessionHandler::new(store.clone()),
        commit.clone(),
        ConnectionWorker::new(store.clone(), config.stream.fade()),
    );
    let user_actions =
        HandleUserActionHandler::new(store.clone(), controller, commit, persister.clone());
    let publish_update = PublishLightUpdateHandler::new(store.clone(), Arc::new(stream.clone()));

    Services {
        state: AppState {
            store,
            open_connection: Arc::new(open_connection),
            user_actions: Arc::new(user_actions),
            publish_update: Arc::new(publish_update),
            outbound_buffer: config.stream.outbound_buffer,
        },
        stream,
        persister,
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured filter. Production logs are JSON.
pub fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let result = if config.is_production() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Tracing already initialized: {}", e);
    }
}

/// Loads state, serves until Ctrl-C, then saves state once more.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;
    let addr = config.server.socket_addr()?;

    let storage: Arc<dyn ConfigStorage> = Arc::new(YamlConfigStorage::new(&config.storage.path));
    let persisted = match storage.load().await? {
        Some(state) => {
            tracing::info!(
                path = %config.storage.path.display(),
                lights = state.registries.lights.len(),
                users = state.user_data.len(),
                "Loaded persisted state"
            );
            state
        }
        None => {
            tracing::info!(path = %config.storage.path.display(), "No persisted state; starting empty");
            PersistedState::default()
        }
    };

    let services = build_services(&config, persisted, storage);
    let app = app_router(services.state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Lightboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(
        subscribers = services.stream.subscriber_count(),
        "Shutting down; saving state"
    );
    if let Err(e) = services.persister.persist().await {
        tracing::error!(error = %e, "Failed to save state on shutdown");
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
