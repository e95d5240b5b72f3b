mod assets;
mod config;
mod db;
mod error;
mod models;
mod routes;
mod storage;
mod uploads;

use crate::assets::ReferenceData;
use crate::config::{AppConfig, StorageBackend};
use crate::storage::{ContentStore, MemoryStore, PostgresStore};
use crate::uploads::UploadManager;
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub uploads: UploadManager,
    pub reference: ReferenceData,
    pub config: AppConfig,
}

impl FromRef<AppState> for Arc<dyn ContentStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for UploadManager {
    fn from_ref(state: &AppState) -> Self {
        state.uploads.clone()
    }
}

impl FromRef<AppState> for ReferenceData {
    fn from_ref(state: &AppState) -> Self {
        state.reference.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppConfig::load().expect("Failed to load config.toml");

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_level.as_str())
        .init();

    let uploads = UploadManager::new(&settings.upload_dir);
    uploads.ensure_directory().await?;
    tracing::info!("upload directory ready at {}", uploads.dir().display());

    let store: Arc<dyn ContentStore> = match settings.storage {
        StorageBackend::Postgres => {
            let pool = db::connect(&settings)?;
            // Bootstrap failure does not stop the process; the store is
            // marked not-ready and data routes fail fast until restart.
            let ready = match db::bootstrap(&pool, &settings.database_url).await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!("schema bootstrap failed: {e:?}");
                    false
                }
            };
            Arc::new(PostgresStore::new(pool, ready))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let reference = ReferenceData::load(&settings).await;

    let state = AppState {
        store,
        uploads,
        reference,
        config: settings.clone(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("listening on {}", settings.server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
