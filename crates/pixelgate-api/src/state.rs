//! Application state

use anyhow::Context;
use pixelgate_core::Config;
use pixelgate_processing::{Executor, OperationRegistry, PixelEngine};
use pixelgate_storage::create_storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<OperationRegistry>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, registry: OperationRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: Arc::new(config),
        }
    }

    /// Build the engine, storage and registry described by `config`
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let mut engine = PixelEngine::new();
        if let Some(font) = &config.watermark_font_path {
            tracing::info!(font = %font.display(), "Using default watermark font");
            engine = engine.with_default_font(font.clone());
        }

        let storage = create_storage(&config)
            .await
            .context("Failed to initialise storage backend")?;
        if let Some(storage) = &storage {
            tracing::info!(backend = %storage.backend_type(), "Persistence enabled");
        }

        let executor = Executor::new(Arc::new(engine))
            .with_storage(storage)
            .with_deadline(config.operation_timeout());

        Ok(Self::new(config, OperationRegistry::new(Arc::new(executor))))
    }
}
