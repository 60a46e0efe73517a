//! Book catalog service.
//!
//! Wires the record store, the module registry and the HTTP stack into one
//! runnable application.

pub mod modules;

use anyhow::Context;
use axum::Router;
use catalog_db::Store;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// A fully initialized service, ready to serve.
pub struct App {
    pub settings: Settings,
    pub store: Store,
    pub registry: ModuleRegistry,
}

impl App {
    /// Open the process-wide store and bring every module up.
    pub async fn bootstrap(settings: Settings) -> anyhow::Result<Self> {
        let store = catalog_db::init(&settings.database.store_config())
            .await
            .context("failed to open record store")?;

        Self::with_store(settings, store).await
    }

    /// Bring every module up over an explicit store.
    pub async fn with_store(settings: Settings, store: Store) -> anyhow::Result<Self> {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, &store, &settings);

        let ctx = InitCtx {
            settings: &settings,
            store: &store,
        };
        registry.init_all(&ctx).await?;
        registry.start_all(&ctx).await?;

        Ok(Self {
            settings,
            store,
            registry,
        })
    }

    pub fn router(&self) -> Router {
        catalog_http::build_router(&self.registry, &self.settings)
    }

    /// Serve on the configured address until shutdown, then stop modules.
    pub async fn serve(self) -> anyhow::Result<()> {
        catalog_http::start_server(&self.registry, &self.settings).await?;
        self.registry.stop_all().await
    }
}
