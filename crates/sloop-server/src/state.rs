//! Shared state for the documentation routes.
//!
//! A single [`DocsState`] is built at startup and shared across the docs
//! handlers via `Arc`. It owns the page renderer, which in turn owns the
//! asset source and the inline asset cache.

use std::sync::Arc;

use sloop_core::assets::{AssetCache, AssetSource, DirAssets, EmbeddedAssets};
use sloop_core::clock::{Clock, SystemClock};
use sloop_core::config::SloopSettings;
use sloop_core::render::DocPage;

use crate::config::ServerConfig;

/// State passed to the docs handlers.
#[derive(Debug)]
pub struct DocsState {
    /// Renders `index.html` and owns the asset source.
    pub page: DocPage,
    /// Route prefix without surrounding slashes.
    pub route_prefix: String,
    /// Whether the UI is mounted at all.
    pub enabled: bool,
}

impl DocsState {
    /// Build state from settings, an asset source and a clock.
    pub fn new(
        settings: &SloopSettings,
        source: Arc<dyn AssetSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let page = DocPage::new(
            settings.render.clone(),
            source,
            Arc::new(AssetCache::new()),
            clock,
        );
        Self {
            page,
            route_prefix: settings.normalized_route_prefix().to_owned(),
            enabled: settings.enabled,
        }
    }

    /// State serving the embedded assets with the wall clock.
    pub fn embedded(settings: &SloopSettings) -> Self {
        Self::new(settings, Arc::new(EmbeddedAssets), Arc::new(SystemClock))
    }

    /// State for the server binary: on-disk assets when `asset_dir` is set,
    /// embedded assets otherwise.
    pub fn from_config(config: &ServerConfig) -> Self {
        let source: Arc<dyn AssetSource> = match &config.asset_dir {
            Some(dir) => {
                tracing::info!(path = %dir.display(), "serving UI assets from directory");
                Arc::new(DirAssets::new(dir))
            }
            None => Arc::new(EmbeddedAssets),
        };
        Self::new(&config.sloop, source, Arc::new(SystemClock))
    }
}
