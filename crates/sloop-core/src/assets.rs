//! Asset sources and the inline asset cache.
//!
//! The UI ships three files: the page template, its stylesheet and its
//! script. [`EmbeddedAssets`] serves the copies compiled into the binary;
//! [`DirAssets`] serves a directory on disk so a deployment can replace
//! them. Both implement [`AssetSource`], which is also how the HTTP layer
//! serves the raw files under the route prefix.
//!
//! [`AssetCache`] holds the stylesheet and script text used when the page
//! inlines its resources. Each slot is written once: the first completed
//! lookup is kept for the life of the cache, including "not found".

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::AssetError;

/// File name of the page template.
pub const INDEX_HTML: &str = "index.html";
/// File name of the bundled stylesheet.
pub const STYLESHEET: &str = "swagger-sloop.css";
/// File name of the bundled script.
pub const SCRIPT: &str = "swagger-sloop.js";

const EMBEDDED: &[(&str, &str)] = &[
    (INDEX_HTML, include_str!("../assets/index.html")),
    (STYLESHEET, include_str!("../assets/swagger-sloop.css")),
    (SCRIPT, include_str!("../assets/swagger-sloop.js")),
];

/// Canonical form of an asset name: `/`-separated, without empty or `.`
/// segments. Returns `None` for names containing `..`.
///
/// Every source looks names up through this, so callers comparing against
/// [`INDEX_HTML`] see the same name the source will open.
#[must_use]
pub fn normalize_name(name: &str) -> Option<String> {
    let mut parts = Vec::new();
    for part in name.split(['/', '\\']) {
        match part {
            "" | "." => {}
            ".." => return None,
            _ => parts.push(part),
        }
    }
    Some(parts.join("/"))
}

/// A read-only set of named files.
///
/// Names are relative paths using `/` as a separator. Implementations must
/// be safe to share across async tasks.
#[async_trait::async_trait]
pub trait AssetSource: Send + Sync + 'static {
    /// Read a file as raw bytes.
    ///
    /// Returns `Ok(None)` if there is no such file.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] if the file exists but cannot be read.
    async fn load_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AssetError>;

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Io`] on read failure and
    /// [`AssetError::NotUtf8`] if the content is not text.
    async fn load(&self, name: &str) -> Result<Option<String>, AssetError> {
        match self.load_bytes(name).await? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| AssetError::NotUtf8 {
                    name: name.to_owned(),
                }),
            None => Ok(None),
        }
    }
}

/// The bundled assets compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedAssets;

impl EmbeddedAssets {
    fn find(name: &str) -> Option<&'static str> {
        let name = normalize_name(name)?;
        EMBEDDED
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, body)| *body)
    }
}

#[async_trait::async_trait]
impl AssetSource for EmbeddedAssets {
    async fn load_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AssetError> {
        Ok(Self::find(name).map(|body| body.as_bytes().to_vec()))
    }

    async fn load(&self, name: &str) -> Result<Option<String>, AssetError> {
        Ok(Self::find(name).map(str::to_owned))
    }
}

/// Assets read from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    /// Serve files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a relative name to a path under the root. Returns `None` for
    /// names that would leave the root.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = normalize_name(name)?;
        let mut path = self.root.clone();
        for component in Path::new(&name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(path)
    }
}

#[async_trait::async_trait]
impl AssetSource for DirAssets {
    async fn load_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let Some(path) = self.resolve(name) else {
            debug!(asset = %name, "rejected asset path outside root");
            return Ok(None);
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AssetError::Io {
                    name: name.to_owned(),
                    reason: e.to_string(),
                });
            }
        }

        tokio::fs::read(&path)
            .await
            .map(Some)
            .map_err(|e| AssetError::Io {
                name: name.to_owned(),
                reason: format!("failed to read '{}': {e}", path.display()),
            })
    }
}

/// Write-once cache of the stylesheet and script used for inlining.
#[derive(Debug, Default)]
pub struct AssetCache {
    css: OnceCell<Option<Arc<str>>>,
    js: OnceCell<Option<Arc<str>>>,
}

impl AssetCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled stylesheet, loading it from `source` on first use.
    ///
    /// Returns `None` if the stylesheet is absent (permanently, once
    /// observed) or if this lookup failed to read it.
    pub async fn css(&self, source: &dyn AssetSource) -> Option<Arc<str>> {
        Self::slot(&self.css, source, STYLESHEET).await
    }

    /// The bundled script, loading it from `source` on first use.
    pub async fn js(&self, source: &dyn AssetSource) -> Option<Arc<str>> {
        Self::slot(&self.js, source, SCRIPT).await
    }

    async fn slot(
        cell: &OnceCell<Option<Arc<str>>>,
        source: &dyn AssetSource,
        name: &str,
    ) -> Option<Arc<str>> {
        let loaded = cell
            .get_or_try_init(|| async {
                let text = source.load(name).await?;
                match &text {
                    Some(body) => {
                        debug!(asset = %name, bytes = body.len(), "inline asset loaded and cached");
                    }
                    None => warn!(asset = %name, "inline asset not found, keeping external reference"),
                }
                Ok::<_, AssetError>(text.map(Arc::from))
            })
            .await;

        match loaded {
            Ok(slot) => slot.clone(),
            Err(e) => {
                warn!(asset = %name, error = %e, "failed to load inline asset, falling back to external file");
                None
            }
        }
    }
}
