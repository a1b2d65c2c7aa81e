//! Error types for `sloop-core`.
//!
//! Only a missing template is terminal for a render. Asset failures and
//! endpoint serialization failures are recovered inside the renderer and
//! never surface through these types during a render.

/// Errors from loading a bundled or on-disk asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Reading the asset failed for a reason other than absence.
    #[error("failed to read asset '{name}': {reason}")]
    Io { name: String, reason: String },

    /// The asset exists but is not valid UTF-8 text.
    #[error("asset '{name}' is not valid UTF-8")]
    NotUtf8 { name: String },
}

/// Errors from parsing a page template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A `%(Name)` token whose name the renderer does not know.
    #[error("unknown placeholder '%({name})' at byte {offset}")]
    UnknownPlaceholder { name: String, offset: usize },
}

/// Errors from rendering the documentation page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The asset source has no `index.html`.
    #[error("page template '{name}' not found")]
    TemplateNotFound { name: String },

    /// The template could not be parsed.
    #[error("invalid page template: {0}")]
    Template(#[from] TemplateError),

    /// The template could not be read.
    #[error("failed to load page template: {0}")]
    Asset(#[from] AssetError),
}

/// Errors from building settings out of raw configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A boolean setting held something other than a recognized flag.
    #[error("invalid boolean for {key}: '{value}'")]
    InvalidBool { key: String, value: String },

    /// The endpoint list was not a JSON array of `{url, name}` objects.
    #[error("invalid endpoint list for {key}: {reason}")]
    InvalidEndpoints { key: String, reason: String },

    /// Any other malformed value.
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}
