//! Settings for the documentation UI.
//!
//! [`SloopSettings`] is the whole configuration surface: whether the UI is
//! mounted, where, and the OAuth pass-through values. The part the renderer
//! reads is split out as [`RenderConfig`] and flattened into it, so both
//! deserialize from one flat map of keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Endpoint shown when no endpoint is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "/v3/api-docs";
/// Display name of the default endpoint.
pub const DEFAULT_ENDPOINT_NAME: &str = "API V1";

/// A named URL of an OpenAPI document shown in the UI's selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerEndpoint {
    /// Where the OpenAPI document is served.
    pub url: String,
    /// Label shown in the selector.
    pub name: String,
}

impl SwaggerEndpoint {
    /// Create an endpoint entry.
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// The values the page renderer substitutes into the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RenderConfig {
    /// Page title.
    pub document_title: String,
    /// Primary UI color. Passed through as-is, not validated.
    pub primary_color: String,
    /// Initial theme (`light`, `dark` or `auto`). Lower-cased when rendered.
    pub default_theme: String,
    /// Enable the global search box (Ctrl+K).
    pub enable_search: bool,
    /// Enable copy buttons on code blocks.
    pub enable_code_copy: bool,
    /// OpenAPI documents listed in the selector, in display order.
    pub swagger_endpoints: Vec<SwaggerEndpoint>,
    /// Extra stylesheet URLs injected before `</head>`.
    pub additional_stylesheets: Vec<String>,
    /// Extra script URLs injected before `</body>`.
    pub additional_scripts: Vec<String>,
    /// Embed the bundled CSS and JS in the page instead of linking them.
    pub inline_resources: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            document_title: "API Documentation".to_owned(),
            primary_color: "#5D87FF".to_owned(),
            default_theme: "auto".to_owned(),
            enable_search: true,
            enable_code_copy: true,
            swagger_endpoints: Vec::new(),
            additional_stylesheets: Vec::new(),
            additional_scripts: Vec::new(),
            inline_resources: false,
        }
    }
}

impl RenderConfig {
    /// The endpoints to list, falling back to the single default entry when
    /// none are configured.
    #[must_use]
    pub fn effective_endpoints(&self) -> Vec<SwaggerEndpoint> {
        if self.swagger_endpoints.is_empty() {
            vec![SwaggerEndpoint::new(
                DEFAULT_ENDPOINT_URL,
                DEFAULT_ENDPOINT_NAME,
            )]
        } else {
            self.swagger_endpoints.clone()
        }
    }

    /// Append an OpenAPI document to the selector.
    #[must_use]
    pub fn swagger_endpoint(mut self, url: impl Into<String>, name: impl Into<String>) -> Self {
        self.swagger_endpoints.push(SwaggerEndpoint::new(url, name));
        self
    }

    /// Inject an extra stylesheet.
    #[must_use]
    pub fn inject_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.additional_stylesheets.push(href.into());
        self
    }

    /// Inject an extra script.
    #[must_use]
    pub fn inject_javascript(mut self, src: impl Into<String>) -> Self {
        self.additional_scripts.push(src.into());
        self
    }
}

/// Full settings for mounting the documentation UI.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SloopSettings {
    /// Mount the UI at all.
    pub enabled: bool,
    /// Path segment the UI and its assets are served under (`docs` → `/docs/`).
    pub route_prefix: String,
    /// OAuth2 client id. Passed through; not used by the renderer.
    pub oauth_client_id: Option<String>,
    /// OAuth2 client secret. Passed through; not used by the renderer.
    pub oauth_client_secret: Option<String>,
    /// Values substituted into the page.
    #[serde(flatten)]
    pub render: RenderConfig,
}

impl Default for SloopSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            route_prefix: "swagger".to_owned(),
            oauth_client_id: None,
            oauth_client_secret: None,
            render: RenderConfig::default(),
        }
    }
}

impl SloopSettings {
    /// The route prefix without leading or trailing slashes.
    #[must_use]
    pub fn normalized_route_prefix(&self) -> &str {
        self.route_prefix.trim_matches('/')
    }
}

impl fmt::Debug for SloopSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SloopSettings")
            .field("enabled", &self.enabled)
            .field("route_prefix", &self.route_prefix)
            .field("oauth_client_id", &self.oauth_client_id)
            .field(
                "oauth_client_secret",
                &self.oauth_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field("render", &self.render)
            .finish()
    }
}
