//! Server configuration for Swagger Sloop.
//!
//! Loads configuration from environment variables with the documented
//! defaults. Every setting can be overridden via a `SLOOP_*` variable.

use std::net::SocketAddr;
use std::path::PathBuf;

use sloop_core::config::{SloopSettings, SwaggerEndpoint};
use sloop_core::error::ConfigError;

/// Default listen address when neither `SLOOP_BIND_ADDR` nor `PORT` is set.
const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Serve assets from this directory instead of the embedded copies.
    pub asset_dir: Option<PathBuf>,
    /// Documentation UI settings.
    pub sloop: SloopSettings,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `SLOOP_BIND_ADDR`: full bind address (default: `127.0.0.1:8080`)
    /// - `PORT`: port to bind on `0.0.0.0` when `SLOOP_BIND_ADDR` is unset
    /// - `SLOOP_LOG_LEVEL`: log filter (default: `info`)
    /// - `SLOOP_ASSET_DIR`: directory to serve assets from (default: embedded)
    /// - `SLOOP_ENABLED`, `SLOOP_ROUTE_PREFIX`, `SLOOP_DOCUMENT_TITLE`,
    ///   `SLOOP_PRIMARY_COLOR`, `SLOOP_DEFAULT_THEME`, `SLOOP_ENABLE_SEARCH`,
    ///   `SLOOP_ENABLE_CODE_COPY`, `SLOOP_INLINE_RESOURCES`
    /// - `SLOOP_SWAGGER_ENDPOINTS`: JSON array of `{"url", "name"}`
    /// - `SLOOP_ADDITIONAL_STYLESHEETS`, `SLOOP_ADDITIONAL_SCRIPTS`: comma-separated URLs
    /// - `SLOOP_OAUTH_CLIENT_ID`, `SLOOP_OAUTH_CLIENT_SECRET`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a malformed value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Priority: SLOOP_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Some(addr) = lookup("SLOOP_BIND_ADDR") {
            addr.parse().map_err(|e| ConfigError::Invalid {
                key: "SLOOP_BIND_ADDR".to_owned(),
                reason: format!("{e}"),
            })?
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().map_err(|e| ConfigError::Invalid {
                key: "PORT".to_owned(),
                reason: format!("{e}"),
            })?;
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(DEFAULT_BIND_ADDR)
        };

        let log_level = lookup("SLOOP_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());
        let asset_dir = lookup("SLOOP_ASSET_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let sloop = settings_from_lookup(&lookup)?;

        Ok(Self {
            bind_addr,
            log_level,
            asset_dir,
            sloop,
        })
    }
}

/// Build [`SloopSettings`] from `SLOOP_*` keys, keeping defaults for unset ones.
///
/// # Errors
///
/// Returns [`ConfigError`] if a boolean or the endpoint list is malformed.
pub fn settings_from_lookup<F>(lookup: &F) -> Result<SloopSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = SloopSettings::default();

    if let Some(v) = bool_var(lookup, "SLOOP_ENABLED")? {
        settings.enabled = v;
    }
    if let Some(v) = lookup("SLOOP_ROUTE_PREFIX") {
        settings.route_prefix = v;
    }
    settings.oauth_client_id = lookup("SLOOP_OAUTH_CLIENT_ID");
    settings.oauth_client_secret = lookup("SLOOP_OAUTH_CLIENT_SECRET");

    let render = &mut settings.render;
    if let Some(v) = lookup("SLOOP_DOCUMENT_TITLE") {
        render.document_title = v;
    }
    if let Some(v) = lookup("SLOOP_PRIMARY_COLOR") {
        render.primary_color = v;
    }
    if let Some(v) = lookup("SLOOP_DEFAULT_THEME") {
        render.default_theme = v;
    }
    if let Some(v) = bool_var(lookup, "SLOOP_ENABLE_SEARCH")? {
        render.enable_search = v;
    }
    if let Some(v) = bool_var(lookup, "SLOOP_ENABLE_CODE_COPY")? {
        render.enable_code_copy = v;
    }
    if let Some(v) = bool_var(lookup, "SLOOP_INLINE_RESOURCES")? {
        render.inline_resources = v;
    }
    if let Some(raw) = lookup("SLOOP_SWAGGER_ENDPOINTS") {
        render.swagger_endpoints = parse_endpoints("SLOOP_SWAGGER_ENDPOINTS", &raw)?;
    }
    if let Some(raw) = lookup("SLOOP_ADDITIONAL_STYLESHEETS") {
        render.additional_stylesheets = parse_list(&raw);
    }
    if let Some(raw) = lookup("SLOOP_ADDITIONAL_SCRIPTS") {
        render.additional_scripts = parse_list(&raw);
    }

    Ok(settings)
}

fn bool_var<F>(lookup: &F, key: &str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|raw| parse_bool(key, &raw)).transpose()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_owned(),
            value: raw.to_owned(),
        }),
    }
}

fn parse_endpoints(key: &str, raw: &str) -> Result<Vec<SwaggerEndpoint>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| ConfigError::InvalidEndpoints {
        key: key.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
