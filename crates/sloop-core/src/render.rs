//! Documentation page rendering.
//!
//! [`render`] turns a parsed [`Template`] and a [`RenderConfig`] into the
//! final HTML. It is pure apart from logging: the time and the inline asset
//! text are passed in. [`DocPage`] is the service around it that loads the
//! template from an [`AssetSource`], consults the [`AssetCache`] and reads
//! the [`Clock`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use crate::assets::{AssetCache, AssetSource, INDEX_HTML};
use crate::clock::Clock;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::escape::escape_html;
use crate::template::{PageContext, Template};

static STYLESHEET_LINK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"<link rel="stylesheet" href="\./swagger-sloop\.css[^"]*">"#).ok()
});

static SCRIPT_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"<script src="\./swagger-sloop\.js[^"]*"></script>"#).ok()
});

/// Stylesheet and script text to embed in place of the external tags.
#[derive(Debug, Clone, Default)]
pub struct InlineAssets {
    pub css: Option<Arc<str>>,
    pub js: Option<Arc<str>>,
}

/// Render the documentation page.
///
/// `inline` is only consulted when `config.inline_resources` is set. A
/// missing stylesheet or script there leaves the external tag in place.
#[must_use]
pub fn render(
    template: &Template,
    config: &RenderConfig,
    now: DateTime<Utc>,
    inline: Option<&InlineAssets>,
) -> String {
    let ctx = PageContext {
        document_title: escape_html(&config.document_title),
        primary_color: escape_html(&config.primary_color),
        default_theme: config.default_theme.to_lowercase(),
        enable_search: config.enable_search,
        enable_code_copy: config.enable_code_copy,
        version: version_token(now),
        urls: endpoints_json(config),
    };

    let mut html = template.fill(&ctx);

    if config.inline_resources {
        if let Some(assets) = inline {
            html = inline_resources(&html, assets);
        }
    }

    if !config.additional_stylesheets.is_empty() {
        let tags: String = config
            .additional_stylesheets
            .iter()
            .map(|href| format!("    <link rel=\"stylesheet\" href=\"{}\">\n", escape_html(href)))
            .collect();
        html = insert_before(&html, "</head>", &tags);
    }

    if !config.additional_scripts.is_empty() {
        let tags: String = config
            .additional_scripts
            .iter()
            .map(|src| format!("    <script src=\"{}\"></script>\n", escape_html(src)))
            .collect();
        html = insert_before(&html, "</body>", &tags);
    }

    html
}

/// Cache-busting token: milliseconds since the Unix epoch.
fn version_token(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// The endpoint selector as a JSON array. Serialization failure degrades
/// to an empty array.
fn endpoints_json(config: &RenderConfig) -> String {
    let endpoints = config.effective_endpoints();
    serde_json::to_string(&endpoints).unwrap_or_else(|e| {
        warn!(error = %e, "failed to serialize endpoint list, rendering an empty selector");
        "[]".to_owned()
    })
}

fn inline_resources(html: &str, assets: &InlineAssets) -> String {
    let mut html = html.to_owned();

    if let (Some(css), Some(re)) = (assets.css.as_deref(), STYLESHEET_LINK.as_ref()) {
        let block = format!("<style>\n{css}\n</style>");
        html = re.replacen(&html, 1, NoExpand(&block)).into_owned();
    }

    if let (Some(js), Some(re)) = (assets.js.as_deref(), SCRIPT_TAG.as_ref()) {
        let block = format!("<script>\n{js}\n</script>");
        html = re.replacen(&html, 1, NoExpand(&block)).into_owned();
    }

    debug!(
        css = assets.css.is_some(),
        js = assets.js.is_some(),
        "inlined page resources"
    );
    html
}

/// Insert `text` immediately before the first occurrence of `anchor`.
/// Leaves `html` unchanged when the anchor is absent.
fn insert_before(html: &str, anchor: &str, text: &str) -> String {
    match html.find(anchor) {
        Some(at) => {
            let mut out = String::with_capacity(html.len().saturating_add(text.len()));
            out.push_str(&html[..at]);
            out.push_str(text);
            out.push_str(&html[at..]);
            out
        }
        None => html.to_owned(),
    }
}

/// Renders the page from a template held by an [`AssetSource`].
pub struct DocPage {
    config: RenderConfig,
    source: Arc<dyn AssetSource>,
    cache: Arc<AssetCache>,
    clock: Arc<dyn Clock>,
}

impl DocPage {
    /// Create a page renderer.
    ///
    /// The cache is shared so several pages (or a restart of the router)
    /// reuse the same loaded assets.
    pub fn new(
        config: RenderConfig,
        source: Arc<dyn AssetSource>,
        cache: Arc<AssetCache>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            source,
            cache,
            clock,
        }
    }

    /// The configuration this page renders with.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The source the template and assets are read from.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn AssetSource> {
        &self.source
    }

    /// Load, parse and render the page.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if the source has no template.
    /// - [`RenderError::Asset`] if the template cannot be read.
    /// - [`RenderError::Template`] if the template has an unknown placeholder.
    pub async fn render(&self) -> Result<String, RenderError> {
        let raw = self
            .source
            .load(INDEX_HTML)
            .await?
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: INDEX_HTML.to_owned(),
            })?;
        let template = Template::parse(&raw)?;

        let inline = if self.config.inline_resources {
            Some(InlineAssets {
                css: self.cache.css(self.source.as_ref()).await,
                js: self.cache.js(self.source.as_ref()).await,
            })
        } else {
            None
        };

        Ok(render(
            &template,
            &self.config,
            self.clock.now(),
            inline.as_ref(),
        ))
    }
}

impl fmt::Debug for DocPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocPage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::assets::{EmbeddedAssets, SCRIPT, STYLESHEET};
    use crate::clock::FixedClock;
    use crate::error::AssetError;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>%(DocumentTitle)</title>
    <link rel="stylesheet" href="./swagger-sloop.css?v=%(Version)">
    <style>:root { --primary: %(PrimaryColor); }</style>
</head>
<body data-theme="%(DefaultTheme)">
    <script>
        window.SLOOP = { search: %(EnableSearch), copy: %(EnableCodeCopy), urls: %(Urls) };
    </script>
    <script src="./swagger-sloop.js?v=%(Version)"></script>
</body>
</html>
"#;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }

    fn template() -> Template {
        Template::parse(PAGE).unwrap()
    }

    #[test]
    fn substitutes_values() {
        let config = RenderConfig {
            document_title: "Pet Store".to_owned(),
            default_theme: "DARK".to_owned(),
            enable_code_copy: false,
            ..RenderConfig::default()
        };
        let html = render(&template(), &config, at(1_700_000_000_000), None);

        assert!(html.contains("<title>Pet Store</title>"));
        assert!(html.contains("--primary: #5D87FF;"));
        assert!(html.contains(r#"data-theme="dark""#));
        assert!(html.contains("search: true, copy: false"));
        assert!(html.contains("swagger-sloop.css?v=1700000000000"));
        assert!(!html.contains("%("));
    }

    #[test]
    fn empty_endpoint_list_renders_default_entry() {
        let html = render(&template(), &RenderConfig::default(), at(0), None);
        assert!(html.contains(r#"urls: [{"url":"/v3/api-docs","name":"API V1"}]"#));
    }

    #[test]
    fn endpoints_keep_input_order() {
        let config = RenderConfig::default()
            .swagger_endpoint("/v2.json", "V2")
            .swagger_endpoint("/v1.json", "V1");
        let html = render(&template(), &config, at(0), None);
        assert!(html.contains(
            r#"urls: [{"url":"/v2.json","name":"V2"},{"url":"/v1.json","name":"V1"}]"#
        ));
    }

    #[test]
    fn title_is_escaped_exactly_once() {
        let config = RenderConfig {
            document_title: "<script>\"&'".to_owned(),
            ..RenderConfig::default()
        };
        let html = render(&template(), &config, at(0), None);
        assert!(html.contains("<title>&lt;script&gt;&quot;&amp;&#39;</title>"));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn renders_differ_only_in_version_token() {
        let config = RenderConfig::default();
        let first = render(&template(), &config, at(1_000), None);
        let second = render(&template(), &config, at(2_000), None);

        assert_ne!(first, second);
        assert_eq!(first.replace("1000", "T"), second.replace("2000", "T"));
    }

    #[test]
    fn rendering_does_not_touch_config() {
        let config = RenderConfig {
            default_theme: "Light".to_owned(),
            ..RenderConfig::default()
        };
        let before = config.clone();
        let _ = render(&template(), &config, at(0), None);
        assert_eq!(config, before);
    }

    #[test]
    fn inlines_both_assets() {
        let config = RenderConfig {
            inline_resources: true,
            ..RenderConfig::default()
        };
        let assets = InlineAssets {
            css: Some(Arc::from("body { color: red; }")),
            js: Some(Arc::from("console.log('$1 ok');")),
        };
        let html = render(&template(), &config, at(0), Some(&assets));

        assert!(html.contains("<style>\nbody { color: red; }\n</style>"));
        assert!(html.contains("<script>\nconsole.log('$1 ok');\n</script>"));
        assert!(!html.contains("swagger-sloop.css"));
        assert!(!html.contains("swagger-sloop.js"));
    }

    #[test]
    fn missing_asset_keeps_external_tag() {
        let config = RenderConfig {
            inline_resources: true,
            ..RenderConfig::default()
        };
        let assets = InlineAssets {
            css: None,
            js: Some(Arc::from("go();")),
        };
        let html = render(&template(), &config, at(5), Some(&assets));

        assert!(html.contains(r#"<link rel="stylesheet" href="./swagger-sloop.css?v=5">"#));
        assert!(html.contains("<script>\ngo();\n</script>"));
    }

    #[test]
    fn inline_assets_ignored_when_disabled() {
        let assets = InlineAssets {
            css: Some(Arc::from("a{}")),
            js: Some(Arc::from("b()")),
        };
        let html = render(&template(), &RenderConfig::default(), at(0), Some(&assets));
        assert!(html.contains("./swagger-sloop.css"));
        assert!(html.contains("./swagger-sloop.js"));
    }

    #[test]
    fn injects_extra_tags_in_order_before_anchors() {
        let config = RenderConfig::default()
            .inject_stylesheet("/a.css")
            .inject_stylesheet("/b.css?x=1&y=2")
            .inject_javascript("/c.js");
        let html = render(&template(), &config, at(0), None);

        assert!(html.contains(concat!(
            "    <link rel=\"stylesheet\" href=\"/a.css\">\n",
            "    <link rel=\"stylesheet\" href=\"/b.css?x=1&amp;y=2\">\n",
            "</head>"
        )));
        assert!(html.contains("    <script src=\"/c.js\"></script>\n</body>"));
    }

    #[test]
    fn empty_injection_lists_leave_anchors_alone() {
        let html = render(&template(), &RenderConfig::default(), at(0), None);
        assert!(html.contains("</style>\n</head>"));
        assert!(html.contains("?v=0\"></script>\n</body>"));
    }

    #[test]
    fn injection_targets_only_first_anchor() {
        let template = Template::parse("<head></head><pre></head></pre>").unwrap();
        let config = RenderConfig::default().inject_stylesheet("/x.css");
        let html = render(&template, &config, at(0), None);
        assert_eq!(
            html,
            "<head>    <link rel=\"stylesheet\" href=\"/x.css\">\n</head><pre></head></pre>"
        );
    }

    struct MissingSource;

    #[async_trait::async_trait]
    impl AssetSource for MissingSource {
        async fn load_bytes(&self, _name: &str) -> Result<Option<Vec<u8>>, AssetError> {
            Ok(None)
        }
    }

    /// Serves only the template, so inlining has nothing to embed.
    struct TemplateOnly;

    #[async_trait::async_trait]
    impl AssetSource for TemplateOnly {
        async fn load_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AssetError> {
            Ok((name == INDEX_HTML).then(|| PAGE.as_bytes().to_vec()))
        }
    }

    fn page(config: RenderConfig, source: Arc<dyn AssetSource>) -> DocPage {
        DocPage::new(
            config,
            source,
            Arc::new(AssetCache::new()),
            Arc::new(FixedClock(at(7))),
        )
    }

    #[tokio::test]
    async fn doc_page_renders_embedded_template() {
        let page = page(RenderConfig::default(), Arc::new(EmbeddedAssets));
        let html = page.render().await.unwrap();
        assert!(html.contains("API Documentation"));
        assert!(html.contains(r#""url":"/v3/api-docs""#));
        assert!(!html.contains("%("));
    }

    #[tokio::test]
    async fn doc_page_inlines_embedded_assets() {
        let config = RenderConfig {
            inline_resources: true,
            ..RenderConfig::default()
        };
        let page = page(config, Arc::new(EmbeddedAssets));
        let html = page.render().await.unwrap();

        let css = EmbeddedAssets.load(STYLESHEET).await.unwrap().unwrap();
        let js = EmbeddedAssets.load(SCRIPT).await.unwrap().unwrap();
        assert!(html.contains(&css));
        assert!(html.contains(&js));
        assert!(!html.contains("href=\"./swagger-sloop.css"));
        assert!(!html.contains("src=\"./swagger-sloop.js"));
    }

    #[tokio::test]
    async fn doc_page_falls_back_when_assets_absent() {
        let config = RenderConfig {
            inline_resources: true,
            ..RenderConfig::default()
        };
        let page = page(config, Arc::new(TemplateOnly));
        let html = page.render().await.unwrap();
        assert!(html.contains(r#"<link rel="stylesheet" href="./swagger-sloop.css?v=7">"#));
        assert!(html.contains(r#"<script src="./swagger-sloop.js?v=7"></script>"#));
    }

    #[tokio::test]
    async fn doc_page_reports_missing_template() {
        let page = page(RenderConfig::default(), Arc::new(MissingSource));
        assert!(matches!(
            page.render().await,
            Err(RenderError::TemplateNotFound { .. })
        ));
    }
}
