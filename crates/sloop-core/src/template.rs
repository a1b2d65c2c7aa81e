//! Page template parsing.
//!
//! A template is HTML with `%(Name)` tokens. It is parsed once into literal
//! segments and typed [`Placeholder`] slots, so rendering is a single
//! concatenation and a misspelled token is reported instead of being left
//! in the page.

use crate::error::TemplateError;

/// A value slot the renderer knows how to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    DocumentTitle,
    PrimaryColor,
    DefaultTheme,
    EnableSearch,
    EnableCodeCopy,
    Version,
    Urls,
}

impl Placeholder {
    /// Look up a placeholder by the name used inside `%(...)`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "DocumentTitle" => Some(Self::DocumentTitle),
            "PrimaryColor" => Some(Self::PrimaryColor),
            "DefaultTheme" => Some(Self::DefaultTheme),
            "EnableSearch" => Some(Self::EnableSearch),
            "EnableCodeCopy" => Some(Self::EnableCodeCopy),
            "Version" => Some(Self::Version),
            "Urls" => Some(Self::Urls),
            _ => None,
        }
    }

    /// The name used inside `%(...)`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DocumentTitle => "DocumentTitle",
            Self::PrimaryColor => "PrimaryColor",
            Self::DefaultTheme => "DefaultTheme",
            Self::EnableSearch => "EnableSearch",
            Self::EnableCodeCopy => "EnableCodeCopy",
            Self::Version => "Version",
            Self::Urls => "Urls",
        }
    }
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// A parsed page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    source_len: usize,
}

/// Filled-in values for every placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    /// Already HTML-escaped.
    pub document_title: String,
    /// Already HTML-escaped.
    pub primary_color: String,
    pub default_theme: String,
    pub enable_search: bool,
    pub enable_code_copy: bool,
    pub version: String,
    /// JSON array text.
    pub urls: String,
}

impl PageContext {
    fn value(&self, slot: Placeholder) -> &str {
        match slot {
            Placeholder::DocumentTitle => &self.document_title,
            Placeholder::PrimaryColor => &self.primary_color,
            Placeholder::DefaultTheme => &self.default_theme,
            Placeholder::EnableSearch => bool_str(self.enable_search),
            Placeholder::EnableCodeCopy => bool_str(self.enable_code_copy),
            Placeholder::Version => &self.version,
            Placeholder::Urls => &self.urls,
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl Template {
    /// Parse raw template text.
    ///
    /// A token is `%(` followed by one or more ASCII alphanumerics and `)`.
    /// Any other use of `%(` is kept as literal text.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownPlaceholder`] for a well-formed token
    /// whose name is not a [`Placeholder`].
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(found) = source[cursor..].find("%(") {
            let open = cursor.saturating_add(found);
            let name_start = open.saturating_add(2);
            let name_len = source[name_start..]
                .bytes()
                .take_while(u8::is_ascii_alphanumeric)
                .count();
            let close = name_start.saturating_add(name_len);

            if name_len == 0 || source.as_bytes().get(close) != Some(&b')') {
                cursor = name_start;
                continue;
            }

            let name = &source[name_start..close];
            let slot = Placeholder::from_name(name).ok_or_else(|| {
                TemplateError::UnknownPlaceholder {
                    name: name.to_owned(),
                    offset: open,
                }
            })?;

            if open > literal_start {
                segments.push(Segment::Literal(source[literal_start..open].to_owned()));
            }
            segments.push(Segment::Slot(slot));
            cursor = close.saturating_add(1);
            literal_start = cursor;
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(source[literal_start..].to_owned()));
        }

        Ok(Self {
            segments,
            source_len: source.len(),
        })
    }

    /// The parsed pieces, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template uses the given placeholder at least once.
    #[must_use]
    pub fn uses(&self, slot: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Slot(p) if *p == slot))
    }

    /// Fill every slot from `ctx`.
    #[must_use]
    pub fn fill(&self, ctx: &PageContext) -> String {
        let mut out = String::with_capacity(self.source_len.saturating_add(ctx.urls.len()));
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(ctx.value(*slot)),
            }
        }
        out
    }
}
