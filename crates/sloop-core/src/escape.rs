//! HTML escaping for values placed into the page.

/// Escape `&`, `<`, `>`, `"` and `'` for use in HTML text or a quoted
/// attribute.
///
/// Works in a single pass over the input, so an `&` produced by one
/// replacement is never escaped again.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len().saturating_add(16));
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters_once() {
        assert_eq!(
            escape_html("<script>\"&'"),
            "&lt;script&gt;&quot;&amp;&#39;"
        );
    }

    #[test]
    fn already_escaped_input_is_escaped_literally() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("#5D87FF"), "#5D87FF");
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("Документация API"), "Документация API");
    }
}
