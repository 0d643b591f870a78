//! Markup escaping for submitted text.
//!
//! Items are escaped once, when they are written to the store. Views insert
//! stored text verbatim, so anything reaching the store must already be safe
//! to place inside HTML element content and attribute values.

/// Escapes characters that are significant in HTML.
///
/// `&` is handled in the same pass as the other characters, so entities
/// produced here are never escaped twice.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Returns `true` if the text is empty once surrounding whitespace is removed.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_script_tag() {
        assert_eq!(
            escape("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_quotes_and_ampersand() {
        assert_eq!(escape(r#"a & "b" 'c'"#), "a &amp; &#34;b&#34; 'c'");
        assert_eq!(escape("It's done"), "It's done");
    }

    #[test]
    fn test_escape_existing_entity() {
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_preserves_whitespace_and_unicode() {
        assert_eq!(escape("  Buy milk ü  "), "  Buy milk ü  ");
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n \u{3000}"));
        assert!(!is_blank("  x  "));
    }
}
