//! Text and link sanitisation for values inserted into rendered markup.

/// Link schemes allowed in `href` attributes. Scheme-less values are treated as relative.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Escapes a value for use as HTML text content or inside a quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Returns an escaped `href` value, or `None` when the link is empty or uses a
/// scheme outside [`ALLOWED_SCHEMES`] (e.g. `javascript:`).
///
/// Browsers drop ASCII whitespace and control characters while parsing a
/// scheme, so they are stripped before the check.
pub fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let compact: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    if let Some(scheme) = scheme_of(&compact) {
        let scheme = scheme.to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return None;
        }
    }

    Some(escape_html(url))
}

/// The scheme part of a URL, if it has one (`scheme ":"` before any `/`, `?` or `#`).
fn scheme_of(url: &str) -> Option<&str> {
    let end = url.find([':', '/', '?', '#'])?;
    if !url[end..].starts_with(':') || end == 0 {
        return None;
    }
    let scheme = &url[..end];
    let valid = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_leaves_plain_text_and_unicode() {
        assert_eq!(escape_html("Zürich — 📍"), "Zürich — 📍");
    }

    #[test]
    fn test_safe_href_allows_web_and_mail_links() {
        assert_eq!(
            safe_href("https://github.com/asha").as_deref(),
            Some("https://github.com/asha")
        );
        assert!(safe_href("HTTP://example.com").is_some());
        assert!(safe_href("mailto:asha@example.com").is_some());
    }

    #[test]
    fn test_safe_href_allows_scheme_less_links() {
        assert_eq!(
            safe_href("linkedin.com/in/asha").as_deref(),
            Some("linkedin.com/in/asha")
        );
        assert!(safe_href("/relative/path?a=b:c").is_some());
    }

    #[test]
    fn test_safe_href_rejects_script_schemes() {
        assert!(safe_href("javascript:alert(1)").is_none());
        assert!(safe_href("  JavaScript:alert(1)").is_none());
        assert!(safe_href("java\tscript:alert(1)").is_none());
        assert!(safe_href("data:text/html,<b>x</b>").is_none());
    }

    #[test]
    fn test_safe_href_escapes_quotes() {
        assert_eq!(
            safe_href(r#"https://x.dev/"onmouseover="a"#).as_deref(),
            Some("https://x.dev/&quot;onmouseover=&quot;a")
        );
    }

    #[test]
    fn test_safe_href_empty_is_none() {
        assert!(safe_href("   ").is_none());
    }
}
