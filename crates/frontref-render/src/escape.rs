//! HTML escaping for plain text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Escape the five HTML-reserved characters.
///
/// `&`, `<`, `>`, `"` and `'` become `&amp;`, `&lt;`, `&gt;`, `&quot;` and
/// `&#039;`. Everything else is left alone. Escaping is not idempotent:
/// escaping `&amp;` again yields `&amp;amp;`.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"[&<>"']"#).expect("Invalid escape regex"));

    RE.replace_all(text, |caps: &Captures| match &caps[0] {
        "&" => "&amp;",
        "<" => "&lt;",
        ">" => "&gt;",
        "\"" => "&quot;",
        _ => "&#039;",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html(">"), "&gt;");
        assert_eq!(escape_html("\""), "&quot;");
        assert_eq!(escape_html("'"), "&#039;");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<button class="btn">OK</button>"#),
            "&lt;button class=&quot;btn&quot;&gt;OK&lt;/button&gt;"
        );
    }

    #[test]
    fn leaves_other_text_untouched() {
        let text = "noop() {} // 확인 🔘\n\ttabs";
        assert!(matches!(escape_html(text), Cow::Borrowed(_)));
        assert_eq!(escape_html(text), text);
    }

    #[test]
    fn escaping_twice_differs_from_once() {
        let once = escape_html("a & b");
        let twice = escape_html(&once).into_owned();

        assert_eq!(once, "a &amp; b");
        assert_eq!(twice, "a &amp;amp; b");
        assert_ne!(once, twice);
    }
}
