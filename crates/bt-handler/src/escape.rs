//! Escaping helpers for text placed into html.

use regex::Regex;
use std::sync::OnceLock;

static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
static VALID_SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();
static ESCAPED_CHAR_REGEX: OnceLock<Regex> = OnceLock::new();

/// Escape html special characters in `text`.
///
/// Line breaks turn into `<br />` and every two spaces into `&nbsp; ` so the text keeps its
/// layout. Quote characters are only escaped when `escape_quotes` is true, which is required
/// for text placed inside attribute values.
pub fn escape_entities(text: &str, escape_quotes: bool) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            ' ' if chars.peek() == Some(&' ') => {
                chars.next();
                output.push_str("&nbsp; ");
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                output.push_str("<br />");
            }
            '\n' => output.push_str("<br />"),
            '"' if escape_quotes => output.push_str("&#34;"),
            '\'' if escape_quotes => output.push_str("&#39;"),
            '`' if escape_quotes => output.push_str("&#96;"),
            v => output.push(v),
        }
    }
    output
}

/// Neutralise urls with a scheme not in the allow list.
///
/// Urls without scheme, relative ones and allowed schemes are returned as is. Others get a `./`
/// prefix so browsers resolve them as a relative path instead of executing the scheme.
pub fn escape_uri_scheme(url: &str) -> String {
    let has_scheme = SCHEME_REGEX.get_or_init(|| Regex::new(r"^[^/]*:").unwrap());
    let valid = VALID_SCHEME_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)^(https?|s?ftp|mailto|spotify|skype|ssh|teamspeak|tel):|(//)|data:image/(png|bmp|gif|p?jpe?g);",
        )
        .unwrap()
    });

    if url.is_empty() || !has_scheme.is_match(url) || valid.is_match(url) {
        return url.to_owned();
    }

    tracing::debug!("neutralise url with disallowed scheme: {url:?}");
    format!("./{url}")
}

/// Undo backslash escapes in `value` and strip one pair of surrounding matching quotes.
///
/// ```
/// use bt_handler::escape::strip_quotes;
///
/// assert_eq!(strip_quotes(r#""sans-serif""#), "sans-serif");
/// assert_eq!(strip_quotes(r#"'a\'b'"#), "a'b");
/// assert_eq!(strip_quotes("\"half"), "\"half");
/// ```
pub fn strip_quotes(value: &str) -> String {
    let unescaped =
        ESCAPED_CHAR_REGEX.get_or_init(|| Regex::new(r"(?s)\\(.)").unwrap()).replace_all(value, "$1");

    for quote in ['"', '\''] {
        if unescaped.len() >= 2 && unescaped.starts_with(quote) && unescaped.ends_with(quote) {
            return unescaped[1..unescaped.len() - 1].to_owned();
        }
    }

    unescaped.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_entities() {
        assert_eq!(escape_entities("a < b && c > d", false), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_entities("a  b   c", false), "a&nbsp; b&nbsp;  c");
        assert_eq!(escape_entities("1\r\n2\r3\n4", false), "1<br />2<br />3<br />4");
    }

    #[test]
    fn test_escape_entities_quotes() {
        assert_eq!(escape_entities(r#""'`"#, false), r#""'`"#);
        assert_eq!(escape_entities(r#""'`"#, true), "&#34;&#39;&#96;");
    }

    #[test]
    fn test_escape_uri_scheme() {
        assert_eq!(escape_uri_scheme("https://example.com"), "https://example.com");
        assert_eq!(escape_uri_scheme("MAILTO:a@b.c"), "MAILTO:a@b.c");
        assert_eq!(escape_uri_scheme("//cdn.example.com/x.png"), "//cdn.example.com/x.png");
        assert_eq!(escape_uri_scheme("foo/bar:baz"), "foo/bar:baz");
        assert_eq!(escape_uri_scheme("bar"), "bar");
        assert_eq!(
            escape_uri_scheme("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
        assert_eq!(escape_uri_scheme("javascript:alert(1)"), "./javascript:alert(1)");
        assert_eq!(escape_uri_scheme("data:text/html;base64,AAAA"), "./data:text/html;base64,AAAA");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes(r#"'x'"#), "x");
        assert_eq!(strip_quotes(r#""x'"#), r#""x'"#);
        assert_eq!(strip_quotes(r#"\"x\""#), "x");
        assert_eq!(strip_quotes("\"\""), "");
    }
}
