use crate::EQUAL;
use bt_handler::escape::strip_quotes;
use bt_types::{Attributes, DEFAULT_ATTR};

/// Characters ending an unquoted value.
fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Check a new `name=` pair starts at `pos`: whitespace followed by a word having `=` after its
/// first character.
fn new_attr_ahead(chars: &[char], pos: usize) -> bool {
    if !chars.get(pos).is_some_and(|x| x.is_whitespace()) {
        return false;
    }
    chars[pos + 1..]
        .iter()
        .take_while(|x| !x.is_whitespace())
        .skip(1)
        .any(|x| *x == EQUAL)
}

/// Quoted value starting at `start`, the opening quote.
///
/// Return the inner text and the position after the closing quote. A backslash escaped quote
/// does not close the value unless no other quote follows.
fn quoted_value(chars: &[char], start: usize) -> Option<(String, usize)> {
    let quote = chars[start];
    let mut last_escaped = None;
    let mut pos = start + 1;
    while pos < chars.len() {
        if chars[pos] == quote {
            return Some((chars[start + 1..pos].iter().collect(), pos + 1));
        }
        if chars[pos] == '\\' && chars.get(pos + 1) == Some(&quote) {
            last_escaped = Some(pos + 1);
            pos += 2;
            continue;
        }
        pos += 1;
    }

    let end = last_escaped?;
    Some((chars[start + 1..end].iter().collect(), end + 1))
}

/// Unquoted value starting at `start`, ends before the next `name=` pair or line break.
fn unquoted_value(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut pos = start;
    let end = loop {
        match chars.get(pos) {
            None => break pos,
            Some(ch) if is_line_terminator(*ch) => break pos,
            Some(_) if new_attr_ahead(chars, pos + 1) => break pos + 1,
            Some(_) => pos += 1,
        }
    };

    if end == start {
        return None;
    }
    Some((chars[start..end].iter().collect(), end))
}

/// Name starting at `start` and the position of the `=` after it.
fn attr_name(chars: &[char], start: usize) -> Option<(String, usize)> {
    let len = chars[start..]
        .iter()
        .take_while(|x| !x.is_whitespace() && **x != EQUAL)
        .count();
    if len == 0 || chars.get(start + len) != Some(&EQUAL) {
        return None;
    }
    Some((chars[start..start + len].iter().collect(), start + len))
}

/// Parse the attribute part of an open tag, the text after the tag name.
///
/// * `=value` with no other `=` is the default value, quotes stripped.
/// * Otherwise `name=value` pairs, a leading `=value` is the default. Values are quoted with `"`
///   or `'`, or run until the next pair.
///
/// Names are lower-cased, later pairs replace former ones and empty values are dropped.
///
/// ```
/// use bt_parser::tokenize_attrs;
///
/// let attrs = tokenize_attrs(r#"=300x200 Alt="a \"b\"" title=c d"#);
/// assert_eq!(attrs.default_value(), Some("300x200"));
/// assert_eq!(attrs.get("alt"), Some(r#"a "b""#));
/// assert_eq!(attrs.get("title"), Some("c d"));
/// ```
pub fn tokenize_attrs(input: &str) -> Attributes {
    let mut attrs = Attributes::new();

    if let Some(value) = input.strip_prefix(EQUAL) {
        if !value.contains(EQUAL) {
            let value = strip_quotes(value);
            if !value.is_empty() {
                attrs.insert(DEFAULT_ATTR, value);
            }
            return attrs;
        }
    }

    let input = if input.starts_with(EQUAL) {
        format!("{DEFAULT_ATTR}{input}")
    } else {
        input.to_owned()
    };
    let chars = input.chars().collect::<Vec<_>>();

    let mut pos = 0;
    while pos < chars.len() {
        let Some((name, eq)) = attr_name(&chars, pos) else {
            pos += 1;
            continue;
        };

        let value = match chars.get(eq + 1) {
            Some('"' | '\'') => quoted_value(&chars, eq + 1)
                .map(|(v, end)| (strip_quotes(&v), end))
                .or_else(|| unquoted_value(&chars, eq + 1)),
            _ => unquoted_value(&chars, eq + 1),
        };

        match value {
            Some((value, end)) => {
                if !value.is_empty() {
                    attrs.insert(name.to_lowercase(), value);
                }
                pos = end;
            }
            None => pos += 1,
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(String, String)> {
        tokenize_attrs(input)
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    fn expected(v: &[(&str, &str)]) -> Vec<(String, String)> {
        v.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_only() {
        assert_eq!(pairs("=bar"), expected(&[("default", "bar")]));
        assert_eq!(pairs("=\"sans-serif\""), expected(&[("default", "sans-serif")]));
        assert_eq!(pairs("=rgb(0,0,0)"), expected(&[("default", "rgb(0,0,0)")]));
        assert!(pairs("=").is_empty());
        assert!(pairs("").is_empty());
    }

    #[test]
    fn test_pairs() {
        assert_eq!(
            pairs("width=1 HEIGHT=2"),
            expected(&[("width", "1"), ("height", "2")])
        );
        assert_eq!(
            pairs("=bar test=123"),
            expected(&[("default", "bar"), ("test", "123")])
        );
        assert_eq!(pairs("a=1 a=2"), expected(&[("a", "2")]));
    }

    #[test]
    fn test_unquoted_value_with_spaces() {
        assert_eq!(
            pairs("=John Smith date=today"),
            expected(&[("default", "John Smith"), ("date", "today")])
        );
        // `=` as the first character of a word does not start a pair.
        assert_eq!(pairs("a=x =y"), expected(&[("a", "x =y")]));
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(
            pairs(r#"a="x y" b='z'"#),
            expected(&[("a", "x y"), ("b", "z")])
        );
        assert_eq!(pairs(r#"a="x \"q\" y""#), expected(&[("a", r#"x "q" y"#)]));
        assert_eq!(pairs(r#"a="""#), Vec::<(String, String)>::new());
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(pairs(r#"a="x"#), expected(&[("a", "\"x")]));
        assert_eq!(pairs(r#"a="x\" y"#), expected(&[("a", "x\\")]));
    }

    #[test]
    fn test_value_stops_at_line_break() {
        assert_eq!(pairs("a=x\ny"), expected(&[("a", "x")]));
    }
}
