//! Format string rendering used by template handlers.

use crate::escape::escape_entities;
use bt_types::Attributes;
use regex::{Captures, Regex};
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Placeholder for the rendered content.
pub const CONTENT_PLACEHOLDER: &str = "0";

/// Substitute placeholders in `template`.
///
/// * `{0}` is replaced by `content` as is.
/// * `{name}` is replaced by the value of attribute `name`, html escaped with quotes.
/// * `{!name}` is replaced by the raw value of attribute `name`.
///
/// Placeholders referring to a missing attribute are left untouched.
///
/// ```
/// use bt_handler::template::format_template;
/// use bt_types::Attributes;
///
/// let attrs = [("default", "a\"b")].into_iter().collect::<Attributes>();
/// assert_eq!(
///     format_template("<p title=\"{default}\">{0}{x}</p>", &attrs, "<b>c</b>"),
///     "<p title=\"a&#34;b\"><b>c</b>{x}</p>"
/// );
/// ```
pub fn format_template(template: &str, attrs: &Attributes, content: &str) -> String {
    let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([^}]+)\}").unwrap());

    regex
        .replace_all(template, |caps: &Captures| {
            let group = &caps[1];
            let (name, escape) = match group.strip_prefix('!') {
                Some(v) => (v, false),
                None => (group, group != CONTENT_PLACEHOLDER),
            };

            let value = if name == CONTENT_PLACEHOLDER {
                Some(content)
            } else {
                attrs.get(name)
            };

            match value {
                Some(v) if escape => escape_entities(v, true),
                Some(v) => v.to_owned(),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_raw() {
        assert_eq!(
            format_template("<b>{0}</b>", &Attributes::new(), "<i>x</i>"),
            "<b><i>x</i></b>"
        );
        assert_eq!(
            format_template("<b>{!0}</b>", &Attributes::new(), "<i>x</i>"),
            "<b><i>x</i></b>"
        );
    }

    #[test]
    fn test_attribute_escaping() {
        let attrs = [("default", "<x>")].into_iter().collect::<Attributes>();
        assert_eq!(format_template("{default}", &attrs, ""), "&lt;x&gt;");
        assert_eq!(format_template("{!default}", &attrs, ""), "<x>");
    }

    #[test]
    fn test_missing_placeholder_kept() {
        assert_eq!(
            format_template("a{missing}b{!gone}", &Attributes::new(), ""),
            "a{missing}b{!gone}"
        );
    }
}
