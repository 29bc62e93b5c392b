use crate::error::HandlerError;
use crate::handler::{Condition, Handler};
use bt_types::QuoteType;
use serde::Deserialize;

/// Serializable form of [Handler], used to load handlers from config files.
///
/// Only template rendering is available here, render functions must be set in code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HandlerDefinition {
    pub html: Option<String>,
    pub bbcode: Option<String>,
    pub conditions: Vec<Condition>,
    pub quote_type: Option<QuoteType>,
    pub is_self_closing: bool,
    pub is_inline: Option<bool>,
    pub is_html_inline: Option<bool>,
    pub allowed_children: Option<Vec<String>>,
    pub allows_empty: bool,
    pub exclude_closing: bool,
    pub skip_last_line_break: bool,
    pub strict_match: bool,
    pub break_before: Option<bool>,
    pub break_start: Option<bool>,
    pub break_end: Option<bool>,
    pub break_after: Option<bool>,
    pub closed_by: Option<Vec<String>>,
}

impl HandlerDefinition {
    /// Validate the definition and build a handler registered as `name`.
    pub fn into_handler(self, name: &str) -> Result<Handler, HandlerError> {
        if name.is_empty() {
            return Err(HandlerError::EmptyName);
        }
        if name
            .chars()
            .any(|x| x == '[' || x == ']' || x == '=' || x.is_whitespace())
        {
            return Err(HandlerError::InvalidName(name.to_owned()));
        }
        if self.html.is_none() && self.bbcode.is_none() {
            return Err(HandlerError::NoRender(name.to_owned()));
        }
        if let Some(index) = self.conditions.iter().position(|x| x.is_empty()) {
            return Err(HandlerError::EmptyCondition {
                name: name.to_owned(),
                index,
            });
        }

        Ok(Handler {
            conditions: self.conditions,
            html: self.html.map(Into::into),
            bbcode: self.bbcode.map(Into::into),
            quote_type: self.quote_type,
            is_self_closing: self.is_self_closing,
            is_inline: self.is_inline.unwrap_or(true),
            is_html_inline: self.is_html_inline,
            allowed_children: self.allowed_children,
            allows_empty: self.allows_empty,
            exclude_closing: self.exclude_closing,
            skip_last_line_break: self.skip_last_line_break,
            strict_match: self.strict_match,
            break_before: self.break_before,
            break_start: self.break_start,
            break_end: self.break_end,
            break_after: self.break_after,
            closed_by: self.closed_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Render;

    #[test]
    fn test_from_toml() {
        let definition: HandlerDefinition = toml::from_str(
            r#"
html = "<span class=\"spoiler\">{0}</span>"
bbcode = "[spoiler]{0}[/spoiler]"
is_inline = false
break_after = false
quote_type = "never"

[[conditions]]
tag = "span"
classes = ["spoiler"]

[[conditions]]
styles = [{ name = "color", values = ["black"] }]
"#,
        )
        .unwrap();

        let handler = definition.into_handler("spoiler").unwrap();
        assert!(!handler.is_inline);
        assert_eq!(handler.break_after, Some(false));
        assert_eq!(handler.break_before, None);
        assert_eq!(handler.quote_type, Some(QuoteType::Never));
        assert_eq!(handler.conditions.len(), 2);
        assert!(matches!(handler.html, Some(Render::Template(_))));
    }

    #[test]
    fn test_invalid_definitions() {
        let template = HandlerDefinition {
            html: Some("<p>{0}</p>".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            template.clone().into_handler("").unwrap_err(),
            HandlerError::EmptyName
        );
        assert_eq!(
            template.clone().into_handler("a b").unwrap_err(),
            HandlerError::InvalidName("a b".to_owned())
        );
        assert_eq!(
            HandlerDefinition::default().into_handler("p").unwrap_err(),
            HandlerError::NoRender("p".to_owned())
        );

        let empty_condition = HandlerDefinition {
            conditions: vec![Condition::tag("p"), Condition::default()],
            ..template
        };
        assert_eq!(
            empty_condition.into_handler("p").unwrap_err(),
            HandlerError::EmptyCondition {
                name: "p".to_owned(),
                index: 1
            }
        );
    }
}
