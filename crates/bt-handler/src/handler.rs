use crate::registry::HandlerRegistry;
use crate::template::format_template;
use bt_types::{Attributes, QuoteType, Token};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Signature of render functions.
pub type RenderFn = Arc<dyn Fn(&RenderContext<'_>) -> String + Send + Sync>;

/// Options passed down the converters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Converting the root level token list.
    pub is_root: bool,

    /// Emit tags without a usable handler as literal text instead of dropping them.
    pub lazy: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            is_root: true,
            lazy: true,
        }
    }
}

/// Everything a render function can see.
pub struct RenderContext<'a> {
    /// The open tag being rendered.
    pub token: &'a Token,

    /// Rendered children of `token`.
    pub content: String,

    pub registry: &'a HandlerRegistry,

    pub options: ConvertOptions,

    render_children: &'a dyn Fn(&[Token]) -> String,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        token: &'a Token,
        content: String,
        registry: &'a HandlerRegistry,
        options: ConvertOptions,
        render_children: &'a dyn Fn(&[Token]) -> String,
    ) -> Self {
        Self {
            token,
            content,
            registry,
            options,
            render_children,
        }
    }

    pub fn attributes(&self) -> &'a Attributes {
        &self.token.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.token.attrs.get(name)
    }

    /// Render `tokens` with the converter currently running, as non-root children.
    pub fn render_tokens(&self, tokens: &[Token]) -> String {
        (self.render_children)(tokens)
    }
}

/// How a tag is rendered into the target format.
#[derive(Clone)]
pub enum Render {
    /// Format string, see [format_template].
    Template(String),

    /// Arbitrary render function.
    Function(RenderFn),
}

impl Render {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        Render::Function(Arc::new(f))
    }

    pub fn render(&self, context: &RenderContext<'_>) -> String {
        match self {
            Render::Template(template) => {
                format_template(template, context.attributes(), &context.content)
            }
            Render::Function(f) => f(context),
        }
    }
}

impl From<&str> for Render {
    fn from(value: &str) -> Self {
        Render::Template(value.to_owned())
    }
}

impl From<String> for Render {
    fn from(value: String) -> Self {
        Render::Template(value)
    }
}

impl fmt::Debug for Render {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Render::Template(v) => f.debug_tuple("Template").field(v).finish(),
            Render::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Predicate on a single attribute or css property.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Predicate {
    /// Attribute name or css property name.
    pub name: String,

    /// Accepted values, `None` accepts any value as long as the key presents.
    #[serde(default)]
    pub values: Option<Vec<String>>,
}

impl Predicate {
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: None,
        }
    }

    pub fn one_of(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: Some(values.iter().map(|x| x.to_string()).collect()),
        }
    }

    fn matches(&self, actual: Option<&str>, strict: bool) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match &self.values {
            None => true,
            Some(values) => values.iter().any(|x| {
                if strict {
                    x == actual
                } else {
                    x.trim().eq_ignore_ascii_case(actual.trim())
                }
            }),
        }
    }
}

/// Describe an html element a handler accepts.
///
/// All parts given must match. A condition with no part at all never matches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Condition {
    /// Element name.
    pub tag: Option<String>,

    pub attributes: Vec<Predicate>,

    /// Inline css properties.
    pub styles: Vec<Predicate>,

    /// Any of the classes.
    pub classes: Vec<String>,
}

impl Condition {
    /// Match element by name.
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            ..Default::default()
        }
    }

    /// Match any element having css `property` set to one of `values`.
    pub fn style(property: impl Into<String>, values: &[&str]) -> Self {
        Self {
            styles: vec![Predicate::one_of(property, values)],
            ..Default::default()
        }
    }

    /// Match any element having css `property` set.
    pub fn has_style(property: impl Into<String>) -> Self {
        Self {
            styles: vec![Predicate::any(property)],
            ..Default::default()
        }
    }

    /// Additionally require attribute `name` presents.
    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Predicate::any(name));
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.attributes.is_empty()
            && self.styles.is_empty()
            && self.classes.is_empty()
    }

    /// Check `token` satisfies the condition.
    ///
    /// Values are compared trimmed and case-insensitive unless `strict`.
    pub fn matches(&self, token: &Token, strict: bool) -> bool {
        if self.is_empty() {
            return false;
        }

        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(&token.name) {
                return false;
            }
        }

        let attrs = &token.attrs;
        self.attributes
            .iter()
            .all(|x| x.matches(attrs.get(&x.name), strict))
            && self
                .styles
                .iter()
                .all(|x| x.matches(attrs.style(&x.name), strict))
            && (self.classes.is_empty()
                || self
                    .classes
                    .iter()
                    .any(|x| attrs.classes().iter().any(|c| c == x)))
    }
}

/// Describe how a tag behaves and renders.
///
/// The `break_*` flags are tri-state: `None` follows the parser options for block level tags,
/// `Some(true)` forces the break, `Some(false)` disables it.
#[derive(Clone, Debug)]
pub struct Handler {
    /// Conditions to find the handler for an html element.
    pub conditions: Vec<Condition>,

    /// Render into html.
    pub html: Option<Render>,

    /// Render into bbcode.
    pub bbcode: Option<Render>,

    /// Quote policy for attributes, overrides the parser option.
    pub quote_type: Option<QuoteType>,

    /// Tag has no content nor closing tag, e.g. `[hr]`.
    pub is_self_closing: bool,

    /// Inline or block level.
    pub is_inline: bool,

    /// Whether the rendered html is inline, only set if differs from `is_inline`.
    pub is_html_inline: Option<bool>,

    /// Tags allowed as children, `#` for text and `#newline` for line breaks.
    ///
    /// `None` allows all.
    pub allowed_children: Option<Vec<String>>,

    /// Keep the tag when it has no content.
    pub allows_empty: bool,

    /// Do not write the closing tag, e.g. `[*]`.
    pub exclude_closing: bool,

    /// Do not append a line break to the end of block level html.
    pub skip_last_line_break: bool,

    /// Compare condition values exactly.
    pub strict_match: bool,

    pub break_before: Option<bool>,

    pub break_start: Option<bool>,

    pub break_end: Option<bool>,

    pub break_after: Option<bool>,

    /// Tags closing this one implicitly, close tags are prefixed with `/`.
    pub closed_by: Option<Vec<String>>,
}

impl Default for Handler {
    fn default() -> Self {
        Self {
            conditions: vec![],
            html: None,
            bbcode: None,
            quote_type: None,
            is_self_closing: false,
            is_inline: true,
            is_html_inline: None,
            allowed_children: None,
            allows_empty: false,
            exclude_closing: false,
            skip_last_line_break: false,
            strict_match: false,
            break_before: None,
            break_start: None,
            break_end: None,
            break_after: None,
            closed_by: None,
        }
    }
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, html: impl Into<Render>) -> Self {
        self.html = Some(html.into());
        self
    }

    pub fn with_bbcode(mut self, bbcode: impl Into<Render>) -> Self {
        self.bbcode = Some(bbcode.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Shortcut for a condition per element name.
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.conditions
            .extend(tags.iter().map(|x| Condition::tag(*x)));
        self
    }

    pub fn with_quote_type(mut self, quote_type: QuoteType) -> Self {
        self.quote_type = Some(quote_type);
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.is_self_closing = true;
        self
    }

    /// Mark as block level.
    pub fn block(mut self) -> Self {
        self.is_inline = false;
        self
    }

    pub fn with_html_inline(mut self, inline: bool) -> Self {
        self.is_html_inline = Some(inline);
        self
    }

    pub fn with_allowed_children(mut self, children: &[&str]) -> Self {
        self.allowed_children = Some(children.iter().map(|x| x.to_string()).collect());
        self
    }

    pub fn allows_empty(mut self) -> Self {
        self.allows_empty = true;
        self
    }

    pub fn exclude_closing(mut self) -> Self {
        self.exclude_closing = true;
        self
    }

    pub fn skip_last_line_break(mut self) -> Self {
        self.skip_last_line_break = true;
        self
    }

    pub fn strict_match(mut self) -> Self {
        self.strict_match = true;
        self
    }

    pub fn with_break_before(mut self, value: bool) -> Self {
        self.break_before = Some(value);
        self
    }

    pub fn with_break_start(mut self, value: bool) -> Self {
        self.break_start = Some(value);
        self
    }

    pub fn with_break_end(mut self, value: bool) -> Self {
        self.break_end = Some(value);
        self
    }

    pub fn with_break_after(mut self, value: bool) -> Self {
        self.break_after = Some(value);
        self
    }

    pub fn with_closed_by(mut self, tags: &[&str]) -> Self {
        self.closed_by = Some(tags.iter().map(|x| x.to_string()).collect());
        self
    }

    /// Inline-ness of the rendered html.
    pub fn is_html_side_inline(&self) -> bool {
        self.is_html_inline.unwrap_or(self.is_inline)
    }

    /// Check `name` is allowed as a child, always true if not restricted.
    pub fn allows_child(&self, name: &str) -> bool {
        self.allowed_children
            .as_ref()
            .map_or(true, |x| x.iter().any(|c| c == name))
    }

    /// Check the tag is closed implicitly by `name`.
    pub fn is_closed_by(&self, name: &str) -> bool {
        self.closed_by
            .as_ref()
            .is_some_and(|x| x.iter().any(|c| c == name))
    }

    /// Check any of the conditions matches html `token`.
    pub fn matches(&self, token: &Token) -> bool {
        self.conditions
            .iter()
            .any(|x| x.matches(token, self.strict_match))
    }
}
