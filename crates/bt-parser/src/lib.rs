mod attrs;
mod convert;
mod empty;
mod lexer;
mod nesting;
mod normalize;
mod options;
mod scanner;
mod tree;

pub use attrs::tokenize_attrs;
pub use convert::{cleanup_bbcode, convert_bbcode_to_html, convert_html_to_bbcode};
pub use lexer::Lexer;
pub use options::ParserOptions;

use bt_handler::{ConvertOptions, Handler, HandlerRegistry};
use bt_types::Token;

const OPEN: char = '[';
const CLOSE: char = ']';
const SLASH: char = '/';
const EQUAL: char = '=';

/// Converter between bbcode and html.
///
/// Owns the options and the handler registry used by every conversion.
///
/// ```
/// use bt_parser::Parser;
///
/// let parser = Parser::default();
/// assert_eq!(parser.to_html("[b]foo[/b]", false), "<strong>foo</strong>");
/// assert_eq!(parser.to_bbcode("<em>foo</em>"), "[i]foo[/i]");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Parser {
    options: ParserOptions,
    handlers: HandlerRegistry,
}

impl Parser {
    /// Parser with the built-in handlers.
    pub fn new(options: ParserOptions) -> Self {
        Self::with_handlers(options, HandlerRegistry::default())
    }

    pub fn with_handlers(options: ParserOptions, handlers: HandlerRegistry) -> Self {
        Self { options, handlers }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Register `handler` as `name`, replacing the existing one.
    pub fn set_handler(&mut self, name: impl Into<String>, handler: Handler) {
        self.handlers.set(name, handler);
    }

    pub fn set_handlers<I, S>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: Into<String>,
    {
        self.handlers.extend(handlers);
    }

    /// Remove the handler registered as `name`.
    ///
    /// Tags of that name are text afterwards.
    pub fn unset_handler(&mut self, name: &str) {
        self.handlers.unset(name);
    }

    pub fn unset_handlers<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.handlers.unset(name);
        }
    }

    /// Parse bbcode into a repaired token tree.
    ///
    /// With `preserve_new_lines`, only the line breaks following block level tags are removed.
    pub fn parse_bbcode(&self, input: &str, preserve_new_lines: bool) -> Vec<Token> {
        let tokens = Lexer::new(input, &self.handlers).scan();
        tracing::trace!("lexed {} tokens", tokens.len());

        let mut tokens = tree::parse_tokens(tokens, &self.handlers, self.options.fix_invalid_children);
        tracing::trace!("built tree with {} root tokens", tokens.len());

        if self.options.fix_invalid_nesting {
            nesting::fix_nesting(&mut tokens, &self.handlers, self.options.fix_invalid_children);
            tracing::trace!("fixed nesting, {} root tokens", tokens.len());
        }

        normalize::normalize_newlines(&mut tokens, &self.handlers, &self.options, preserve_new_lines);

        if self.options.remove_empty_tags {
            empty::remove_empty_tokens(&mut tokens, &self.handlers);
            tracing::trace!("removed empty tags, {} root tokens", tokens.len());
        }

        tokens
    }

    pub fn parse_html(&self, input: &str) -> Vec<Token> {
        bt_html::tokenize_html(input)
    }

    /// Convert bbcode into html.
    pub fn to_html(&self, input: &str, preserve_new_lines: bool) -> String {
        let tokens = self.parse_bbcode(input, preserve_new_lines);
        convert_bbcode_to_html(&tokens, &self.handlers, self.convert_options())
    }

    /// Same as [`Parser::to_html`].
    pub fn from_bbcode(&self, input: &str, preserve_new_lines: bool) -> String {
        self.to_html(input, preserve_new_lines)
    }

    /// Convert html into bbcode.
    pub fn to_bbcode(&self, input: &str) -> String {
        let tokens = self.parse_html(input);
        convert_html_to_bbcode(&tokens, &self.handlers, self.convert_options())
    }

    /// Same as [`Parser::to_bbcode`].
    pub fn from_html(&self, input: &str) -> String {
        self.to_bbcode(input)
    }

    /// Repair bbcode and write it back in canonical form.
    pub fn cleanup_bbcode(&self, input: &str, preserve_new_lines: bool) -> String {
        let tokens = self.parse_bbcode(input, preserve_new_lines);
        cleanup_bbcode(&tokens, &self.handlers, &self.options)
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            is_root: true,
            lazy: self.options.lazy_transformation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipeline() {
        let parser = Parser::default();
        let tokens = parser.parse_bbcode("[b]a[quote]b[/quote]c[/b][i][/i]", false);
        let names = tokens.iter().map(|x| x.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "quote", "b"]);
    }

    #[test]
    fn test_options_disable_passes() {
        let parser = Parser::new(ParserOptions {
            fix_invalid_nesting: false,
            remove_empty_tags: false,
            ..Default::default()
        });
        let tokens = parser.parse_bbcode("[b]a[quote]b[/quote]c[/b][i][/i]", false);
        let names = tokens.iter().map(|x| x.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "i"]);
    }

    #[test]
    fn test_tree_as_json() {
        let tokens = Parser::default().parse_bbcode("[url=x]y[/url]", false);
        assert_eq!(
            serde_json::to_value(&tokens).unwrap(),
            serde_json::json!([{
                "kind": "open",
                "name": "url",
                "value": "[url=x]",
                "attrs": {"default": "x"},
                "children": [{"kind": "content", "name": "#", "value": "y"}],
                "closing": {"kind": "close", "name": "url", "value": "[/url]"},
            }])
        );
    }

    #[test]
    fn test_set_and_unset_handler() {
        let mut parser = Parser::default();
        parser.unset_handler("b");
        assert_eq!(parser.to_html("[b]foo[/b]", false), "[b]foo[/b]");

        parser.set_handler("b", Handler::new().with_html("<b>{0}</b>").with_tags(&["b"]));
        assert_eq!(parser.to_html("[b]foo[/b]", false), "<b>foo</b>");

        parser.unset_handlers(["b", "i"]);
        assert!(!parser.handlers().contains("b"));
        assert!(!parser.handlers().contains("i"));
    }
}
