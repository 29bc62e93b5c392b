use super::{convert_tokens, Converter};
use bt_handler::escape::escape_entities;
use bt_handler::{ConvertOptions, Handler, HandlerRegistry, Render};
use bt_types::Token;

struct HtmlConverter<'a> {
    registry: &'a HandlerRegistry,
}

impl Converter for HtmlConverter<'_> {
    const LINE_BREAK: &'static str = "<br />";

    fn registry(&self) -> &HandlerRegistry {
        self.registry
    }

    fn find_handler(&self, token: &Token) -> Option<&Handler> {
        self.registry.get(&token.name)
    }

    fn render_of(handler: &Handler) -> Option<&Render> {
        handler.html.as_ref()
    }

    fn convert_content(&self, value: &str) -> String {
        escape_entities(value, true)
    }
}

/// Render a bbcode token tree into html.
///
/// Tags are looked up by name. Text is escaped and line breaks become `<br />`.
pub fn convert_bbcode_to_html(
    tokens: &[Token],
    registry: &HandlerRegistry,
    options: ConvertOptions,
) -> String {
    convert_tokens(&HtmlConverter { registry }, tokens, options)
}
