use super::{convert_tokens, Converter};
use bt_handler::{ConvertOptions, Handler, HandlerRegistry, Render};
use bt_types::Token;

struct BBCodeConverter<'a> {
    registry: &'a HandlerRegistry,
}

impl Converter for BBCodeConverter<'_> {
    const LINE_BREAK: &'static str = "\n";

    fn registry(&self) -> &HandlerRegistry {
        self.registry
    }

    fn find_handler(&self, token: &Token) -> Option<&Handler> {
        if !token.is_open() {
            return None;
        }
        self.registry.find_for_html_token(token).map(|(_, v)| v)
    }

    fn render_of(handler: &Handler) -> Option<&Render> {
        handler.bbcode.as_ref()
    }

    fn convert_content(&self, value: &str) -> String {
        value.to_owned()
    }
}

/// Render an html token tree into bbcode.
///
/// Elements are converted by the first handler whose condition matches, text is kept as is.
pub fn convert_html_to_bbcode(
    tokens: &[Token],
    registry: &HandlerRegistry,
    options: ConvertOptions,
) -> String {
    convert_tokens(&BBCodeConverter { registry }, tokens, options)
}
