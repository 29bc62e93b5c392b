use bt_handler::{ConvertOptions, Handler, HandlerRegistry, Render, RenderContext};
use bt_types::{Token, TokenKind};

mod bbcode;
mod cleanup;
mod html;

pub use bbcode::convert_html_to_bbcode;
pub use cleanup::cleanup_bbcode;
pub use html::convert_bbcode_to_html;

/// One direction of conversion.
trait Converter {
    /// Line break in the output format.
    const LINE_BREAK: &'static str;

    fn registry(&self) -> &HandlerRegistry;

    /// Find the handler converting `token`.
    fn find_handler(&self, token: &Token) -> Option<&Handler>;

    /// The render of `handler` producing the output format.
    fn render_of(handler: &Handler) -> Option<&Render>;

    /// Convert plain text.
    fn convert_content(&self, value: &str) -> String;
}

fn convert_tokens<C: Converter>(converter: &C, tokens: &[Token], options: ConvertOptions) -> String {
    let mut output = String::new();

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Open => output.push_str(convert_tag(converter, token, options).as_str()),
            TokenKind::Newline => {
                output.push_str(C::LINE_BREAK);
                // Nothing follows the last line break, keep it visible.
                if options.is_root && index + 1 == tokens.len() {
                    output.push_str(C::LINE_BREAK);
                }
            }
            TokenKind::Content | TokenKind::Close => {
                output.push_str(converter.convert_content(&token.value).as_str())
            }
        }
    }

    output
}

fn convert_tag<C: Converter>(converter: &C, token: &Token, options: ConvertOptions) -> String {
    let child_options = ConvertOptions {
        is_root: false,
        ..options
    };
    let mut content = convert_tokens(converter, &token.children, child_options);

    let found = converter
        .find_handler(token)
        .and_then(|handler| C::render_of(handler).map(|render| (handler, render)));
    let Some((handler, render)) = found else {
        tracing::trace!("no handler converts tag {:?}", token.value);
        return if options.lazy {
            format!("{}{content}{}", token.value, token.closing_value())
        } else {
            content
        };
    };

    // Block level content ending with inline content gets a trailing line break.
    let last_child_inline = token
        .children
        .last()
        .and_then(|x| converter.find_handler(x))
        .is_some_and(|x| x.is_html_side_inline());
    if !handler.is_html_side_inline() && last_child_inline && !handler.skip_last_line_break {
        content.push_str(C::LINE_BREAK);
    }

    let render_children = |tokens: &[Token]| convert_tokens(converter, tokens, child_options);
    let context = RenderContext::new(
        token,
        content,
        converter.registry(),
        options,
        &render_children,
    );
    render.render(&context)
}
