use bt_types::Token;
use scraper::{ElementRef, Html, Node};

mod ext;

pub use ext::{parse_style, HtmlElementExt};

/// Elements never having content nor end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Tokenize html fragment `input` into a token tree.
///
/// * Elements are open tokens holding their children, non-void elements also carry a closing
///   token like `</b>`.
/// * `<br>` is a line break token.
/// * Text is decoded into content tokens.
/// * Comments are dropped.
pub fn tokenize_html(input: &str) -> Vec<Token> {
    let html = Html::parse_fragment(input);
    if !html.errors.is_empty() {
        tracing::trace!("html parse errors: {:?}", html.errors);
    }

    let tokens = tokenize_children(html.root_element());
    tracing::trace!("tokenized html into {} root tokens", tokens.len());
    tokens
}

fn tokenize_children(element: ElementRef<'_>) -> Vec<Token> {
    let mut tokens = vec![];
    for child in element.children() {
        match child.value() {
            Node::Text(text) => tokens.push(Token::content(&**text)),
            Node::Element(..) => {
                if let Some(el) = ElementRef::wrap(child) {
                    tokens.push(el.to_token());
                }
            }
            _ => continue,
        }
    }
    tokens
}
