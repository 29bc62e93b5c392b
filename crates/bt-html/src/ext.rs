use crate::{tokenize_children, VOID_ELEMENTS};
use bt_types::{Attributes, Token, TokenKind};
use scraper::ElementRef;

pub trait HtmlElementExt {
    /// Lower-cased element name.
    fn tag_name(&self) -> String;

    /// Check the element never has content nor end tag, e.g. `<img>`.
    fn is_void(&self) -> bool;

    /// Collect attributes, inline style and classes.
    ///
    /// The raw `style` and `class` attributes are kept as plain attributes as well.
    fn attributes(&self) -> Attributes;

    /// Convert the element and all its descendants into a token.
    ///
    /// `<br>` is converted into a line break.
    fn to_token(&self) -> Token;
}

impl<'a> HtmlElementExt for ElementRef<'a> {
    fn tag_name(&self) -> String {
        self.value().name().to_lowercase()
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag_name().as_str())
    }

    fn attributes(&self) -> Attributes {
        let element = self.value();
        let mut attrs = element
            .attrs()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect::<Attributes>();

        if let Some(style) = element.attr("style") {
            for (property, value) in parse_style(style) {
                attrs.set_style(property, value);
            }
        }

        for class in element.classes() {
            attrs.add_class(class);
        }

        attrs
    }

    fn to_token(&self) -> Token {
        let name = self.tag_name();
        if name == "br" {
            return Token::newline("\n");
        }

        let mut token = Token::new(TokenKind::Open, name.as_str(), format!("<{name}>"))
            .with_attrs(self.attributes())
            .with_children(tokenize_children(*self));
        if !self.is_void() {
            token = token.with_closing(Token::new(
                TokenKind::Close,
                name.as_str(),
                format!("</{name}>"),
            ));
        }
        token
    }
}

/// Parse inline css `style` into property value pairs.
///
/// Property names are lower-cased, declarations missing property or value are dropped.
///
/// ```
/// use bt_html::parse_style;
///
/// assert_eq!(
///     parse_style("Color: red; background: url(http://x);;"),
///     vec![
///         ("color".to_owned(), "red".to_owned()),
///         ("background".to_owned(), "url(http://x)".to_owned())
///     ]
/// );
/// ```
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|x| x.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_owned()))
        .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        .collect()
}
