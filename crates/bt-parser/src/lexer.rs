use crate::attrs::tokenize_attrs;
use crate::scanner::Scanner;
use crate::{CLOSE, EQUAL, OPEN, SLASH};
use bt_handler::HandlerRegistry;
use bt_types::{Token, TokenKind};

/// Split bbcode into flat tokens.
///
/// Brackets not forming a tag, and tags without a registered handler, are kept as content.
pub struct Lexer<'a> {
    /// Inner scanner.
    source: Scanner,

    /// Start position of current constrcuting token.
    start: usize,

    /// Scanned tokens.
    tokens: Vec<Token>,

    registry: &'a HandlerRegistry,
}

impl<'a> Lexer<'a> {
    pub fn new(data: &str, registry: &'a HandlerRegistry) -> Self {
        Self {
            source: Scanner::new(data),
            start: 0,
            tokens: vec![],
            registry,
        }
    }

    /// Run the process.
    pub fn scan(mut self) -> Vec<Token> {
        while let Some(ch) = self.source.curr() {
            let token = match ch {
                OPEN => self.scan_tag(),
                '\r' | '\n' => self.scan_newline(),
                _ => self.scan_text(),
            };
            self.start = self.source.position();
            self.tokens.push(token);
        }

        tracing::trace!("scanned {} tokens", self.tokens.len());
        self.tokens
    }

    /// The caller shall ensure current position is on the `[`.
    ///
    /// A tag is the shortest `[...]` not containing another `[`. If none found the `[` alone is
    /// text.
    fn scan_tag(&mut self) -> Token {
        self.source.next();
        let end = match self.source.find_any(&[OPEN, CLOSE]) {
            Some(v) if v > self.start + 1 && self.source.get(v) == Some(CLOSE) => v,
            _ => return self.collect_text(),
        };
        self.source.seek(end + 1);

        if self.source.get(self.start + 1) == Some(SLASH) && end > self.start + 2 {
            self.collect_tail()
        } else {
            self.collect_head()
        }
    }

    fn scan_newline(&mut self) -> Token {
        if self.source.next() == Some('\r') && self.source.curr() == Some('\n') {
            self.source.next();
        }
        Token::newline(self.source.get_range(self.start, self.source.position()))
    }

    fn scan_text(&mut self) -> Token {
        self.source.skip_while(|x| x != OPEN && x != '\r' && x != '\n');
        self.collect_text()
    }

    fn collect_text(&self) -> Token {
        Token::content(self.source.get_range(self.start, self.source.position()))
    }

    /// Demote tags without a handler into text.
    fn check_handler(&self, token: Token) -> Token {
        if self.registry.contains(&token.name) {
            token
        } else {
            Token::content(token.value)
        }
    }

    /// The caller shall ensure current range is on the first and last character
    /// of tag:
    ///
    /// ```console
    /// [ n a m e = a t t r ]
    /// |                     |
    /// |                     |-> self.source.position
    /// |-> self.start
    /// ```
    ///
    /// The name runs until whitespace, `=` or the end of tag, everything after it is attributes.
    fn collect_head(&self) -> Token {
        let value = self.source.get_range(self.start, self.source.position());
        let inner = &value[1..value.len() - 1];

        let name_len = inner
            .find(|x: char| x.is_whitespace() || x == EQUAL)
            .unwrap_or(inner.len());
        if name_len == 0 {
            return Token::content(value);
        }

        let (name, attrs) = inner.split_at(name_len);
        let token = Token::new(TokenKind::Open, name.to_lowercase(), value.as_str())
            .with_attrs(tokenize_attrs(attrs.trim()));
        self.check_handler(token)
    }

    /// The caller shall ensure current range is on the first and last character
    /// of tag:
    ///
    /// ```console
    /// [ / n a m e ]
    /// |             |
    /// |             |-> self.source.position
    /// |-> self.start
    /// ```
    fn collect_tail(&self) -> Token {
        let value = self.source.get_range(self.start, self.source.position());
        let name = value[2..value.len() - 1].to_lowercase();
        self.check_handler(Token::new(TokenKind::Close, name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_types::CONTENT_NAME;

    fn scan(input: &str) -> Vec<Token> {
        Lexer::new(input, &HandlerRegistry::default()).scan()
    }

    fn kinds(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|x| (x.kind, x.value.as_str())).collect()
    }

    #[test]
    fn test_scan_tags() {
        let tokens = scan("[B]foo[/b]\r\nbar");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Open, "[B]"),
                (TokenKind::Content, "foo"),
                (TokenKind::Close, "[/b]"),
                (TokenKind::Newline, "\r\n"),
                (TokenKind::Content, "bar"),
            ]
        );
        assert_eq!(tokens[0].name, "b");
        assert_eq!(tokens[2].name, "b");
    }

    #[test]
    fn test_scan_attrs() {
        let tokens = scan("[url=http://a.b]x[/url][img width=1 height=\"2\"]y[/img]");
        assert_eq!(tokens[0].attrs.default_value(), Some("http://a.b"));
        assert_eq!(tokens[3].attrs.get("width"), Some("1"));
        assert_eq!(tokens[3].attrs.get("height"), Some("2"));

        let tokens = scan("[b ]foo[/b]");
        assert_eq!(tokens[0].kind, TokenKind::Open);
        assert!(tokens[0].attrs.is_empty());
    }

    #[test]
    fn test_scan_unknown_and_broken() {
        let tokens = scan("[unknown]x[/unknown]");
        assert!(tokens.iter().all(|x| x.is_content() && x.name == CONTENT_NAME));

        let tokens = scan("a[[b]c[ b][]\r[");
        assert_eq!(
            kinds(&tokens),
            vec![
                (TokenKind::Content, "a"),
                (TokenKind::Content, "["),
                (TokenKind::Open, "[b]"),
                (TokenKind::Content, "c"),
                (TokenKind::Content, "[ b]"),
                (TokenKind::Content, "["),
                (TokenKind::Content, "]"),
                (TokenKind::Newline, "\r"),
                (TokenKind::Content, "["),
            ]
        );
    }

    #[test]
    fn test_scan_close_without_name() {
        let tokens = scan("[/]");
        assert_eq!(kinds(&tokens), vec![(TokenKind::Content, "[/]")]);
    }
}
