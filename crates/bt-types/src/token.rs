use crate::Attributes;
use serde::Serialize;

/// Name of tokens holding plain text.
pub const CONTENT_NAME: &str = "#";

/// Name of tokens holding a line break.
pub const NEWLINE_NAME: &str = "#newline";

/// All types of tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Tag head.
    ///
    /// `[$name=$attr]` or `<$name>`.
    Open,

    /// Tag tail.
    ///
    /// `[/$name]` or `</$name>`.
    Close,

    /// Plain text.
    Content,

    /// Line break, `\n`, `\r\n` or `\r`.
    Newline,
}

/// Token is the unit of markup, both before and after building the tree.
///
/// Tokens produced by the lexer are flat, the tree builder moves tokens into the `children` of
/// the open tag they belong to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    /// Kind of token.
    ///
    /// May change during repair, e.g. a close tag matching nothing becomes [TokenKind::Content].
    pub kind: TokenKind,

    /// Lower-cased tag name.
    ///
    /// [CONTENT_NAME] for plain text and [NEWLINE_NAME] for line breaks.
    pub name: String,

    /// The literal text this token was scanned from.
    pub value: String,

    /// Attributes parsed from the tag head.
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,

    /// Child tokens, owned by this token.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,

    /// Copy of the close tag that matched this token, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<Box<Token>>,
}

impl Token {
    pub fn new(kind: TokenKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            attrs: Attributes::default(),
            children: vec![],
            closing: None,
        }
    }

    /// Construct a plain text token.
    pub fn content(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Content, CONTENT_NAME, value)
    }

    /// Construct a line break token.
    pub fn newline(value: impl Into<String>) -> Self {
        Self::new(TokenKind::Newline, NEWLINE_NAME, value)
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    pub fn with_closing(mut self, closing: Token) -> Self {
        self.closing = Some(Box::new(closing));
        self
    }

    pub fn is_open(&self) -> bool {
        self.kind == TokenKind::Open
    }

    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::Close
    }

    pub fn is_content(&self) -> bool {
        self.kind == TokenKind::Content
    }

    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::Newline
    }

    /// Turn current token into plain text, keeping its literal value.
    pub fn demote(&mut self) {
        self.kind = TokenKind::Content;
        self.name = CONTENT_NAME.to_owned();
    }

    /// Copy the token without its children.
    ///
    /// Attributes and the closing token are copied.
    pub fn clone_empty(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.clone(),
            value: self.value.clone(),
            attrs: self.attrs.clone(),
            children: vec![],
            closing: self.closing.clone(),
        }
    }

    /// Split children at `index`.
    ///
    /// Children from `index` to the end are moved into a [Token::clone_empty] copy which is
    /// returned, the ones before `index` stay. An out of range `index` moves nothing.
    pub fn split_at(&mut self, index: usize) -> Self {
        let mut right = self.clone_empty();
        if index < self.children.len() {
            right.children = self.children.split_off(index);
        }
        right
    }

    /// Literal text of the closing token, empty if not closed.
    pub fn closing_value(&self) -> &str {
        self.closing.as_ref().map_or("", |x| x.value.as_str())
    }

    /// Reconstruct the literal text of the whole subtree.
    pub fn to_literal(&self) -> String {
        let mut output = self.value.clone();
        for child in self.children.iter() {
            output.push_str(child.to_literal().as_str());
        }
        output.push_str(self.closing_value());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> Token {
        let mut attrs = Attributes::default();
        attrs.insert("default", "1");
        Token::new(TokenKind::Open, "b", "[b=1]")
            .with_attrs(attrs)
            .with_closing(Token::new(TokenKind::Close, "b", "[/b]"))
            .with_children(vec![
                Token::content("a"),
                Token::newline("\n"),
                Token::content("c"),
            ])
    }

    #[test]
    fn test_clone_empty_keeps_attrs_and_closing() {
        let token = bold();
        let clone = token.clone_empty();
        assert!(clone.children.is_empty());
        assert_eq!(clone.attrs.get("default"), Some("1"));
        assert_eq!(clone.closing_value(), "[/b]");
    }

    #[test]
    fn test_split_at_moves_right_side() {
        let mut token = bold();
        let right = token.split_at(1);
        assert_eq!(token.children.len(), 1);
        assert_eq!(right.children.len(), 2);
        assert!(right.children[0].is_newline());
        assert_eq!(right.name, "b");

        let right = token.split_at(5);
        assert!(right.children.is_empty());
        assert_eq!(token.children.len(), 1);
    }

    #[test]
    fn test_demote() {
        let mut token = Token::new(TokenKind::Close, "i", "[/i]");
        token.demote();
        assert!(token.is_content());
        assert_eq!(token.name, CONTENT_NAME);
        assert_eq!(token.value, "[/i]");
    }

    #[test]
    fn test_to_literal() {
        assert_eq!(bold().to_literal(), "[b=1]a\nc[/b]");
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_value(Token::content("x")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "content", "name": "#", "value": "x"})
        );
    }
}
