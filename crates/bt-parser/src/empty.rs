use bt_handler::HandlerRegistry;
use bt_types::{Token, TokenKind};

/// Check `children` hold nothing visible.
///
/// Line breaks and whitespace are not visible, a non-breaking space is.
fn is_whitespace(children: &[Token]) -> bool {
    children.iter().all(|x| match x.kind {
        TokenKind::Open | TokenKind::Close => false,
        TokenKind::Content => x.value.chars().all(|c| c.is_whitespace() && c != '\u{a0}'),
        TokenKind::Newline => true,
    })
}

/// Remove tags having no visible content, bottom-up.
///
/// Self-closing tags and tags allowing empty content are kept, so are tags without handler.
pub(crate) fn remove_empty_tokens(tokens: &mut Vec<Token>, registry: &HandlerRegistry) {
    tokens.retain_mut(|token| {
        if !token.is_open() {
            return true;
        }

        remove_empty_tokens(&mut token.children, registry);

        let removable = registry
            .get(&token.name)
            .is_some_and(|x| !x.is_self_closing && !x.allows_empty);
        if removable && is_whitespace(&token.children) {
            tracing::debug!("remove empty tag {:?}", token.value);
            return false;
        }
        true
    });
}
