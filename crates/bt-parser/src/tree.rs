use bt_handler::HandlerRegistry;
use bt_types::{Token, TokenKind};
use std::collections::{HashMap, VecDeque};

/// Build flat tokens into a tree.
///
/// Open tags own everything up to their close tag. Unbalanced markup is repaired on the way:
///
/// * Open tags with no close tag ahead, and close tags closing nothing, turn into text.
/// * Tags still open at the end of input keep their children and stay open, without closing.
/// * Closing an outer tag while inner ones are open closes the inner ones and reopens copies of
///   them after the closed tag: `[b][i]x[/b]y[/i]` is `[b][i]x[/i][/b][i]y[/i]`.
/// * Tags with `closed_by` are closed implicitly, like `[*]` items in a list.
/// * When `fix_invalid_children` is set, children not allowed in their parent turn into text.
pub(crate) fn parse_tokens(
    tokens: Vec<Token>,
    registry: &HandlerRegistry,
    fix_invalid_children: bool,
) -> Vec<Token> {
    let mut builder = TreeBuilder::new(&tokens, registry, fix_invalid_children);
    let mut items: VecDeque<Token> = tokens.into();

    while let Some(mut token) = items.pop_front() {
        if token.is_close() {
            builder.consume_close(&token.name);
        }

        if !builder.is_child_allowed(&token) {
            let closes_current =
                token.is_close() && builder.current().is_some_and(|x| x.name == token.name);
            if !closes_current {
                tracing::debug!("demote {:?} not allowed in current tag", token.value);
                token.demote();
            }
        }

        match token.kind {
            TokenKind::Open => builder.open_tag(token),
            TokenKind::Close => builder.close_tag(token, &mut items),
            TokenKind::Newline => builder.newline(token, items.front()),
            TokenKind::Content => builder.add(token),
        }
    }

    builder.finish()
}

struct TreeBuilder<'a> {
    registry: &'a HandlerRegistry,

    fix_invalid_children: bool,

    /// Root level tokens.
    output: Vec<Token>,

    /// Open tags waiting for their close tag, innermost last.
    ///
    /// A tag is moved into its parent when popped.
    open_tags: Vec<Token>,

    /// Count of close tags not consumed yet, by name.
    closes_ahead: HashMap<String, usize>,
}

impl<'a> TreeBuilder<'a> {
    fn new(tokens: &[Token], registry: &'a HandlerRegistry, fix_invalid_children: bool) -> Self {
        let mut closes_ahead = HashMap::new();
        for token in tokens.iter().filter(|x| x.is_close()) {
            *closes_ahead.entry(token.name.clone()).or_insert(0) += 1;
        }

        Self {
            registry,
            fix_invalid_children,
            output: vec![],
            open_tags: vec![],
            closes_ahead,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.open_tags.last()
    }

    fn consume_close(&mut self, name: &str) {
        if let Some(v) = self.closes_ahead.get_mut(name) {
            *v = v.saturating_sub(1);
        }
    }

    fn has_close_ahead(&self, name: &str) -> bool {
        self.closes_ahead.get(name).is_some_and(|x| *x > 0)
    }

    fn is_child_allowed(&self, token: &Token) -> bool {
        if !self.fix_invalid_children {
            return true;
        }
        match self.current().and_then(|x| self.registry.get(&x.name)) {
            Some(handler) => handler.allows_child(&token.name),
            None => true,
        }
    }

    /// Check the current tag is closed implicitly by `name`.
    fn closes_current(&self, name: &str) -> bool {
        self.current()
            .and_then(|x| self.registry.get(&x.name))
            .is_some_and(|x| x.is_closed_by(name))
    }

    /// Add `token` to the current tag, or the root if none open.
    fn add(&mut self, token: Token) {
        match self.open_tags.last_mut() {
            Some(v) => v.children.push(token),
            None => self.output.push(token),
        }
    }

    /// Close the current tag.
    fn pop(&mut self) {
        if let Some(token) = self.open_tags.pop() {
            self.add(token);
        }
    }

    fn open_tag(&mut self, mut token: Token) {
        if self.closes_current(&token.name) {
            self.pop();
        }

        match self.registry.get(&token.name) {
            Some(handler)
                if !handler.is_self_closing
                    && (handler.closed_by.is_some() || self.has_close_ahead(&token.name)) =>
            {
                self.open_tags.push(token);
            }
            Some(handler) if handler.is_self_closing => self.add(token),
            _ => {
                tracing::debug!("demote unclosed tag {:?}", token.value);
                token.demote();
                self.add(token);
            }
        }
    }

    fn close_tag(&mut self, mut token: Token, items: &mut VecDeque<Token>) {
        let current = self.current().map(|x| x.name.clone());

        // `[/list]` closes an open `[*]`.
        if current.as_ref().is_some_and(|x| *x != token.name)
            && self.closes_current(format!("/{}", token.name).as_str())
        {
            self.pop();
        }

        if current.as_ref() == Some(&token.name) {
            if let Some(open) = self.open_tags.last_mut() {
                open.closing = Some(Box::new(token));
            }
            self.pop();
            return;
        }

        if !self.open_tags.iter().any(|x| x.name == token.name) {
            tracing::debug!("demote close tag {:?} closing nothing", token.value);
            token.demote();
            self.add(token);
            return;
        }

        // Close the inner tags and reopen copies of them after the closed one.
        let mut cloned = vec![];
        while let Some(mut open) = self.open_tags.pop() {
            if open.name == token.name {
                open.closing = Some(Box::new(token.clone()));
                self.add(open);
                break;
            }
            cloned.push(open.clone_empty());
            self.add(open);
        }
        tracing::debug!(
            "close tag {:?} reopens {} inner tags",
            token.value,
            cloned.len()
        );

        if items.front().is_some_and(|x| x.is_newline())
            && self.registry.get(&token.name).is_some_and(|x| !x.is_inline)
        {
            if let Some(newline) = items.pop_front() {
                self.add(newline);
            }
        }

        self.open_tags.extend(cloned.into_iter().rev());
    }

    fn newline(&mut self, token: Token, next: Option<&Token>) {
        let should_close = match (self.current(), next) {
            (Some(current), Some(next)) => {
                let next_name = if next.is_close() {
                    format!("/{}", next.name)
                } else {
                    next.name.clone()
                };
                self.closes_current(&next_name)
                    && !(next.is_close() && next.name == current.name)
                    && self.registry.get(&current.name).is_some_and(|x| {
                        x.break_after == Some(true)
                            || (!x.is_inline && x.break_after != Some(false))
                    })
            }
            _ => false,
        };

        if should_close {
            self.pop();
        }
        self.add(token);
    }

    /// Move remaining tags into their parents, leaving them without closing.
    fn finish(mut self) -> Vec<Token> {
        while !self.open_tags.is_empty() {
            self.pop();
        }
        self.output
    }
}
