use crate::handler::Handler;
use crate::preset::preset_handlers;
use bt_types::Token;
use std::collections::HashMap;

/// Ordered collection of handlers keyed by lower-cased tag name.
///
/// Order matters when converting html: the first handler whose condition matches an element
/// wins. Replacing a handler keeps its position, new handlers go to the end.
#[derive(Clone, Debug)]
pub struct HandlerRegistry {
    entries: Vec<(String, Handler)>,
    index: HashMap<String, usize>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: vec![],
            index: HashMap::new(),
        }
    }

    /// Registry holding the built-in handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.extend(preset_handlers());
        registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        let pos = match self.index.get(name) {
            Some(v) => *v,
            None => *self.index.get(name.to_lowercase().as_str())?,
        };
        self.entries.get(pos).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Register `handler` as `name`, replacing the existing one if any.
    ///
    /// Return the replaced handler.
    pub fn set(&mut self, name: impl Into<String>, handler: Handler) -> Option<Handler> {
        let name = name.into().to_lowercase();
        match self.index.get(&name) {
            Some(pos) => {
                tracing::debug!("replace handler {name}");
                Some(std::mem::replace(&mut self.entries[*pos].1, handler))
            }
            None => {
                tracing::debug!("add handler {name}");
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, handler));
                None
            }
        }
    }

    /// Register all handlers in order.
    pub fn extend<I, S>(&mut self, handlers: I)
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: Into<String>,
    {
        for (name, handler) in handlers {
            self.set(name, handler);
        }
    }

    /// Remove handler `name`, return it if registered.
    pub fn unset(&mut self, name: &str) -> Option<Handler> {
        let pos = self.index.remove(name.to_lowercase().as_str())?;
        let (name, handler) = self.entries.remove(pos);
        for v in self.index.values_mut() {
            if *v > pos {
                *v -= 1;
            }
        }
        tracing::debug!("remove handler {name}");
        Some(handler)
    }

    /// Iterate handlers in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Find the first handler accepting html `token`.
    pub fn find_for_html_token(&self, token: &Token) -> Option<(&str, &Handler)> {
        self.iter().find(|(_, handler)| handler.matches(token))
    }

    /// Check tag `name` is inline.
    ///
    /// Tags without handler are inline.
    pub fn is_inline(&self, name: &str) -> bool {
        self.get(name).map_or(true, |x| x.is_inline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Condition;
    use bt_types::TokenKind;

    #[test]
    fn test_set_keeps_position() {
        let mut registry = HandlerRegistry::new();
        registry.set("a", Handler::new());
        registry.set("B", Handler::new());
        assert!(registry.set("a", Handler::new().block()).is_some());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!registry.is_inline("a"));
        assert!(registry.contains("b"));
        assert!(registry.contains("B"));
    }

    #[test]
    fn test_unset_reindex() {
        let mut registry = HandlerRegistry::new();
        registry.extend([
            ("a", Handler::new()),
            ("b", Handler::new()),
            ("c", Handler::new().block()),
        ]);
        assert!(registry.unset("a").is_some());
        assert!(registry.unset("a").is_none());
        assert_eq!(registry.len(), 2);
        assert!(!registry.get("c").unwrap().is_inline);
        assert!(registry.is_inline("unknown"));
    }

    #[test]
    fn test_find_first_match() {
        let mut registry = HandlerRegistry::new();
        registry.set("first", Handler::new().with_condition(Condition::tag("b")));
        registry.set("second", Handler::new().with_tags(&["b", "strong"]));

        let token = Token::new(TokenKind::Open, "b", "<b>");
        assert_eq!(registry.find_for_html_token(&token).unwrap().0, "first");
        let token = Token::new(TokenKind::Open, "strong", "<strong>");
        assert_eq!(registry.find_for_html_token(&token).unwrap().0, "second");
        let token = Token::new(TokenKind::Open, "p", "<p>");
        assert!(registry.find_for_html_token(&token).is_none());
    }

    #[test]
    fn test_defaults() {
        let registry = HandlerRegistry::default();
        assert_eq!(registry.names().next(), Some("h1"));
        assert!(registry.contains("*"));
        assert!(registry.contains("youtube"));
    }
}
