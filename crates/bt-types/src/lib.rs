mod attrs;
mod quote;
mod token;

pub use attrs::Attributes;
pub use quote::{ParseQuoteTypeError, QuoteType};
pub use token::{Token, TokenKind, CONTENT_NAME, NEWLINE_NAME};

/// Key holding the single unnamed attribute value.
///
/// `[size=13]` is stored as `default = "13"`.
pub const DEFAULT_ATTR: &str = "default";
