use bt_types::QuoteType;
use serde::{Deserialize, Serialize};

/// Options controlling repair and output of the parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Line break before block level tags.
    pub break_before_block: bool,

    /// Line break after the open tag of block level tags.
    pub break_start_block: bool,

    /// Line break before the close tag of block level tags.
    pub break_end_block: bool,

    /// Line break after block level tags.
    pub break_after_block: bool,

    /// Remove tags having no content, unless the tag allows it.
    pub remove_empty_tags: bool,

    /// Split inline tags containing block level tags.
    ///
    /// `[b]A[quote]B[/quote]C[/b]` becomes `[b]A[/b][quote][b]B[/b][/quote][b]C[/b]`.
    pub fix_invalid_nesting: bool,

    /// Turn children not allowed in their parent into text.
    pub fix_invalid_children: bool,

    /// Default quoting of attribute values when writing bbcode.
    pub quote_type: QuoteType,

    /// Keep tags which can not be converted as they are.
    ///
    /// When disabled, those tags are dropped and only their converted content is kept.
    pub lazy_transformation: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            break_before_block: false,
            break_start_block: false,
            break_end_block: false,
            break_after_block: true,
            remove_empty_tags: true,
            fix_invalid_nesting: true,
            fix_invalid_children: true,
            quote_type: QuoteType::Auto,
            lazy_transformation: true,
        }
    }
}
