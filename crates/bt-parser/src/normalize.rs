use crate::options::ParserOptions;
use bt_handler::{Handler, HandlerRegistry};
use bt_types::Token;

/// Remove line breaks implied by block level tags.
///
/// With the default options the line break right after a block level tag is removed because the
/// block already starts a new line when rendered. Breaks before, at the start and at the end of
/// block level tags are removed when the corresponding `break_*_block` option or handler flag is
/// set.
///
/// When `only_remove_break_after` is set, only line breaks following block level tags are
/// removed, used to keep the layout of user input.
pub(crate) fn normalize_newlines(
    tokens: &mut Vec<Token>,
    registry: &HandlerRegistry,
    options: &ParserOptions,
    only_remove_break_after: bool,
) {
    let normalizer = Normalizer {
        registry,
        options,
        only_remove_break_after,
    };
    normalizer.normalize(tokens, None);
}

struct Normalizer<'a> {
    registry: &'a HandlerRegistry,
    options: &'a ParserOptions,
    only_remove_break_after: bool,
}

impl Normalizer<'_> {
    /// Check `flag` is on for the handler, or inherited from `option` for block level ones.
    fn flag_on(handler: &Handler, option: bool, flag: Option<bool>) -> bool {
        (!handler.is_inline && option && flag != Some(false)) || flag == Some(true)
    }

    /// Whether the line break at the start of `parent` is removed.
    fn removes_break_start(&self, parent: &Handler) -> bool {
        Self::flag_on(parent, self.options.break_start_block, parent.break_start)
    }

    fn removes_break_end(&self, parent: &Handler) -> bool {
        Self::flag_on(parent, self.options.break_end_block, parent.break_end)
    }

    /// Whether the line break after `left` is removed.
    fn removes_break_after(&self, left: &Handler) -> bool {
        if self.only_remove_break_after {
            !left.is_inline
        } else {
            Self::flag_on(left, self.options.break_after_block, left.break_after)
        }
    }

    fn removes_break_before(&self, right: &Handler) -> bool {
        Self::flag_on(right, self.options.break_before_block, right.break_before)
    }

    fn open_handler(&self, token: Option<&Token>) -> Option<&Handler> {
        token
            .filter(|x| x.is_open())
            .and_then(|x| self.registry.get(&x.name))
    }

    fn normalize(&self, children: &mut Vec<Token>, parent: Option<&Handler>) {
        let parent = parent.filter(|x| !x.is_self_closing && !self.only_remove_break_after);
        let mut removed_break_end = false;
        let mut removed_break_before = false;

        let mut i = children.len();
        while i > 0 {
            i -= 1;

            if children[i].is_open() {
                let handler = self.registry.get(&children[i].name);
                self.normalize(&mut children[i].children, handler);
                continue;
            }
            if !children[i].is_newline() {
                continue;
            }

            let has_left = i > 0;
            let has_right = i + 1 < children.len();
            let mut remove = false;

            if let Some(parent) = parent {
                if !has_left {
                    remove = self.removes_break_start(parent);
                } else if !removed_break_end && !has_right {
                    remove = self.removes_break_end(parent);
                    removed_break_end = remove;
                }
            }

            let left = if has_left { children.get(i - 1) } else { None };
            if let Some(handler) = self.open_handler(left) {
                remove |= self.removes_break_after(handler);
            }

            if !self.only_remove_break_after && !removed_break_before {
                if let Some(handler) = self.open_handler(children.get(i + 1)) {
                    remove |= self.removes_break_before(handler);
                    removed_break_before = remove;
                    if remove {
                        children.remove(i);
                        continue;
                    }
                }
            }

            if remove {
                children.remove(i);
            }

            // Only one break is removed before a tag, `\n\n[quote]` keeps one.
            removed_break_before = false;
        }
    }
}
