use bt_handler::HandlerRegistry;
use bt_types::Token;

/// Move block level tags out of inline tags.
///
/// The inline tag is split where the block level tag is, and the block level tag placed between
/// the split parts:
///
/// ```text
/// [inline]A[block]B[/block]C[/inline]
/// [inline]A[/inline][block]B[/block][inline]C[/inline]
/// ```
///
/// If the block level tag accepts the inline one as child, its content is wrapped in a copy of the
/// inline tag, so `B` keeps the inline style. A split cascades through all enclosing inline tags.
pub(crate) fn fix_nesting(tokens: &mut Vec<Token>, registry: &HandlerRegistry, fix_invalid_children: bool) {
    let fixer = NestingFixer {
        registry,
        fix_invalid_children,
    };
    fixer.fix(tokens, false);
}

struct NestingFixer<'a> {
    registry: &'a HandlerRegistry,
    fix_invalid_children: bool,
}

impl NestingFixer<'_> {
    fn is_inline(&self, token: &Token) -> bool {
        self.registry.is_inline(&token.name)
    }

    fn allows_child(&self, parent: &Token, child: &Token) -> bool {
        if !self.fix_invalid_children {
            return true;
        }
        self.registry
            .get(&parent.name)
            .map_or(true, |x| x.allows_child(&child.name))
    }

    /// Fix `children` of a tag, `inside_inline` tells any ancestor is inline.
    ///
    /// Return the index of a block level child when it is inside an inline tag. The caller owning
    /// the parent splits it there.
    fn fix(&self, children: &mut Vec<Token>, inside_inline: bool) -> Option<usize> {
        let mut i = 0;
        while i < children.len() {
            if !children[i].is_open() {
                i += 1;
                continue;
            }

            if inside_inline && !self.is_inline(&children[i]) {
                return Some(i);
            }

            let child_inside_inline = inside_inline || self.is_inline(&children[i]);
            if let Some(at) = self.fix(&mut children[i].children, child_inside_inline) {
                self.split(children, i, at);
            }
            i += 1;
        }
        None
    }

    /// Split `children[index]` at its child `at`, which is a block level tag.
    ///
    /// Result in `[left, block, (newline), right]` starting at `index`.
    fn split(&self, children: &mut Vec<Token>, index: usize, at: usize) {
        let parent = &mut children[index];
        let mut right = parent.split_at(at);
        let mut block = right.children.remove(0);
        tracing::debug!("split inline tag {} at block tag {}", parent.name, block.name);

        if self.allows_child(&block, parent) {
            let wrapper = parent.clone_empty().with_children(std::mem::take(&mut block.children));
            block.children = vec![wrapper];
        }

        let newline = match right.children.first() {
            Some(v) if v.is_newline() && !self.is_inline(&block) => Some(right.children.remove(0)),
            _ => None,
        };

        let mut insert_at = index + 1;
        children.insert(insert_at, block);
        if let Some(newline) = newline {
            insert_at += 1;
            children.insert(insert_at, newline);
        }
        children.insert(insert_at + 1, right);
    }
}
