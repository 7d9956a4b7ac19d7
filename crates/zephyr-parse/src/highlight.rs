use text_size::TextRange;
use zephyr_errors::Diagnostic;
use zephyr_syntax::{StyleTag, Tree};

/// A styled span of the document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HighlightSpan {
    pub range: TextRange,
    pub tag: StyleTag,
}

/// Returns one span per styled leaf, in document order.
pub fn highlight(tree: &Tree) -> Vec<HighlightSpan> {
    highlight_range(tree, tree.root().range())
}

/// Like [`highlight`], limited to leaves intersecting `range`.
pub fn highlight_range(tree: &Tree, range: TextRange) -> Vec<HighlightSpan> {
    tree.leaves()
        .filter(|leaf| leaf.range().intersect(range).is_some())
        .filter_map(|leaf| {
            let tag = leaf.node_type().style()?;
            Some(HighlightSpan { range: leaf.range(), tag })
        })
        .collect()
}

/// Reports every leaf that resolved to the fallback node type.
pub fn diagnostics(tree: &Tree) -> Vec<Diagnostic> {
    tree.leaves()
        .filter(|leaf| leaf.node_type().is_unknown())
        .map(|leaf| Diagnostic::unrecognized_token(tree.text(), leaf.range()))
        .collect()
}
