//! Visual tree construction.
//!
//! Rendering is decoupled from mutation: the container commits state and
//! raises its dirty flag, and the host pulls a fresh [`VisualNode`] tree
//! whenever it wants to draw. The output carries everything a renderer
//! needs (label, style, selection highlight, check and expand affordances)
//! and nothing about the arena it came from.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::style::ItemStyle;

use super::config::TreeValue;
use super::state::{NodeId, TreeViewInner};

/// One node of the rendered tree.
///
/// `children` holds the rendered children only when the node is expanded;
/// `has_children` reports the underlying structure either way so the host
/// can draw the expand affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualNode {
    /// Stable identity key; the root renders as `NodeId::ROOT`.
    pub key: NodeId,
    /// Display text.
    pub label: String,
    /// Nesting level, root = 0.
    pub depth: u16,
    /// Effective style after inheritance resolution.
    pub style: ItemStyle,
    /// Selection highlight.
    pub selected: bool,
    /// Checkbox state.
    pub checked: bool,
    /// Expand-toggle state.
    pub expanded: bool,
    /// Whether the node has children at all.
    pub has_children: bool,
    /// Rendered children, present only when expanded.
    pub children: Vec<VisualNode>,
}

impl VisualNode {
    /// The visible rows in display order: self first, then expanded
    /// descendants, left-to-right.
    pub fn flatten(&self) -> Vec<&VisualNode> {
        let mut out = Vec::new();
        self.collect(&mut out);
        out
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a VisualNode>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }

    /// Fit the label into `max_width` terminal columns, truncating with
    /// an ellipsis when it overflows.
    pub fn fit_label(&self, max_width: u16) -> String {
        if max_width == 0 {
            return String::new();
        }
        if self.label.width() as u16 <= max_width {
            return self.label.clone();
        }
        let budget = max_width - 1;
        let mut width = 0u16;
        let mut out = String::new();
        for ch in self.label.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if width + w > budget {
                break;
            }
            width += w;
            out.push(ch);
        }
        out.push('…');
        out
    }
}

/// Build the visual subtree for `id`. Style inheritance resolves during
/// the walk: a node's override becomes the inherited style of its
/// children.
pub(super) fn build<V: TreeValue>(
    inner: &TreeViewInner<V>,
    id: NodeId,
    depth: u16,
    inherited: Option<ItemStyle>,
) -> VisualNode {
    let Some(entry) = inner.nodes.get(&id) else {
        // Ids handed to build always come from the arena.
        return VisualNode {
            key: id,
            label: String::new(),
            depth,
            style: inner.props.item_style,
            selected: false,
            checked: false,
            expanded: false,
            has_children: false,
            children: Vec::new(),
        };
    };
    let style = ItemStyle::resolve(entry.config.item_style, inherited, inner.props.item_style);
    let next_inherited = entry.config.item_style.or(inherited);
    let children = if entry.config.expanded {
        entry
            .children
            .iter()
            .map(|child| build(inner, *child, depth + 1, next_inherited))
            .collect()
    } else {
        Vec::new()
    };
    VisualNode {
        key: id,
        label: entry.config.label.clone(),
        depth,
        style,
        selected: entry.selected,
        checked: entry.config.checked,
        expanded: entry.config.expanded,
        has_children: !entry.children.is_empty(),
        children,
    }
}
