//! Node configuration: declarative input, owned state, and patches.

use serde::{Deserialize, Serialize};

use crate::style::ItemStyle;

/// Bound for the opaque per-node payload used by value lookups.
///
/// Matching in `find_item`/`find_items` is plain `PartialEq` on the
/// payload, not structural comparison of anything else.
pub trait TreeValue: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> TreeValue for T {}

/// Declarative description of a subtree, supplied at construction or to
/// `add_item`.
///
/// The container deep-copies the declaration into its own state; later
/// mutations never leak back into the caller's value. Missing fields
/// deserialize to the defaults, so `{}` is a bare `"Root"` node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDecl<V> {
    /// Display text.
    pub label: String,
    /// Opaque payload used for identity/search matching.
    pub value: Option<V>,
    /// Whether children start out visible.
    pub expanded: bool,
    /// Initial check flag.
    pub checked: bool,
    /// Style override; `None` inherits.
    pub item_style: Option<ItemStyle>,
    /// Nested declarations, in display order.
    pub children: Vec<NodeDecl<V>>,
}

impl<V> Default for NodeDecl<V> {
    fn default() -> Self {
        Self {
            label: "Root".to_string(),
            value: None,
            expanded: false,
            checked: false,
            item_style: None,
            children: Vec::new(),
        }
    }
}

impl<V> NodeDecl<V> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn item_style(mut self, style: ItemStyle) -> Self {
        self.item_style = Some(style);
        self
    }

    pub fn child(mut self, child: NodeDecl<V>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeDecl<V>>) -> Self {
        self.children.extend(children);
        self
    }
}

/// The configuration a node owns while it is part of the tree.
///
/// Children are not part of the configuration; the arena slot tracks them
/// so that structure and presentation state stay separable.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig<V> {
    /// Display text.
    pub label: String,
    /// Opaque payload used for identity/search matching.
    pub value: Option<V>,
    /// Whether children are rendered.
    pub expanded: bool,
    /// Independent per-node check flag; no cascading.
    pub checked: bool,
    /// Style override; `None` inherits.
    pub item_style: Option<ItemStyle>,
}

impl<V> From<&NodeDecl<V>> for NodeConfig<V>
where
    V: Clone,
{
    fn from(decl: &NodeDecl<V>) -> Self {
        Self {
            label: decl.label.clone(),
            value: decl.value.clone(),
            expanded: decl.expanded,
            checked: decl.checked,
            item_style: decl.item_style,
        }
    }
}

impl<V> NodeConfig<V> {
    /// Shallow-merge a patch: keys present in `props` overwrite, keys
    /// absent are left untouched.
    pub fn apply(&mut self, props: NodeProps<V>) {
        if let Some(label) = props.label {
            self.label = label;
        }
        if let Some(value) = props.value {
            self.value = Some(value);
        }
        if let Some(expanded) = props.expanded {
            self.expanded = expanded;
        }
        if let Some(checked) = props.checked {
            self.checked = checked;
        }
        if let Some(style) = props.item_style {
            self.item_style = Some(style);
        }
    }
}

/// A partial configuration update; every field is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeProps<V> {
    pub label: Option<String>,
    pub value: Option<V>,
    pub expanded: Option<bool>,
    pub checked: Option<bool>,
    pub item_style: Option<ItemStyle>,
}

impl<V> Default for NodeProps<V> {
    fn default() -> Self {
        Self {
            label: None,
            value: None,
            expanded: None,
            checked: None,
            item_style: None,
        }
    }
}

impl<V> NodeProps<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = Some(expanded);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    pub fn item_style(mut self, style: ItemStyle) -> Self {
        self.item_style = Some(style);
        self
    }
}
