//! Widget events and host callbacks.
//!
//! Every observable transition pushes a [`TreeEvent`] onto the container's
//! queue; the host drains it with `TreeView::take_events`. Selection
//! notifications appear in the order they fired (deselect old, select
//! new), which is the contract tests rely on.

use std::sync::Arc;

use crate::tree::{NodeId, TreeItem};

/// What happened to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEventKind {
    /// The node became the selection.
    Selected,
    /// The node stopped being the selection.
    Deselected,
    /// Children became visible.
    Expanded,
    /// Children became hidden.
    Collapsed,
    /// Check flag turned on.
    Checked,
    /// Check flag turned off.
    Unchecked,
    /// The node was clicked.
    Clicked,
    /// The node was double-clicked.
    DoubleClicked,
    /// The node (and its subtree) was removed.
    Removed,
}

/// A discrete widget event tied to one node key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEvent {
    pub kind: TreeEventKind,
    pub key: NodeId,
}

impl TreeEvent {
    pub fn new(kind: TreeEventKind, key: NodeId) -> Self {
        Self { kind, key }
    }
}

/// Host callback for expand/collapse; receives the node and the new
/// expanded value.
pub type ExpandHandler<V> = Arc<dyn Fn(&TreeItem<V>, bool) + Send + Sync>;

/// Host callback for click/double-click on a node.
pub type ClickHandler<V> = Arc<dyn Fn(&TreeItem<V>) + Send + Sync>;
