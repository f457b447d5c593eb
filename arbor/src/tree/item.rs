//! TreeItem node handles, parent links, and the recursive tree walks.

use std::fmt;

use crate::error::TreeError;
use crate::event::{TreeEvent, TreeEventKind};
use crate::style::ItemStyle;

use super::config::{NodeConfig, NodeDecl, NodeProps, TreeValue};
use super::state::{instantiate, slot, NodeId, TreeView, TreeViewInner};

/// Link from a node to its owner.
///
/// The root's parent is the view itself; every other node points at
/// another node. Navigation only: the arena owns every slot, so a parent
/// link can never keep a node alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLink {
    /// This node is the root; its parent is the container.
    View,
    /// This node hangs under another node.
    Node(NodeId),
}

/// Handle to one node of a [`TreeView`].
///
/// Handles are cheap to clone and never own the node: a handle whose node
/// has been removed reports [`TreeError::Detached`] instead of faulting.
pub struct TreeItem<V: TreeValue> {
    view: TreeView<V>,
    key: NodeId,
}

impl<V: TreeValue> TreeItem<V> {
    pub(super) fn new(view: TreeView<V>, key: NodeId) -> Self {
        Self { view, key }
    }

    /// Stable visual key of this node.
    pub fn key(&self) -> NodeId {
        self.key
    }

    /// The container this node belongs to.
    pub fn tree_view(&self) -> &TreeView<V> {
        &self.view
    }

    /// Whether this handle points at the root node.
    pub fn is_root(&self) -> Result<bool, TreeError> {
        self.with_slot(|entry| matches!(entry.parent, ParentLink::View))
    }

    /// Whether the node is still part of the tree.
    pub fn is_attached(&self) -> bool {
        let inner = self.view.read();
        slot(&inner, self.key).is_ok()
    }

    fn with_slot<R>(
        &self,
        f: impl FnOnce(&super::state::NodeSlot<V>) -> R,
    ) -> Result<R, TreeError> {
        let inner = self.view.read();
        let entry = slot(&inner, self.key)?;
        Ok(f(entry))
    }

    // -------------------------------------------------------------------------
    // Configuration access
    // -------------------------------------------------------------------------

    /// Display text.
    pub fn label(&self) -> Result<String, TreeError> {
        self.with_slot(|entry| entry.config.label.clone())
    }

    /// Associated payload, if any.
    pub fn value(&self) -> Result<Option<V>, TreeError> {
        self.with_slot(|entry| entry.config.value.clone())
    }

    /// Whether children are rendered.
    pub fn expanded(&self) -> Result<bool, TreeError> {
        self.with_slot(|entry| entry.config.expanded)
    }

    /// Check flag.
    pub fn checked(&self) -> Result<bool, TreeError> {
        self.with_slot(|entry| entry.config.checked)
    }

    /// Whether this node is the current selection.
    pub fn selected(&self) -> Result<bool, TreeError> {
        self.with_slot(|entry| entry.selected)
    }

    /// Style override on this node, if any.
    pub fn item_style(&self) -> Result<Option<ItemStyle>, TreeError> {
        self.with_slot(|entry| entry.config.item_style)
    }

    /// Effective style: own override, else nearest ancestor override,
    /// else the container default.
    pub fn effective_style(&self) -> Result<ItemStyle, TreeError> {
        let inner = self.view.read();
        let mut cursor = slot(&inner, self.key)?;
        loop {
            if let Some(style) = cursor.config.item_style {
                return Ok(style);
            }
            match cursor.parent {
                ParentLink::View => return Ok(inner.props.item_style),
                ParentLink::Node(parent) => match inner.nodes.get(&parent) {
                    Some(next) => cursor = next,
                    None => return Ok(inner.props.item_style),
                },
            }
        }
    }

    /// Shallow-merge a configuration patch into this node.
    ///
    /// The write routes up the parent chain and is committed by the
    /// container, never applied by the handle itself.
    pub fn set_props(&self, props: NodeProps<V>) -> Result<(), TreeError> {
        self.view.set_props(self, props)
    }

    /// Snapshot of this node's configuration.
    pub fn get_props(&self) -> Result<NodeConfig<V>, TreeError> {
        self.view.get_props(self)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Parent node, or `None` for the root.
    pub fn parent(&self) -> Result<Option<TreeItem<V>>, TreeError> {
        let parent = self.with_slot(|entry| entry.parent)?;
        Ok(match parent {
            ParentLink::View => None,
            ParentLink::Node(id) => Some(self.view.item(id)),
        })
    }

    /// Child nodes in display order.
    pub fn children(&self) -> Result<Vec<TreeItem<V>>, TreeError> {
        let keys = self.with_slot(|entry| entry.children.clone())?;
        Ok(keys.into_iter().map(|id| self.view.item(id)).collect())
    }

    /// Whether this node has any children.
    pub fn has_children(&self) -> Result<bool, TreeError> {
        self.with_slot(|entry| !entry.children.is_empty())
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// First node in this subtree (pre-order: self, then children
    /// left-to-right) whose value equals `value`.
    pub fn find_item(&self, value: &V) -> Result<Option<TreeItem<V>>, TreeError> {
        let inner = self.view.read();
        slot(&inner, self.key)?;
        Ok(find_first(&inner, self.key, value).map(|id| self.view.item(id)))
    }

    /// All nodes in this subtree whose value equals `value`, pre-order.
    pub fn find_items(&self, value: &V) -> Result<Vec<TreeItem<V>>, TreeError> {
        let inner = self.view.read();
        slot(&inner, self.key)?;
        let mut keys = Vec::new();
        find_all(&inner, self.key, value, &mut keys);
        Ok(keys.into_iter().map(|id| self.view.item(id)).collect())
    }

    /// All checked nodes in this subtree, pre-order, regardless of the
    /// expansion state anywhere above them.
    pub fn get_check_items(&self) -> Result<Vec<TreeItem<V>>, TreeError> {
        let inner = self.view.read();
        slot(&inner, self.key)?;
        let mut keys = Vec::new();
        collect_checked(&inner, self.key, &mut keys);
        Ok(keys.into_iter().map(|id| self.view.item(id)).collect())
    }

    // -------------------------------------------------------------------------
    // Structure mutations
    // -------------------------------------------------------------------------

    /// Remove `item` from this node's subtree, dropping its whole
    /// subtree with it.
    ///
    /// A node cannot remove itself: the call must be made on an ancestor.
    /// Returns `Ok(false)` when `item` is this node or not a descendant.
    /// If the removed subtree contained the selection, the selection is
    /// cleared and the deselect notification fires.
    pub fn del_item(&self, item: &TreeItem<V>) -> Result<bool, TreeError> {
        if !self.view.same_tree(&item.view) {
            return Ok(false);
        }
        let target = item.key;
        let mut inner = self.view.write();
        slot(&inner, self.key)?;
        if target == self.key || !inner.nodes.contains_key(&target) {
            return Ok(false);
        }
        if !is_strict_descendant(&inner, self.key, target) {
            return Ok(false);
        }
        let parent = inner.nodes.get(&target).map(|entry| entry.parent);
        if let Some(ParentLink::Node(parent)) = parent
            && let Some(entry) = inner.nodes.get_mut(&parent)
        {
            entry.children.retain(|child| *child != target);
        }
        let mut removed = Vec::new();
        collect_subtree(&inner, target, &mut removed);
        for id in &removed {
            inner.nodes.remove(id);
        }
        if let Some(selected) = inner.select
            && removed.contains(&selected)
        {
            inner.select = None;
            inner
                .events
                .push(TreeEvent::new(TreeEventKind::Deselected, selected));
            log::debug!("[tree] selection cleared, node {selected} was removed");
        }
        inner.events.push(TreeEvent::new(TreeEventKind::Removed, target));
        log::debug!("[tree] removed {target} ({} nodes)", removed.len());
        drop(inner);
        self.view.mark_dirty();
        Ok(true)
    }

    /// Append a declared subtree as this node's last child.
    pub fn add_item(&self, decl: NodeDecl<V>) -> Result<TreeItem<V>, TreeError> {
        let mut inner = self.view.write();
        slot(&inner, self.key)?;
        let id = instantiate(&mut inner, decl, ParentLink::Node(self.key));
        if let Some(entry) = inner.nodes.get_mut(&self.key) {
            entry.children.push(id);
        }
        drop(inner);
        self.view.mark_dirty();
        log::debug!("[tree] added {id} under {}", self.key);
        Ok(self.view.item(id))
    }
}

impl<V: TreeValue> Clone for TreeItem<V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            key: self.key,
        }
    }
}

impl<V: TreeValue> PartialEq for TreeItem<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.view.same_tree(&other.view)
    }
}

impl<V: TreeValue> Eq for TreeItem<V> {}

impl<V: TreeValue> fmt::Debug for TreeItem<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeItem").field("key", &self.key).finish()
    }
}

// =============================================================================
// Recursive walks over the arena
// =============================================================================

fn find_first<V: TreeValue>(inner: &TreeViewInner<V>, id: NodeId, value: &V) -> Option<NodeId> {
    let entry = inner.nodes.get(&id)?;
    if entry.config.value.as_ref() == Some(value) {
        return Some(id);
    }
    for child in &entry.children {
        if let Some(found) = find_first(inner, *child, value) {
            return Some(found);
        }
    }
    None
}

fn find_all<V: TreeValue>(
    inner: &TreeViewInner<V>,
    id: NodeId,
    value: &V,
    out: &mut Vec<NodeId>,
) {
    let Some(entry) = inner.nodes.get(&id) else {
        return;
    };
    if entry.config.value.as_ref() == Some(value) {
        out.push(id);
    }
    for child in &entry.children {
        find_all(inner, *child, value, out);
    }
}

fn collect_checked<V: TreeValue>(inner: &TreeViewInner<V>, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(entry) = inner.nodes.get(&id) else {
        return;
    };
    if entry.config.checked {
        out.push(id);
    }
    for child in &entry.children {
        collect_checked(inner, *child, out);
    }
}

fn collect_subtree<V: TreeValue>(inner: &TreeViewInner<V>, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(entry) = inner.nodes.get(&id) else {
        return;
    };
    out.push(id);
    for child in &entry.children {
        collect_subtree(inner, *child, out);
    }
}

/// Whether `id` sits strictly below `ancestor`, following parent links.
fn is_strict_descendant<V: TreeValue>(
    inner: &TreeViewInner<V>,
    ancestor: NodeId,
    id: NodeId,
) -> bool {
    let mut cursor = id;
    loop {
        match inner.nodes.get(&cursor).map(|entry| entry.parent) {
            Some(ParentLink::Node(parent)) => {
                if parent == ancestor {
                    return true;
                }
                cursor = parent;
            }
            _ => return false,
        }
    }
}
