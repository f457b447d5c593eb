//! TreeView container: node arena, selection slot, and the public API.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TreeError;
use crate::event::{ClickHandler, ExpandHandler, TreeEvent, TreeEventKind};
use crate::style::ItemStyle;

use super::config::{NodeConfig, NodeDecl, NodeProps, TreeValue};
use super::item::{ParentLink, TreeItem};
use super::render::{self, VisualNode};

/// Stable identity key for a node within one tree.
///
/// Keys survive re-renders and configuration changes; a key is never
/// reused after its node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// The root always mounts under this key.
    pub const ROOT: Self = Self(1);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__item_{}", self.0)
    }
}

/// One arena entry: the node's configuration plus its structural links.
pub(super) struct NodeSlot<V> {
    pub(super) config: NodeConfig<V>,
    pub(super) parent: ParentLink,
    pub(super) children: Vec<NodeId>,
    pub(super) selected: bool,
}

/// Construction-time configuration for a [`TreeView`].
pub struct TreeViewProps<V: TreeValue> {
    /// Declarative root; defaults to a bare `"Root"` node.
    pub root: Option<NodeDecl<V>>,
    /// Style applied to nodes without an override anywhere in their
    /// ancestor chain.
    pub item_style: ItemStyle,
    /// Invoked after an expand/collapse toggle with the new value.
    pub on_expand: Option<ExpandHandler<V>>,
    /// Invoked on click, before the node becomes the selection.
    pub on_item_click: Option<ClickHandler<V>>,
    /// Invoked on double-click.
    pub on_item_double_click: Option<ClickHandler<V>>,
}

impl<V: TreeValue> Default for TreeViewProps<V> {
    fn default() -> Self {
        Self {
            root: None,
            item_style: ItemStyle::default(),
            on_expand: None,
            on_item_click: None,
            on_item_double_click: None,
        }
    }
}

impl<V: TreeValue> TreeViewProps<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(mut self, decl: NodeDecl<V>) -> Self {
        self.root = Some(decl);
        self
    }

    pub fn item_style(mut self, style: ItemStyle) -> Self {
        self.item_style = style;
        self
    }

    pub fn on_expand(mut self, handler: impl Fn(&TreeItem<V>, bool) + Send + Sync + 'static) -> Self {
        let handler: ExpandHandler<V> = Arc::new(handler);
        self.on_expand = Some(handler);
        self
    }

    pub fn on_item_click(mut self, handler: impl Fn(&TreeItem<V>) + Send + Sync + 'static) -> Self {
        let handler: ClickHandler<V> = Arc::new(handler);
        self.on_item_click = Some(handler);
        self
    }

    pub fn on_item_double_click(
        mut self,
        handler: impl Fn(&TreeItem<V>) + Send + Sync + 'static,
    ) -> Self {
        let handler: ClickHandler<V> = Arc::new(handler);
        self.on_item_double_click = Some(handler);
        self
    }
}

/// Internal state behind the container handle.
pub(super) struct TreeViewInner<V: TreeValue> {
    pub(super) props: TreeViewProps<V>,
    pub(super) root_decl: NodeDecl<V>,
    pub(super) nodes: HashMap<NodeId, NodeSlot<V>>,
    pub(super) root: Option<NodeId>,
    pub(super) select: Option<NodeId>,
    pub(super) events: Vec<TreeEvent>,
    next_id: u64,
}

impl<V: TreeValue> TreeViewInner<V> {
    fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Look up an arena slot, failing fast when the tree is not mounted or
/// the key no longer exists.
pub(super) fn slot<'a, V: TreeValue>(
    inner: &'a TreeViewInner<V>,
    key: NodeId,
) -> Result<&'a NodeSlot<V>, TreeError> {
    if inner.root.is_none() {
        return Err(TreeError::NotMounted);
    }
    inner.nodes.get(&key).ok_or(TreeError::Detached)
}

/// Instantiate a declaration subtree into the arena. The caller is
/// responsible for linking the returned id into a parent's child list
/// (the root has no such list).
pub(super) fn instantiate<V: TreeValue>(
    inner: &mut TreeViewInner<V>,
    decl: NodeDecl<V>,
    parent: ParentLink,
) -> NodeId {
    let id = inner.alloc();
    let NodeDecl {
        label,
        value,
        expanded,
        checked,
        item_style,
        children,
    } = decl;
    inner.nodes.insert(
        id,
        NodeSlot {
            config: NodeConfig {
                label,
                value,
                expanded,
                checked,
                item_style,
            },
            parent,
            children: Vec::new(),
            selected: false,
        },
    );
    let child_ids: Vec<NodeId> = children
        .into_iter()
        .map(|child| instantiate(inner, child, ParentLink::Node(id)))
        .collect();
    if let Some(entry) = inner.nodes.get_mut(&id) {
        entry.children = child_ids;
    }
    id
}

fn mount<V: TreeValue>(inner: &mut TreeViewInner<V>) -> NodeId {
    let decl = inner.root_decl.clone();
    let root = instantiate(inner, decl, ParentLink::View);
    inner.root = Some(root);
    debug_assert_eq!(root, NodeId::ROOT);
    log::debug!("[tree] mounted {} nodes under root {root}", inner.nodes.len());
    root
}

/// Verify a node's parent chain resolves at this container.
///
/// Configuration writes are parent-delegated: a handle never touches its
/// slot directly, the chain is walked up to the container and the
/// container commits the merge.
fn ensure_routed<V: TreeValue>(inner: &TreeViewInner<V>, key: NodeId) -> Result<(), TreeError> {
    if inner.root.is_none() {
        return Err(TreeError::NotMounted);
    }
    let mut cursor = key;
    loop {
        let Some(entry) = inner.nodes.get(&cursor) else {
            return Err(TreeError::Detached);
        };
        match entry.parent {
            ParentLink::View => return Ok(()),
            ParentLink::Node(parent) => cursor = parent,
        }
    }
}

/// Tree-view container.
///
/// Owns the node arena (and therefore the root's configuration), the
/// single selection slot, and the event queue. `TreeView` is a cheap
/// clone handle over shared state, so it can be handed to nodes, hosts,
/// and callbacks alike.
///
/// The tree mounts lazily: `new` only captures the declaration, the first
/// [`TreeView::render`] instantiates it. Queries before that return
/// [`TreeError::NotMounted`].
pub struct TreeView<V: TreeValue> {
    inner: Arc<RwLock<TreeViewInner<V>>>,
    dirty: Arc<AtomicBool>,
}

impl<V: TreeValue> TreeView<V> {
    pub fn new(mut props: TreeViewProps<V>) -> Self {
        let root_decl = props.root.take().unwrap_or_default();
        Self {
            inner: Arc::new(RwLock::new(TreeViewInner {
                props,
                root_decl,
                nodes: HashMap::new(),
                root: None,
                select: None,
                events: Vec::new(),
                next_id: 1,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a view over the given root declaration with default props.
    pub fn with_root(decl: NodeDecl<V>) -> Self {
        Self::new(TreeViewProps::new().root(decl))
    }

    pub(super) fn read(&self) -> RwLockReadGuard<'_, TreeViewInner<V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, TreeViewInner<V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub(super) fn item(&self, key: NodeId) -> TreeItem<V> {
        TreeItem::new(self.clone(), key)
    }

    pub(super) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    pub(super) fn same_tree(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(super) fn expand_handler(&self) -> Option<ExpandHandler<V>> {
        self.read().props.on_expand.clone()
    }

    pub(super) fn click_handler(&self) -> Option<ClickHandler<V>> {
        self.read().props.on_item_click.clone()
    }

    pub(super) fn double_click_handler(&self) -> Option<ClickHandler<V>> {
        self.read().props.on_item_double_click.clone()
    }

    // -------------------------------------------------------------------------
    // Rendering / commit protocol
    // -------------------------------------------------------------------------

    /// Produce the visual tree for the current configuration.
    ///
    /// The first call mounts the declared tree; the root always renders
    /// under the constant key [`NodeId::ROOT`]. Collapsed subtrees are
    /// omitted from the output but remain part of the tree for lookups.
    pub fn render(&self) -> VisualNode {
        let mut inner = self.write();
        let root = match inner.root {
            Some(id) => id,
            None => mount(&mut inner),
        };
        render::build(&inner, root, 0, None)
    }

    /// Whether the first render has happened.
    pub fn is_mounted(&self) -> bool {
        self.read().root.is_some()
    }

    /// Whether state changed since the last [`TreeView::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Acknowledge the current state, typically after drawing it.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Drain the pending widget events in the order they fired.
    pub fn take_events(&self) -> Vec<TreeEvent> {
        std::mem::take(&mut self.write().events)
    }

    /// The container default style for nodes without an override.
    pub fn item_style(&self) -> ItemStyle {
        self.read().props.item_style
    }

    // -------------------------------------------------------------------------
    // Configuration access
    // -------------------------------------------------------------------------

    /// Shallow-merge `props` into the node's configuration: present keys
    /// overwrite, absent keys stay untouched.
    pub fn set_props(&self, item: &TreeItem<V>, props: NodeProps<V>) -> Result<(), TreeError> {
        if !self.same_tree(item.tree_view()) {
            return Err(TreeError::Detached);
        }
        let key = item.key();
        let mut inner = self.write();
        ensure_routed(&inner, key)?;
        if let Some(entry) = inner.nodes.get_mut(&key) {
            entry.config.apply(props);
        }
        drop(inner);
        self.mark_dirty();
        log::debug!("[tree] committed props for {key}");
        Ok(())
    }

    /// Snapshot of the node's current configuration.
    pub fn get_props(&self, item: &TreeItem<V>) -> Result<NodeConfig<V>, TreeError> {
        if !self.same_tree(item.tree_view()) {
            return Err(TreeError::Detached);
        }
        let inner = self.read();
        slot(&inner, item.key()).map(|entry| entry.config.clone())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Handle for the root node.
    pub fn get_item(&self) -> Result<TreeItem<V>, TreeError> {
        let inner = self.read();
        inner.root.map(|id| self.item(id)).ok_or(TreeError::NotMounted)
    }

    /// Handle for a node by its visual key, e.g. when mapping a rendered
    /// row back to the tree.
    pub fn node(&self, key: NodeId) -> Result<TreeItem<V>, TreeError> {
        let inner = self.read();
        slot(&inner, key)?;
        Ok(self.item(key))
    }

    /// First node (pre-order) whose value equals `value`, if any.
    pub fn find_item(&self, value: &V) -> Result<Option<TreeItem<V>>, TreeError> {
        self.get_item()?.find_item(value)
    }

    /// All nodes whose value equals `value`, in pre-order.
    pub fn find_items(&self, value: &V) -> Result<Vec<TreeItem<V>>, TreeError> {
        self.get_item()?.find_items(value)
    }

    /// All nodes with the check flag set, in pre-order, regardless of
    /// whether their ancestors are expanded.
    pub fn get_check_items(&self) -> Result<Vec<TreeItem<V>>, TreeError> {
        self.get_item()?.get_check_items()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Remove the node and its subtree if it is part of the tree.
    ///
    /// The root cannot be removed. Returns `Ok(false)` for the root and
    /// for nodes that are not (or no longer) attached.
    pub fn del_item(&self, item: &TreeItem<V>) -> Result<bool, TreeError> {
        self.get_item()?.del_item(item)
    }

    /// Currently selected node, if any.
    pub fn get_select_item(&self) -> Option<TreeItem<V>> {
        let inner = self.read();
        inner.select.map(|id| self.item(id))
    }

    /// Change the selection.
    ///
    /// Exactly one notification pair fires per call, deselect-old before
    /// select-new. Passing `None` clears the selection; the previous node
    /// is still notified.
    pub fn select_item(&self, item: Option<&TreeItem<V>>) -> Result<(), TreeError> {
        let mut inner = self.write();
        if inner.root.is_none() {
            return Err(TreeError::NotMounted);
        }
        let next = match item {
            Some(it) => {
                if !self.same_tree(it.tree_view()) || !inner.nodes.contains_key(&it.key()) {
                    return Err(TreeError::Detached);
                }
                Some(it.key())
            }
            None => None,
        };
        if let Some(old) = inner.select.take() {
            if let Some(entry) = inner.nodes.get_mut(&old) {
                entry.selected = false;
            }
            inner.events.push(TreeEvent::new(TreeEventKind::Deselected, old));
        }
        if let Some(new) = next {
            if let Some(entry) = inner.nodes.get_mut(&new) {
                entry.selected = true;
            }
            inner.events.push(TreeEvent::new(TreeEventKind::Selected, new));
        }
        inner.select = next;
        drop(inner);
        self.mark_dirty();
        log::debug!("[tree] select -> {next:?}");
        Ok(())
    }

    /// Expand every node that has children. Bulk operation: per-node
    /// expand callbacks do not fire.
    pub fn expand_all(&self) -> Result<(), TreeError> {
        self.set_expanded_all(|entry| !entry.children.is_empty(), true)
    }

    /// Collapse every node. Bulk operation: per-node expand callbacks do
    /// not fire.
    pub fn collapse_all(&self) -> Result<(), TreeError> {
        self.set_expanded_all(|_| true, false)
    }

    fn set_expanded_all(
        &self,
        filter: impl Fn(&NodeSlot<V>) -> bool,
        expanded: bool,
    ) -> Result<(), TreeError> {
        let mut inner = self.write();
        if inner.root.is_none() {
            return Err(TreeError::NotMounted);
        }
        let ids: Vec<NodeId> = inner
            .nodes
            .iter()
            .filter(|(_, entry)| filter(entry))
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            if let Some(entry) = inner.nodes.get_mut(&id) {
                entry.config.expanded = expanded;
            }
        }
        drop(inner);
        self.mark_dirty();
        Ok(())
    }
}

impl<V: TreeValue> Clone for TreeView<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<V: TreeValue> Default for TreeView<V> {
    fn default() -> Self {
        Self::new(TreeViewProps::default())
    }
}

impl<V: TreeValue> fmt::Debug for TreeView<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("TreeView")
            .field("mounted", &inner.root.is_some())
            .field("nodes", &inner.nodes.len())
            .field("select", &inner.select)
            .finish()
    }
}
