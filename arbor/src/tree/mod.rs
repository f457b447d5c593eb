//! Tree-view widget: container and recursive node handles.
//!
//! The container owns the whole tree (node arena, selection slot, event
//! queue); nodes are addressed through cheap [`TreeItem`] handles. State
//! changes raise the dirty flag and the host pulls a [`VisualNode`] tree
//! to draw.
//!
//! # Example
//!
//! ```
//! use arbor::prelude::*;
//!
//! let tree = TreeView::with_root(
//!     NodeDecl::new("root").expanded(true).children([
//!         NodeDecl::new("A").value(1),
//!         NodeDecl::new("B").value(2).child(NodeDecl::new("C").value(3)),
//!     ]),
//! );
//! let visual = tree.render();
//! assert_eq!(visual.key, NodeId::ROOT);
//!
//! let c = tree.find_item(&3).unwrap().unwrap();
//! assert_eq!(c.label().unwrap(), "C");
//! ```

mod config;
mod events;
mod item;
mod render;
mod state;

pub use config::{NodeConfig, NodeDecl, NodeProps, TreeValue};
pub use item::{ParentLink, TreeItem};
pub use render::VisualNode;
pub use state::{NodeId, TreeView, TreeViewProps};
