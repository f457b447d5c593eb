pub mod error;
pub mod event;
pub mod style;
pub mod tree;

pub use error::TreeError;
pub use tree::{TreeItem, TreeView};

pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::event::{TreeEvent, TreeEventKind};
    pub use crate::style::ItemStyle;
    pub use crate::tree::{
        NodeConfig, NodeDecl, NodeId, NodeProps, ParentLink, TreeItem, TreeValue, TreeView,
        TreeViewProps, VisualNode,
    };
}
