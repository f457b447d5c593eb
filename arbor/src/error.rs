//! Tree-view error types.

use thiserror::Error;

/// Errors returned by the tree-view API.
///
/// "Not found" outcomes are never errors: lookups return `Ok(None)` or an
/// empty vec, and removing an absent node returns `Ok(false)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The tree has not been rendered yet. `get_item` and every traversal
    /// require a mounted tree; call `render` first.
    #[error("tree is not mounted: call render() first")]
    NotMounted,

    /// The handle refers to a node that has been removed from the tree.
    #[error("node is no longer attached to the tree")]
    Detached,
}
