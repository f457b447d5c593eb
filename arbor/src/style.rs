//! Visual style variants for tree items.

use serde::{Deserialize, Serialize};

/// Visual style selector for a tree item.
///
/// A node without an explicit style inherits from its nearest ancestor
/// with one, falling back to the container default. Resolution happens at
/// render time via [`ItemStyle::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStyle {
    /// Regular row styling.
    #[default]
    Plain,
    /// Emphasized row (e.g. branch/group headers).
    Accent,
    /// De-emphasized row (e.g. disabled or placeholder entries).
    Muted,
}

impl ItemStyle {
    /// Resolve the effective style for a node.
    ///
    /// Own override wins, then the nearest ancestor override carried down
    /// as `inherited`, then the container default.
    pub fn resolve(own: Option<Self>, inherited: Option<Self>, default: Self) -> Self {
        own.or(inherited).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_own_then_inherited_then_default() {
        assert_eq!(
            ItemStyle::resolve(Some(ItemStyle::Muted), Some(ItemStyle::Accent), ItemStyle::Plain),
            ItemStyle::Muted
        );
        assert_eq!(
            ItemStyle::resolve(None, Some(ItemStyle::Accent), ItemStyle::Plain),
            ItemStyle::Accent
        );
        assert_eq!(ItemStyle::resolve(None, None, ItemStyle::Plain), ItemStyle::Plain);
    }
}
