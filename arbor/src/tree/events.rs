//! Interaction entry points for tree nodes.
//!
//! The host translates its input (mouse, keyboard, whatever) into these
//! calls. Every entry point mutates under the lock, releases it, and only
//! then invokes host callbacks, so callbacks are free to re-enter the
//! widget API.

use crate::error::TreeError;
use crate::event::{TreeEvent, TreeEventKind};

use super::config::TreeValue;
use super::item::TreeItem;
use super::state::slot;

impl<V: TreeValue> TreeItem<V> {
    /// Set the expanded flag, firing the container's `on_expand` callback
    /// when the value actually changes. Returns the new value.
    pub fn set_expanded(&self, expanded: bool) -> Result<bool, TreeError> {
        let key = self.key();
        let changed = {
            let mut guard = self.tree_view().write();
            slot(&guard, key)?;
            let inner = &mut *guard;
            let Some(entry) = inner.nodes.get_mut(&key) else {
                return Err(TreeError::Detached);
            };
            let changed = entry.config.expanded != expanded;
            entry.config.expanded = expanded;
            if changed {
                let kind = if expanded {
                    TreeEventKind::Expanded
                } else {
                    TreeEventKind::Collapsed
                };
                inner.events.push(TreeEvent::new(kind, key));
            }
            changed
        };
        if changed {
            self.tree_view().mark_dirty();
            log::debug!("[tree] {key} expanded -> {expanded}");
            if let Some(handler) = self.tree_view().expand_handler() {
                handler(self, expanded);
            }
        }
        Ok(expanded)
    }

    /// Flip the expanded flag. Returns the new value.
    pub fn toggle_expanded(&self) -> Result<bool, TreeError> {
        let expanded = self.expanded()?;
        self.set_expanded(!expanded)
    }

    /// Set the check flag. Independent per node: no propagation to
    /// parents or children. Returns the new value.
    pub fn set_checked(&self, checked: bool) -> Result<bool, TreeError> {
        let key = self.key();
        let changed = {
            let mut guard = self.tree_view().write();
            slot(&guard, key)?;
            let inner = &mut *guard;
            let Some(entry) = inner.nodes.get_mut(&key) else {
                return Err(TreeError::Detached);
            };
            let changed = entry.config.checked != checked;
            entry.config.checked = checked;
            if changed {
                let kind = if checked {
                    TreeEventKind::Checked
                } else {
                    TreeEventKind::Unchecked
                };
                inner.events.push(TreeEvent::new(kind, key));
            }
            changed
        };
        if changed {
            self.tree_view().mark_dirty();
            log::trace!("[tree] {key} checked -> {checked}");
        }
        Ok(checked)
    }

    /// Flip the check flag. Returns the new value.
    pub fn toggle_checked(&self) -> Result<bool, TreeError> {
        let checked = self.checked()?;
        self.set_checked(!checked)
    }

    /// Single click: fires `on_item_click`, then makes this node the
    /// selection.
    pub fn click(&self) -> Result<(), TreeError> {
        {
            let mut guard = self.tree_view().write();
            slot(&guard, self.key())?;
            let event = TreeEvent::new(TreeEventKind::Clicked, self.key());
            guard.events.push(event);
        }
        if let Some(handler) = self.tree_view().click_handler() {
            handler(self);
        }
        self.tree_view().select_item(Some(self))
    }

    /// Double click: fires `on_item_double_click`. Selection is left to
    /// the single-click half of the gesture.
    pub fn double_click(&self) -> Result<(), TreeError> {
        {
            let mut guard = self.tree_view().write();
            slot(&guard, self.key())?;
            let event = TreeEvent::new(TreeEventKind::DoubleClicked, self.key());
            guard.events.push(event);
        }
        if let Some(handler) = self.tree_view().double_click_handler() {
            handler(self);
        }
        Ok(())
    }
}
