//! Drag-to-reorder care checklist with optimistic local updates.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub label: String,
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

/// Snapshot taken before an optimistic change so it can be undone when the save fails.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "keep the change to revert it if the save fails"]
pub struct ChecklistChange {
    previous: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecklistError {
    #[error("position {index} is outside a checklist of {len} items")]
    OutOfBounds { index: usize, len: usize },
    #[error("no checklist item with id '{0}'")]
    UnknownItem(String),
    #[error("checklist already has an item with id '{0}'")]
    DuplicateItem(String),
    #[error("checklist item label cannot be empty")]
    EmptyLabel,
}

impl Checklist {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    /// Drag end: move the item at `from` so it lands at `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<ChecklistChange, ChecklistError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(ChecklistError::OutOfBounds { index, len });
            }
        }

        let change = self.snapshot();
        let item = self.items.remove(from);
        debug!(item = %item.id.0, from, to, "checklist item moved");
        self.items.insert(to, item);
        Ok(change)
    }

    pub fn toggle(&mut self, id: &ItemId) -> Result<ChecklistChange, ChecklistError> {
        let change = self.snapshot();
        let item = self
            .items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| ChecklistError::UnknownItem(id.0.clone()))?;
        item.done = !item.done;
        Ok(change)
    }

    pub fn add(
        &mut self,
        id: ItemId,
        label: impl Into<String>,
    ) -> Result<ChecklistChange, ChecklistError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(ChecklistError::EmptyLabel);
        }
        if self.items.iter().any(|item| item.id == id) {
            return Err(ChecklistError::DuplicateItem(id.0));
        }

        let change = self.snapshot();
        self.items.push(ChecklistItem {
            id,
            label,
            done: false,
        });
        Ok(change)
    }

    pub fn remove(&mut self, id: &ItemId) -> Result<ChecklistChange, ChecklistError> {
        let index = self
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| ChecklistError::UnknownItem(id.0.clone()))?;
        let change = self.snapshot();
        self.items.remove(index);
        Ok(change)
    }

    pub fn revert(&mut self, change: ChecklistChange) {
        debug!(restored = change.previous.len(), "checklist change reverted");
        self.items = change.previous;
    }

    fn snapshot(&self) -> ChecklistChange {
        ChecklistChange {
            previous: self.items.clone(),
        }
    }
}
