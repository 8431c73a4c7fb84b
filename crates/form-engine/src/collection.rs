//! Runtime insertion and removal of dynamic collection items
//!
//! Removal is guarded by the collection's removal policy and minimum length.
//! A guarded call is refused, not failed: the tree is left untouched and the
//! reason is reported in the returned [`CollectionChange`].

use crate::live::{LiveTree, NodeBody, NodeId};
use form_schema::{DynamicCollectionField, FieldDescriptor, FieldKind};
use serde_json::Value;
use std::sync::Arc;

/// Outcome of a collection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Appended { index: usize },
    Removed { index: usize },
    Refused(RefusalReason),
}

/// Why a collection operation left the tree untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// No node at the given path
    Missing,
    /// The node is not a collection
    NotACollection,
    /// Fixed collections never change length
    FixedArity,
    /// The removal policy does not offer this action
    PolicyDisallows,
    /// Index past the end, or nothing left to remove
    OutOfRange,
    /// Removing would drop below the declared minimum length
    MinimumLength,
}

impl CollectionChange {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::Refused(_))
    }
}

enum Removal {
    At(usize),
    Last,
}

impl LiveTree {
    /// Number of items of the collection `id`
    pub fn item_count(&self, id: NodeId) -> Option<usize> {
        match self.node(id)?.body() {
            NodeBody::Collection { items } => Some(items.len()),
            _ => None,
        }
    }

    /// Append one item to the dynamic collection `id`.
    ///
    /// The new item is seeded with `default`, or the item type's default.
    pub(crate) fn append(&mut self, id: NodeId, default: Option<&Value>) -> CollectionChange {
        let field = match self.dynamic_field(id) {
            Ok(field) => field,
            Err(reason) => return refuse(reason),
        };
        let index = self.push_item(id, &field.item, default);
        tracing::debug!("Appended item {} to collection", index);
        CollectionChange::Appended { index }
    }

    /// Remove item `k` of the dynamic collection `id`.
    pub(crate) fn remove_at(&mut self, id: NodeId, k: usize) -> CollectionChange {
        self.remove(id, Removal::At(k))
    }

    /// Remove the tail item of the dynamic collection `id`.
    pub(crate) fn remove_last(&mut self, id: NodeId) -> CollectionChange {
        self.remove(id, Removal::Last)
    }

    /// Grow or shrink the dynamic collection `id` to `len` items, never
    /// below its minimum length. New items take the item type's default.
    pub(crate) fn resize(&mut self, id: NodeId, len: usize) {
        let Ok(field) = self.dynamic_field(id) else {
            return;
        };
        let target = len.max(field.min_length);
        let mut count = self.item_count(id).unwrap_or(0);
        if count != target {
            tracing::debug!("Resizing collection from {} to {} items", count, target);
        }
        while count < target {
            self.push_item(id, &field.item, None);
            count += 1;
        }
        while count > target {
            count -= 1;
            self.remove_unchecked(id, count);
        }
    }

    fn remove(&mut self, id: NodeId, removal: Removal) -> CollectionChange {
        let field = match self.dynamic_field(id) {
            Ok(field) => field,
            Err(reason) => return refuse(reason),
        };
        let count = self.item_count(id).unwrap_or(0);
        let (allowed, k) = match removal {
            Removal::At(k) => (field.removal_policy.allows_remove_at(), Some(k)),
            Removal::Last => (field.removal_policy.allows_remove_last(), count.checked_sub(1)),
        };
        if !allowed {
            return refuse(RefusalReason::PolicyDisallows);
        }
        let Some(k) = k.filter(|k| *k < count) else {
            return refuse(RefusalReason::OutOfRange);
        };
        if count - 1 < field.min_length {
            return refuse(RefusalReason::MinimumLength);
        }

        self.remove_unchecked(id, k);
        tracing::debug!("Removed item {} from collection", k);
        CollectionChange::Removed { index: k }
    }

    /// Materialize a new tail item and return its index.
    fn push_item(
        &mut self,
        id: NodeId,
        item: &Arc<FieldDescriptor>,
        default: Option<&Value>,
    ) -> usize {
        let Some(node) = self.node(id) else {
            return 0;
        };
        let index = node.children().len();
        let path = node.path().child_index(index);
        let child = self.materialize(item, path, default);
        if let Some(NodeBody::Collection { items }) = self.node_mut(id).map(|n| n.body_mut()) {
            items.push(child);
        }
        index
    }

    /// Destroy item `k` and shift the paths of every later item down by one.
    fn remove_unchecked(&mut self, id: NodeId, k: usize) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let base = node.path().clone();
        let NodeBody::Collection { items } = node.body_mut() else {
            return;
        };
        if k >= items.len() {
            return;
        }
        let removed = items.remove(k);
        let shifted: Vec<NodeId> = items[k..].to_vec();

        self.release(removed);
        for (offset, item) in shifted.into_iter().enumerate() {
            self.rebase(item, base.child_index(k + offset));
        }
    }

    fn dynamic_field(&self, id: NodeId) -> Result<DynamicCollectionField, RefusalReason> {
        let node = self.node(id).ok_or(RefusalReason::Missing)?;
        match &node.descriptor().kind {
            FieldKind::DynamicCollection(c) => Ok(c.clone()),
            FieldKind::FixedCollection(_) => Err(RefusalReason::FixedArity),
            _ => Err(RefusalReason::NotACollection),
        }
    }
}

fn refuse(reason: RefusalReason) -> CollectionChange {
    tracing::debug!("Collection change refused: {:?}", reason);
    CollectionChange::Refused(reason)
}
