//! Live representation of a schema
//!
//! [`LiveTree`] owns every live node instantiated from a schema. Nodes live
//! in an arena addressed by [`NodeId`]; an explicit path index maps each
//! node's [`Path`] to its id. Callers outside the crate never hold node
//! references, only paths.
//!
//! Every node records the path it is bound to. Lookups check that record
//! against the query, so an index entry left behind by a structural change
//! can never resolve to the wrong node.

use crate::path::Path;
use form_schema::{FieldDescriptor, FieldKind};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Handle of a node inside one [`LiveTree`]
///
/// Slots are reused after removal, so a handle is only meaningful until the
/// next structural change. Mutations from outside the crate go through paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One instantiated field
#[derive(Debug)]
pub struct LiveNode {
    path: Path,
    descriptor: Arc<FieldDescriptor>,
    body: NodeBody,
}

#[derive(Debug)]
pub(crate) enum NodeBody {
    Primitive { default: Value, value: Value },
    /// Fixed and dynamic collections; the descriptor tells them apart
    Collection { items: Vec<NodeId> },
    Record { fields: Vec<NodeId> },
}

impl LiveNode {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn descriptor(&self) -> &Arc<FieldDescriptor> {
        &self.descriptor
    }

    /// Current scalar of a primitive node
    pub fn value(&self) -> Option<&Value> {
        match &self.body {
            NodeBody::Primitive { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Default this primitive instance was seeded with
    pub fn default_value(&self) -> Option<&Value> {
        match &self.body {
            NodeBody::Primitive { default, .. } => Some(default),
            _ => None,
        }
    }

    /// Child nodes in display order (collection items or record fields)
    pub fn children(&self) -> &[NodeId] {
        match &self.body {
            NodeBody::Primitive { .. } => &[],
            NodeBody::Collection { items } => items,
            NodeBody::Record { fields } => fields,
        }
    }

    pub(crate) fn body(&self) -> &NodeBody {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut NodeBody {
        &mut self.body
    }
}

/// Arena of live nodes plus the path index
#[derive(Debug, Default)]
pub struct LiveTree {
    nodes: Vec<Option<LiveNode>>,
    free: Vec<usize>,
    index: HashMap<Path, NodeId>,
    root: Option<NodeId>,
}

impl LiveTree {
    /// Materialize `root` at the empty path.
    pub fn build(root: &Arc<FieldDescriptor>) -> Self {
        let mut tree = Self::default();
        let id = tree.materialize(root, Path::root(), None);
        tree.root = Some(id);
        tracing::debug!("Materialized live tree with {} nodes", tree.len());
        tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_torn_down(&self) -> bool {
        self.root.is_none()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Option<&LiveNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut LiveNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Node bound to `path`, if one exists.
    ///
    /// Absence is an ordinary outcome, e.g. after the item holding the path
    /// was removed.
    pub fn resolve(&self, path: &Path) -> Option<NodeId> {
        let id = *self.index.get(path)?;
        let node = self.node(id)?;
        if node.path == *path {
            Some(id)
        } else {
            tracing::warn!("Stale index entry for '{}' bound to '{}'", path, node.path);
            None
        }
    }

    /// Look up field `id` under `container`.
    pub fn resolve_field(&self, container: &Path, id: &str) -> Option<NodeId> {
        self.resolve(&container.child_key(id))
    }

    /// Instantiate `descriptor` and its children at `path`.
    ///
    /// `seed` replaces the descriptor's declared default for this instance
    /// only; a seed of the wrong shape is ignored. Dynamic collections get
    /// one item per default entry, padded up to their minimum length.
    pub(crate) fn materialize(
        &mut self,
        descriptor: &Arc<FieldDescriptor>,
        path: Path,
        seed: Option<&Value>,
    ) -> NodeId {
        let body = match &descriptor.kind {
            FieldKind::Primitive(p) => {
                let default = seed.cloned().unwrap_or_else(|| p.default.clone());
                NodeBody::Primitive {
                    value: default.clone(),
                    default,
                }
            }
            FieldKind::FixedCollection(f) => {
                let seeds = seed.and_then(Value::as_array).unwrap_or(&f.default);
                let items = (0..f.labels.len())
                    .map(|i| self.materialize(&f.item, path.child_index(i), seeds.get(i)))
                    .collect();
                NodeBody::Collection { items }
            }
            FieldKind::DynamicCollection(c) => {
                let seeds = seed.and_then(Value::as_array).unwrap_or(&c.default);
                let count = seeds.len().max(c.min_length);
                let items = (0..count)
                    .map(|i| self.materialize(&c.item, path.child_index(i), seeds.get(i)))
                    .collect();
                NodeBody::Collection { items }
            }
            FieldKind::Record(r) => {
                let fields = r
                    .fields
                    .iter()
                    .map(|field| {
                        let field_seed = seed.and_then(|s| s.get(&field.id));
                        self.materialize(field, path.child_key(&field.id), field_seed)
                    })
                    .collect();
                NodeBody::Record { fields }
            }
        };

        let node = LiveNode {
            path: path.clone(),
            descriptor: Arc::clone(descriptor),
            body,
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };
        self.index.insert(path, id);
        id
    }

    /// Destroy `id` and its whole subtree.
    pub(crate) fn release(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) else {
            return;
        };
        if self.index.get(&node.path) == Some(&id) {
            self.index.remove(&node.path);
        }
        self.free.push(id.0);
        for child in node.children() {
            self.release(*child);
        }
    }

    /// Rebind `id` and its subtree to `new_path`.
    ///
    /// The old index entry is dropped only while it still points at `id`;
    /// a sibling may already have been moved into it.
    pub(crate) fn rebase(&mut self, id: NodeId, new_path: Path) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let old_path = std::mem::replace(&mut node.path, new_path.clone());
        let is_record = matches!(node.body, NodeBody::Record { .. });
        let children = node.children().to_vec();

        if self.index.get(&old_path) == Some(&id) {
            self.index.remove(&old_path);
        }
        self.index.insert(new_path.clone(), id);

        for (i, child) in children.into_iter().enumerate() {
            let child_path = if is_record {
                match self.node(child) {
                    Some(c) => new_path.child_key(c.descriptor.id.clone()),
                    None => continue,
                }
            } else {
                new_path.child_index(i)
            };
            self.rebase(child, child_path);
        }
    }

    /// Release every node. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.root.is_none() && self.nodes.is_empty() {
            return;
        }
        tracing::debug!("Tearing down live tree with {} nodes", self.len());
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.root = None;
    }
}
