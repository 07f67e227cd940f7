//! Per-container change tracking.
//!
//! Every object and array of a document gets one [`TrackedNode`] in the
//! document's arena. A node records only its own local edits; nested edits
//! live in the child's node.
//!
//! Containers assigned after parsing get nodes as well. Such a node keeps
//! its assigned value in the parent's `changes` entry and reads it as its
//! baseline.

use indexmap::{IndexMap, IndexSet};
use jsonc_edit_path::{Path, PathStep};
use jsonc_edit_util::ValueKind;
use serde_json::Value;

/// Handle to a container node of a [`JsoncDocument`](crate::JsoncDocument).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => Some(ContainerKind::Object),
            Value::Array(_) => Some(ContainerKind::Array),
            _ => None,
        }
    }

    pub fn value_kind(self) -> ValueKind {
        match self {
            ContainerKind::Object => ValueKind::Object,
            ContainerKind::Array => ValueKind::Array,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct TrackedNode {
    pub(crate) path: Path,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: ContainerKind,
    pub(crate) children: IndexMap<PathStep, NodeId>,
    pub(crate) changes: IndexMap<PathStep, Value>,
    pub(crate) deletions: IndexSet<PathStep>,
}

impl TrackedNode {
    fn new(path: Path, parent: Option<NodeId>, kind: ContainerKind) -> Self {
        Self {
            path,
            parent,
            kind,
            children: IndexMap::new(),
            changes: IndexMap::new(),
            deletions: IndexSet::new(),
        }
    }

    /// Normalize `step` to this node's key form: `Index` for arrays, `Key`
    /// for objects. `None` when an array is addressed by a non-numeral key.
    pub(crate) fn local_key(&self, step: PathStep) -> Option<PathStep> {
        match (self.kind, step) {
            (ContainerKind::Array, step) => step.as_index().map(PathStep::Index),
            (ContainerKind::Object, PathStep::Index(i)) => Some(PathStep::Key(i.to_string())),
            (ContainerKind::Object, key) => Some(key),
        }
    }

    /// Drop every record held for `key`.
    pub(crate) fn forget(&mut self, key: &PathStep) {
        self.children.shift_remove(key);
        self.changes.shift_remove(key);
        self.deletions.shift_remove(key);
    }

    pub(crate) fn child_path(&self, key: &PathStep) -> Path {
        let mut path = self.path.clone();
        path.push(key.clone());
        path
    }
}

/// Append nodes for `value` and every container nested in it.
pub(crate) fn build(
    nodes: &mut Vec<TrackedNode>,
    value: &Value,
    path: Path,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    let kind = ContainerKind::of(value)?;
    let id = NodeId(nodes.len());
    nodes.push(TrackedNode::new(path, parent, kind));
    let entries: Vec<(PathStep, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (PathStep::Key(k.clone()), v)).collect(),
        Value::Array(arr) => arr.iter().enumerate().map(|(i, v)| (PathStep::Index(i), v)).collect(),
        _ => Vec::new(),
    };
    for (key, child) in entries {
        let child_path = nodes[id.0].child_path(&key);
        if let Some(child_id) = build(nodes, child, child_path, Some(id)) {
            nodes[id.0].children.insert(key, child_id);
        }
    }
    Some(id)
}
