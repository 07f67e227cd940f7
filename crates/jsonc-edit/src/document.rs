//! The change-tracking document.

use std::fmt;
use std::str::FromStr;

use jsonc_edit_path::PathStep;
use jsonc_edit_util::{deep_equal, ValueKind};
use serde_json::{Map, Value};
use tracing::warn;

use crate::diff::{self, Diff};
use crate::edit::{ArrayEditor, PathEditor};
use crate::error::{DocumentError, EditError};
use crate::format::{to_pretty_string, FormattingOptions};
use crate::parser;
use crate::splice::apply_splices;
use crate::tracked::{self, ContainerKind, NodeId, TrackedNode};

static NULL: Value = Value::Null;

/// What a key of a container currently holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// A nested object or array, tracked by its own node.
    Node(NodeId),
    /// A scalar.
    Value(&'a Value),
}

impl<'a> Entry<'a> {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Entry::Node(id) => Some(*id),
            Entry::Value(_) => None,
        }
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Entry::Node(_) => None,
            Entry::Value(v) => Some(v),
        }
    }
}

/// A JSON-with-comments document that records edits and writes them back
/// into its source text without disturbing comments or layout.
///
/// ```
/// use jsonc_edit::JsoncDocument;
/// use serde_json::json;
///
/// let mut doc = JsoncDocument::parse("{\n  // listen port\n  \"port\": 80\n}\n").unwrap();
/// doc.update("port", json!(8080)).unwrap();
/// assert_eq!(doc.to_string(), "{\n  // listen port\n  \"port\": 8080\n}\n");
/// ```
///
/// # Panics
///
/// Methods taking a [`NodeId`] panic when the id was handed out by a
/// different document.
#[derive(Debug, Clone)]
pub struct JsoncDocument {
    source: Option<String>,
    baseline: Value,
    options: FormattingOptions,
    nodes: Vec<TrackedNode>,
}

impl JsoncDocument {
    /// Parse `text`, keeping it as the base for surgical serialization.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let parsed = parser::parse(text)?;
        Self::from_value(parsed.value, Some(text.to_owned()))
    }

    /// Track `value`, optionally backed by the text it came from.
    ///
    /// Without text, serialization always re-stringifies.
    pub fn from_value(value: Value, source: Option<String>) -> Result<Self, DocumentError> {
        let mut nodes = Vec::new();
        if tracked::build(&mut nodes, &value, Vec::new(), None).is_none() {
            return Err(DocumentError::RootNotContainer(ValueKind::of(&value)));
        }
        let options = source
            .as_deref()
            .map(FormattingOptions::detect)
            .unwrap_or_default();
        Ok(Self {
            source,
            baseline: value,
            options,
            nodes,
        })
    }

    pub fn with_options(mut self, options: FormattingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_mut(&mut self) -> NodeMut<'_> {
        self.node_mut(NodeId(0))
    }

    pub fn node_mut(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { doc: self, id }
    }

    pub fn kind(&self, id: NodeId) -> ContainerKind {
        self.tracked(id).kind
    }

    /// Path of the node from the root, in parsed-value coordinates.
    pub fn path(&self, id: NodeId) -> &[PathStep] {
        &self.tracked(id).path
    }

    pub(crate) fn tracked(&self, id: NodeId) -> &TrackedNode {
        &self.nodes[id.0]
    }

    /// The value the node started from: the parsed value for parsed
    /// containers, the assigned value for assigned ones.
    fn baseline_of(&self, id: NodeId) -> &Value {
        let node = self.tracked(id);
        let (Some(parent), Some(key)) = (node.parent, node.path.last()) else {
            return &self.baseline;
        };
        self.tracked(parent)
            .changes
            .get(key)
            .or_else(|| self.baseline_entry(parent, key))
            .unwrap_or(&NULL)
    }

    fn baseline_entry(&self, id: NodeId, key: &PathStep) -> Option<&Value> {
        match (self.baseline_of(id), key) {
            (Value::Object(map), PathStep::Key(k)) => map.get(k),
            (Value::Array(arr), PathStep::Index(i)) => arr.get(*i),
            _ => None,
        }
    }

    fn local_key(&self, id: NodeId, step: PathStep) -> Result<PathStep, DocumentError> {
        let rendered = step.to_string();
        self.tracked(id)
            .local_key(step)
            .ok_or(DocumentError::InvalidIndex(rendered))
    }

    /// Number of array slots: parsed elements plus appended ones.
    fn slot_len(&self, id: NodeId) -> usize {
        let base = match self.baseline_of(id) {
            Value::Array(arr) => arr.len(),
            _ => 0,
        };
        let changed = self
            .tracked(id)
            .changes
            .keys()
            .filter_map(|key| key.as_index())
            .map(|i| i + 1)
            .max()
            .unwrap_or(0);
        base.max(changed)
    }

    /// Current entry at `key`; `None` when absent, deleted or out of range.
    pub fn get(&self, id: NodeId, key: impl Into<PathStep>) -> Option<Entry<'_>> {
        let node = self.tracked(id);
        let key = node.local_key(key.into())?;
        if let Some(&child) = node.children.get(&key) {
            return Some(Entry::Node(child));
        }
        if let Some(value) = node.changes.get(&key) {
            return Some(Entry::Value(value));
        }
        if node.deletions.contains(&key) {
            return None;
        }
        self.baseline_entry(id, &key).map(Entry::Value)
    }

    /// Current value at `key` as a plain value.
    pub fn value(&self, id: NodeId, key: impl Into<PathStep>) -> Option<Value> {
        match self.get(id, key)? {
            Entry::Node(child) => Some(self.materialize(child)),
            Entry::Value(value) => Some(value.clone()),
        }
    }

    pub fn has(&self, id: NodeId, key: impl Into<PathStep>) -> bool {
        self.get(id, key).is_some()
    }

    /// Assign `value` to `key`.
    ///
    /// An array assigned over a tracked array is applied element by element,
    /// so untouched elements keep their text. Any other value replaces the
    /// entry; an assigned object or array gets its own node right away.
    /// Assigning the current value records nothing.
    pub fn set(
        &mut self,
        id: NodeId,
        key: impl Into<PathStep>,
        value: Value,
    ) -> Result<(), DocumentError> {
        let key = self.local_key(id, key.into())?;
        if let Some(current) = self.value(id, key.clone()) {
            if deep_equal(&current, &value) {
                return Ok(());
            }
        }
        let child = self.tracked(id).children.get(&key).copied();
        if let (Some(child), Value::Array(items)) = (child, &value) {
            if self.kind(child) == ContainerKind::Array {
                return self.reconcile_array(child, items);
            }
        }
        let child_path = self.tracked(id).child_path(&key);
        let child = tracked::build(&mut self.nodes, &value, child_path, Some(id));
        let node = &mut self.nodes[id.0];
        node.forget(&key);
        node.changes.insert(key.clone(), value);
        if let Some(child) = child {
            node.children.insert(key, child);
        }
        Ok(())
    }

    /// Remove `key`. Returns whether anything was there.
    pub fn delete(&mut self, id: NodeId, key: impl Into<PathStep>) -> Result<bool, DocumentError> {
        let key = self.local_key(id, key.into())?;
        let present = self.has(id, key.clone());
        let parsed = self.baseline_entry(id, &key).is_some();
        let node = &mut self.nodes[id.0];
        node.forget(&key);
        if parsed {
            node.deletions.insert(key);
        }
        Ok(present)
    }

    /// Keys currently present, parsed ones first.
    ///
    /// Array keys are slot numbers; appended slots past a gap are listed but
    /// the gap itself is not.
    pub fn keys(&self, id: NodeId) -> Vec<PathStep> {
        let node = self.tracked(id);
        match (node.kind, self.baseline_of(id)) {
            (ContainerKind::Object, base) => {
                let base = base.as_object();
                let mut keys: Vec<PathStep> = base
                    .into_iter()
                    .flat_map(|map| map.keys())
                    .map(|k| PathStep::Key(k.clone()))
                    .filter(|key| !node.deletions.contains(key))
                    .collect();
                for key in node.changes.keys() {
                    let parsed = base.is_some_and(|map| map.contains_key(&*key.to_key()));
                    if !parsed {
                        keys.push(key.clone());
                    }
                }
                keys
            }
            (ContainerKind::Array, _) => (0..self.slot_len(id))
                .map(PathStep::Index)
                .filter(|key| self.has(id, key.clone()))
                .collect(),
        }
    }

    pub fn len(&self, id: NodeId) -> usize {
        self.keys(id).len()
    }

    pub fn is_empty(&self, id: NodeId) -> bool {
        self.len(id) == 0
    }

    /// The node's current content as a plain value.
    ///
    /// Deleted array slots are dropped and the remaining elements close up;
    /// gaps before appended slots are filled with `null`.
    pub fn materialize(&self, id: NodeId) -> Value {
        let node = self.tracked(id);
        match node.kind {
            ContainerKind::Object => {
                let mut map = Map::new();
                for key in self.keys(id) {
                    if let Some(value) = self.value(id, key.clone()) {
                        map.insert(key.to_key().into_owned(), value);
                    }
                }
                Value::Object(map)
            }
            ContainerKind::Array => {
                let mut arr = Vec::new();
                for i in 0..self.slot_len(id) {
                    let key = PathStep::Index(i);
                    if node.deletions.contains(&key) {
                        continue;
                    }
                    arr.push(self.value(id, key).unwrap_or(Value::Null));
                }
                Value::Array(arr)
            }
        }
    }

    fn reconcile_array(&mut self, id: NodeId, items: &[Value]) -> Result<(), DocumentError> {
        let old_len = self.slot_len(id);
        for i in 0..old_len.max(items.len()) {
            match items.get(i) {
                Some(item) => self.set(id, i, item.clone())?,
                None => {
                    self.delete(id, i)?;
                }
            }
        }
        Ok(())
    }

    /// Bring the node in line with `value` using the smallest set of
    /// per-key edits: absent keys are deleted, nested objects are merged
    /// recursively and everything else goes through [`set`](Self::set).
    pub fn reconcile(&mut self, id: NodeId, value: &Value) -> Result<(), DocumentError> {
        match (self.kind(id), value) {
            (ContainerKind::Object, Value::Object(map)) => {
                for key in self.keys(id) {
                    if !map.contains_key(&*key.to_key()) {
                        self.delete(id, key)?;
                    }
                }
                for (key, item) in map {
                    let child = self.get(id, key.as_str()).and_then(|entry| entry.node());
                    match child {
                        Some(child) if item.is_object() && self.kind(child) == ContainerKind::Object => {
                            self.reconcile(child, item)?;
                        }
                        _ => self.set(id, key.as_str(), item.clone())?,
                    }
                }
                Ok(())
            }
            (ContainerKind::Array, Value::Array(items)) => self.reconcile_array(id, items),
            (kind, value) => Err(DocumentError::KindMismatch {
                expected: kind.value_kind(),
                found: ValueKind::of(value),
            }),
        }
    }

    /// Every recorded edit, as full paths from the root.
    pub fn diff(&self) -> Diff {
        diff::collect(self)
    }

    pub fn is_dirty(&self) -> bool {
        !self.diff().is_empty()
    }

    /// Apply the recorded edits to `source`: deletions first, then changes,
    /// each edit re-locating its target in the text produced so far.
    fn apply_edits(&self, source: &str) -> Result<String, EditError> {
        let diff = self.diff();
        let editor = ArrayEditor::new(self.options.clone());
        let mut text = source.to_owned();
        for path in diff.ordered_deletions() {
            let splices = editor.edit_for_delete(&text, path)?;
            text = apply_splices(&text, &splices)?;
        }
        for (path, value) in diff.rebased_changes() {
            let splices = editor.edit_for_set(&text, &path, value)?;
            text = apply_splices(&text, &splices)?;
        }
        let written = parser::parse(&text)?;
        if !deep_equal(&written.value, &self.materialize(self.root())) {
            return Err(EditError::Diverged);
        }
        Ok(text)
    }

    fn render(&self) -> String {
        let Some(source) = &self.source else {
            return to_pretty_string(&self.materialize(self.root()));
        };
        match self.apply_edits(source) {
            Ok(text) => {
                let mut out = text.trim_end_matches(['\r', '\n']).to_owned();
                out.push_str(&self.options.eol);
                out
            }
            Err(err) => {
                warn!(error = %err, "surgical edit failed, re-serializing document");
                to_pretty_string(&self.materialize(self.root()))
            }
        }
    }
}

impl fmt::Display for JsoncDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for JsoncDocument {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Mutable handle to one container of a document.
pub struct NodeMut<'a> {
    doc: &'a mut JsoncDocument,
    id: NodeId,
}

impl<'a> NodeMut<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> ContainerKind {
        self.doc.kind(self.id)
    }

    pub fn get(&self, key: impl Into<PathStep>) -> Option<Entry<'_>> {
        self.doc.get(self.id, key)
    }

    pub fn value(&self, key: impl Into<PathStep>) -> Option<Value> {
        self.doc.value(self.id, key)
    }

    pub fn has(&self, key: impl Into<PathStep>) -> bool {
        self.doc.has(self.id, key)
    }

    pub fn keys(&self) -> Vec<PathStep> {
        self.doc.keys(self.id)
    }

    pub fn set(&mut self, key: impl Into<PathStep>, value: Value) -> Result<(), DocumentError> {
        self.doc.set(self.id, key, value)
    }

    pub fn delete(&mut self, key: impl Into<PathStep>) -> Result<bool, DocumentError> {
        self.doc.delete(self.id, key)
    }

    pub fn materialize(&self) -> Value {
        self.doc.materialize(self.id)
    }

    /// Descend into the nested container at `key`.
    pub fn child(self, key: impl Into<PathStep>) -> Option<NodeMut<'a>> {
        let id = self.doc.get(self.id, key)?.node()?;
        Some(NodeMut { doc: self.doc, id })
    }
}
