//! Collecting the edits recorded in a document's node tree.

use jsonc_edit_path::{is_prefix, Path, PathStep};
use serde_json::Value;

use crate::document::JsoncDocument;
use crate::tracked::NodeId;

/// All edits of a document, as full paths from the root.
///
/// Array indices are slot numbers of the parsed value: deleting slot 0 does
/// not renumber slot 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    pub changes: Vec<(Path, Value)>,
    pub deletions: Vec<Path>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.deletions.is_empty()
    }

    /// Deletions in the order they are applied to text.
    ///
    /// Descending path order removes later array slots first, so every
    /// deletion still addresses its slot by its parsed index.
    pub fn ordered_deletions(&self) -> Vec<&Path> {
        let mut ordered: Vec<&Path> = self.deletions.iter().collect();
        ordered.sort_by(|a, b| b.cmp(a));
        ordered
    }

    /// Changes with array indices shifted down past deleted sibling slots,
    /// in collection order.
    pub fn rebased_changes(&self) -> Vec<(Path, &Value)> {
        self.changes
            .iter()
            .map(|(path, value)| (self.rebase(path), value))
            .collect()
    }

    fn rebase(&self, path: &[PathStep]) -> Path {
        path.iter()
            .enumerate()
            .map(|(depth, step)| match step {
                PathStep::Index(i) => {
                    let below = self
                        .deletions
                        .iter()
                        .filter(|del| {
                            del.len() == depth + 1
                                && is_prefix(&path[..depth], del)
                                && matches!(del[depth], PathStep::Index(d) if d < *i)
                        })
                        .count();
                    PathStep::Index(i - below)
                }
                key => key.clone(),
            })
            .collect()
    }
}

pub(crate) fn collect(doc: &JsoncDocument) -> Diff {
    let mut diff = Diff::default();
    walk(doc, doc.root(), &mut diff);
    diff
}

// An assigned container is written as one value, whatever was edited in it
// afterwards.
fn walk(doc: &JsoncDocument, id: NodeId, diff: &mut Diff) {
    let node = doc.tracked(id);
    for (key, value) in &node.changes {
        let value = match node.children.get(key) {
            Some(&child) => doc.materialize(child),
            None => value.clone(),
        };
        diff.changes.push((node.child_path(key), value));
    }
    for key in &node.deletions {
        diff.deletions.push(node.child_path(key));
    }
    for (key, &child) in &node.children {
        if !node.changes.contains_key(key) {
            walk(doc, child, diff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn idx(i: usize) -> PathStep {
        PathStep::Index(i)
    }

    #[test]
    fn deletions_run_from_last_slot() {
        let diff = Diff {
            changes: Vec::new(),
            deletions: vec![
                vec![PathStep::key("l"), idx(0)],
                vec![PathStep::key("l"), idx(2)],
                vec![PathStep::key("a")],
            ],
        };
        let ordered = diff.ordered_deletions();
        assert_eq!(ordered[0], &vec![PathStep::key("l"), idx(2)]);
        assert_eq!(ordered[1], &vec![PathStep::key("l"), idx(0)]);
        assert_eq!(ordered[2], &vec![PathStep::key("a")]);
    }

    #[test]
    fn changes_skip_deleted_slots() {
        let diff = Diff {
            changes: vec![
                (vec![PathStep::key("l"), idx(3), PathStep::key("x")], json!(1)),
                (vec![PathStep::key("m"), idx(3)], json!(2)),
            ],
            deletions: vec![
                vec![PathStep::key("l"), idx(0)],
                vec![PathStep::key("l"), idx(2)],
                vec![PathStep::key("l"), idx(5)],
            ],
        };
        let rebased = diff.rebased_changes();
        assert_eq!(rebased[0].0, vec![PathStep::key("l"), idx(1), PathStep::key("x")]);
        assert_eq!(rebased[1].0, vec![PathStep::key("m"), idx(3)]);
    }

    #[test]
    fn assigned_containers_collapse_to_one_change() {
        let mut doc = JsoncDocument::parse(r#"{"a": 1}"#).unwrap();
        let root = doc.root();
        doc.set(root, "o", json!({"p": {"q": 1}, "l": [1, 2]})).unwrap();
        let o = doc.get(root, "o").unwrap().node().unwrap();
        let p = doc.get(o, "p").unwrap().node().unwrap();
        doc.set(p, "r", json!(2)).unwrap();
        let l = doc.get(o, "l").unwrap().node().unwrap();
        doc.delete(l, 0usize).unwrap();
        let diff = collect(&doc);
        assert!(diff.deletions.is_empty());
        assert_eq!(
            diff.changes,
            vec![(
                vec![PathStep::key("o")],
                json!({"p": {"q": 1, "r": 2}, "l": [2]})
            )]
        );
    }

    #[test]
    fn walks_nested_nodes() {
        let mut doc = JsoncDocument::parse(r#"{"a": {"b": [1, 2]}, "c": 1}"#).unwrap();
        let root = doc.root();
        doc.delete(root, "c").unwrap();
        let a = doc.get(root, "a").unwrap().node().unwrap();
        let b = doc.get(a, "b").unwrap().node().unwrap();
        doc.set(b, 1usize, json!(3)).unwrap();
        let diff = collect(&doc);
        assert_eq!(diff.deletions, vec![vec![PathStep::key("c")]]);
        assert_eq!(
            diff.changes,
            vec![(vec![PathStep::key("a"), PathStep::key("b"), idx(1)], json!(3))]
        );
    }
}
