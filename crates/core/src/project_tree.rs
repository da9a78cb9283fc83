//! In-memory project forest and the permission-filtered pre-order walk used
//! by the project listing.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::types::DbId;

/// A node that knows its own id and its parent's id.
pub trait TreeNode {
    fn node_id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("project {id} was reached twice while walking the project tree")]
    Cycle { id: DbId },
}

impl From<TreeError> for CoreError {
    fn from(err: TreeError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// Index over a flat slice of nodes. Sibling order follows slice order.
///
/// A node whose parent is absent from the slice is treated as a root.
/// Nodes on a parent cycle have no root above them and are never walked.
#[derive(Debug)]
pub struct Forest<'a, T> {
    nodes: &'a [T],
    roots: Vec<usize>,
    children: HashMap<DbId, Vec<usize>>,
}

impl<'a, T: TreeNode> Forest<'a, T> {
    pub fn build(nodes: &'a [T]) -> Self {
        let ids: HashSet<DbId> = nodes.iter().map(TreeNode::node_id).collect();
        let mut roots = Vec::new();
        let mut children: HashMap<DbId, Vec<usize>> = HashMap::new();

        for (idx, node) in nodes.iter().enumerate() {
            match node.parent_id() {
                Some(parent) if ids.contains(&parent) => {
                    children.entry(parent).or_default().push(idx);
                }
                _ => roots.push(idx),
            }
        }

        Self {
            nodes,
            roots,
            children,
        }
    }

    pub fn roots(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.roots.iter().map(|&i| &self.nodes[i])
    }

    /// Direct children of `id`, in slice order.
    pub fn children_of(&self, id: DbId) -> impl Iterator<Item = &'a T> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&i| &self.nodes[i])
    }

    /// Pre-order walk keeping only nodes accepted by `can_view`.
    ///
    /// Each node is checked on its own; a rejected node's subtree is not
    /// visited. The walk uses an explicit stack and fails if any node is
    /// reached twice.
    pub fn visible_preorder<F>(&self, can_view: F) -> Result<Vec<&'a T>, TreeError>
    where
        F: Fn(&T) -> bool,
    {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            let id = node.node_id();
            if !seen.insert(id) {
                return Err(TreeError::Cycle { id });
            }
            if !can_view(node) {
                continue;
            }
            out.push(node);
            if let Some(kids) = self.children.get(&id) {
                stack.extend(kids.iter().rev());
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Node {
        id: DbId,
        parent: Option<DbId>,
    }

    impl TreeNode for Node {
        fn node_id(&self) -> DbId {
            self.id
        }
        fn parent_id(&self) -> Option<DbId> {
            self.parent
        }
    }

    fn n(id: DbId, parent: Option<DbId>) -> Node {
        Node { id, parent }
    }

    fn ids(nodes: &[&Node]) -> Vec<DbId> {
        nodes.iter().map(|n| n.id).collect()
    }

    /// 1 ─┬─ 2 ── 4
    ///    └─ 3
    /// 5 ── 6
    fn sample() -> Vec<Node> {
        vec![
            n(1, None),
            n(2, Some(1)),
            n(3, Some(1)),
            n(4, Some(2)),
            n(5, None),
            n(6, Some(5)),
        ]
    }

    #[test]
    fn walks_in_preorder_when_everything_is_visible() {
        let nodes = sample();
        let forest = Forest::build(&nodes);
        let out = forest.visible_preorder(|_| true).unwrap();
        assert_eq!(ids(&out), [1, 2, 4, 3, 5, 6]);
    }

    #[test]
    fn hidden_node_prunes_its_subtree() {
        let nodes = sample();
        let forest = Forest::build(&nodes);
        let out = forest.visible_preorder(|n| n.id != 2).unwrap();
        assert_eq!(ids(&out), [1, 3, 5, 6]);
    }

    #[test]
    fn visibility_is_checked_per_node() {
        let nodes = sample();
        let forest = Forest::build(&nodes);
        let out = forest.visible_preorder(|n| n.id != 3 && n.id != 6).unwrap();
        assert_eq!(ids(&out), [1, 2, 4, 5]);
    }

    #[test]
    fn orphans_become_roots() {
        let nodes = vec![n(7, Some(99)), n(8, Some(7))];
        let forest = Forest::build(&nodes);
        assert_eq!(forest.roots().map(|n| n.id).collect::<Vec<_>>(), [7]);
        assert_eq!(forest.children_of(7).map(|n| n.id).collect::<Vec<_>>(), [8]);
    }

    #[test]
    fn parent_cycle_is_unreachable() {
        let nodes = vec![n(1, None), n(2, Some(3)), n(3, Some(2))];
        let forest = Forest::build(&nodes);
        let out = forest.visible_preorder(|_| true).unwrap();
        assert_eq!(ids(&out), [1]);
    }

    #[test]
    fn duplicate_node_is_reported() {
        let nodes = vec![n(1, None), n(2, Some(1)), n(2, Some(1))];
        let forest = Forest::build(&nodes);
        assert_eq!(
            forest.visible_preorder(|_| true).unwrap_err(),
            TreeError::Cycle { id: 2 }
        );
    }

    #[test]
    fn leaf_has_no_children() {
        let nodes = sample();
        let forest = Forest::build(&nodes);
        assert_eq!(forest.children_of(4).count(), 0);
    }
}
