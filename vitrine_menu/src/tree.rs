// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Disclosure tree: structure, open/close primitives, and change batching.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::error::MenuError;
use crate::types::{Branch, Expanded, Level, NodeHandle};

/// One collapsible branch: a top-level dropdown or a nested flyout.
///
/// `is_open` is the only state that changes after construction. The parent
/// link is a lookup handle into the same arena, not an ownership edge.
#[derive(Clone, Debug)]
pub struct DisclosureNode<K> {
    id: K,
    level: Level,
    is_open: bool,
    parent: Option<NodeHandle>,
    children: SmallVec<[NodeHandle; 4]>,
}

impl<K> DisclosureNode<K> {
    /// Host identifier of this branch.
    pub fn id(&self) -> &K {
        &self.id
    }

    /// Sibling group this branch belongs to.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether the branch is currently expanded.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The enclosing branch, if any.
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Nested branches in document order.
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

/// Arena of [`DisclosureNode`]s built once from a static menu description.
///
/// State changes are not pushed anywhere immediately. Each transition that
/// actually flips a node is recorded, and [`DisclosureTree::take_changes`]
/// drains them as a batch of [`Expanded`] signals for the host to apply.
///
/// ## Example
///
/// ```rust
/// use vitrine_menu::{Branch, DisclosureTree};
///
/// let mut tree = DisclosureTree::from_structure(&[Branch::with_children(
///     "services",
///     [Branch::leaf("consulting")],
/// )])
/// .unwrap();
///
/// let services = tree.handle(&"services").unwrap();
/// let consulting = tree.handle(&"consulting").unwrap();
/// tree.open(services);
/// tree.open(consulting);
///
/// // Closing the dropdown folds its flyout away too.
/// tree.close(services);
/// assert!(!tree.is_open(consulting));
/// assert_eq!(tree.take_changes().len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct DisclosureTree<K> {
    nodes: Vec<DisclosureNode<K>>,
    roots: SmallVec<[NodeHandle; 8]>,
    by_id: HashMap<K, NodeHandle>,
    /// State flips since the last drain, in the order they happened.
    changes: Vec<(NodeHandle, bool)>,
}

impl<K: Clone + Eq + Hash> DisclosureTree<K> {
    /// Build the tree from top-level branches.
    ///
    /// Top-level branches become [`Level::TopDropdown`] nodes, everything nested
    /// below them becomes [`Level::NestedFlyout`]. All nodes start closed.
    pub fn from_structure(branches: &[Branch<K>]) -> Result<Self, MenuError> {
        let mut tree = Self {
            nodes: Vec::new(),
            roots: SmallVec::new(),
            by_id: HashMap::new(),
            changes: Vec::new(),
        };
        for branch in branches {
            let root = tree.insert(branch, None, 0)?;
            tree.roots.push(root);
        }
        Ok(tree)
    }

    fn insert(
        &mut self,
        branch: &Branch<K>,
        parent: Option<NodeHandle>,
        depth: usize,
    ) -> Result<NodeHandle, MenuError> {
        let handle = NodeHandle::from_idx(self.nodes.len());
        if self.by_id.insert(branch.id.clone(), handle).is_some() {
            return Err(MenuError::DuplicateId);
        }
        self.nodes.push(DisclosureNode {
            id: branch.id.clone(),
            level: Level::for_depth(depth),
            is_open: false,
            parent,
            children: SmallVec::new(),
        });
        for child in &branch.children {
            let child = self.insert(child, Some(handle), depth + 1)?;
            self.nodes[handle.idx()].children.push(child);
        }
        Ok(handle)
    }

    /// Look up the handle for a host id.
    pub fn handle(&self, id: &K) -> Option<NodeHandle> {
        self.by_id.get(id).copied()
    }
}

impl<K> DisclosureTree<K> {
    /// Number of branches.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the menu has no disclosure branches at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level dropdowns in document order.
    pub fn roots(&self) -> &[NodeHandle] {
        &self.roots
    }

    /// Access a node.
    pub fn node(&self, handle: NodeHandle) -> Option<&DisclosureNode<K>> {
        self.nodes.get(handle.idx())
    }

    /// Whether `handle` is open. Unknown handles read as closed.
    pub fn is_open(&self, handle: NodeHandle) -> bool {
        self.node(handle).is_some_and(|n| n.is_open)
    }

    /// Every handle in the tree, parents before their children.
    pub fn handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        (0..self.nodes.len()).map(NodeHandle::from_idx)
    }

    /// Handles of all currently open branches.
    pub fn open_handles(&self) -> impl Iterator<Item = NodeHandle> + '_ {
        self.handles().filter(|&h| self.is_open(h))
    }

    /// Other members of `handle`'s sibling group: same parent, same level.
    ///
    /// The node itself is never included.
    pub fn siblings(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        let node = self.node(handle);
        let level = node.map(|n| n.level);
        let group: &[NodeHandle] = match node.and_then(|n| n.parent) {
            Some(parent) => self.nodes[parent.idx()].children.as_slice(),
            None if node.is_some() => self.roots.as_slice(),
            None => &[],
        };
        group
            .iter()
            .copied()
            .filter(move |&h| h != handle && Some(self.nodes[h.idx()].level) == level)
    }

    /// Expand `handle`. Siblings are left untouched.
    pub fn open(&mut self, handle: NodeHandle) {
        self.set_open(handle, true);
    }

    /// Collapse `handle` and, recursively, every branch below it.
    ///
    /// Descendants are visited even when `handle` was already closed, so a
    /// flyout left open under a collapsed dropdown cannot reappear expanded.
    pub fn close(&mut self, handle: NodeHandle) {
        if self.node(handle).is_none() {
            return;
        }
        self.set_open(handle, false);
        for i in 0..self.nodes[handle.idx()].children.len() {
            let child = self.nodes[handle.idx()].children[i];
            self.close(child);
        }
    }

    /// Flip `handle` and return the new state.
    ///
    /// This does not cascade; callers that observe `false` follow up with
    /// [`DisclosureTree::close`] to fold descendants away.
    pub fn toggle(&mut self, handle: NodeHandle) -> bool {
        let Some(node) = self.node(handle) else {
            return false;
        };
        let open = !node.is_open;
        self.set_open(handle, open);
        open
    }

    /// Collapse every branch in the tree.
    pub fn close_all(&mut self) {
        for i in 0..self.roots.len() {
            let root = self.roots[i];
            self.close(root);
        }
    }

    /// True if there are state flips that have not been drained yet.
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    fn set_open(&mut self, handle: NodeHandle, open: bool) {
        let Some(node) = self.nodes.get_mut(handle.idx()) else {
            return;
        };
        if node.is_open != open {
            node.is_open = open;
            self.changes.push((handle, open));
        }
    }
}

impl<K: Clone> DisclosureTree<K> {
    /// Drain recorded state flips as [`Expanded`] signals, oldest first.
    pub fn take_changes(&mut self) -> Vec<Expanded<K>> {
        let nodes = &self.nodes;
        self.changes
            .drain(..)
            .map(|(h, expanded)| Expanded {
                id: nodes[h.idx()].id.clone(),
                expanded,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> DisclosureTree<&'static str> {
        DisclosureTree::from_structure(&[
            Branch::with_children("a", [Branch::leaf("a1"), Branch::leaf("a2")]),
            Branch::with_children("b", [Branch::leaf("b1")]),
            Branch::leaf("c"),
        ])
        .unwrap()
    }

    fn h(tree: &DisclosureTree<&'static str>, id: &'static str) -> NodeHandle {
        tree.handle(&id).unwrap()
    }

    #[test]
    fn levels_follow_depth() {
        let tree = sample();
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.roots().len(), 3);
        assert_eq!(tree.node(h(&tree, "a")).unwrap().level(), Level::TopDropdown);
        assert_eq!(tree.node(h(&tree, "a1")).unwrap().level(), Level::NestedFlyout);
        assert_eq!(tree.node(h(&tree, "a1")).unwrap().parent(), Some(h(&tree, "a")));
        assert!(tree.open_handles().next().is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = DisclosureTree::from_structure(&[
            Branch::with_children("a", [Branch::leaf("x")]),
            Branch::with_children("b", [Branch::leaf("x")]),
        ])
        .unwrap_err();
        assert_eq!(err, MenuError::DuplicateId);
    }

    #[test]
    fn siblings_share_parent_and_exclude_self() {
        let tree = sample();
        let roots: Vec<_> = tree.siblings(h(&tree, "a")).collect();
        assert_eq!(roots, vec![h(&tree, "b"), h(&tree, "c")]);
        let flyouts: Vec<_> = tree.siblings(h(&tree, "a1")).collect();
        assert_eq!(flyouts, vec![h(&tree, "a2")]);
        assert_eq!(tree.siblings(h(&tree, "b1")).count(), 0);
    }

    #[test]
    fn open_does_not_touch_siblings() {
        let mut tree = sample();
        tree.open(h(&tree, "a"));
        tree.open(h(&tree, "b"));
        assert!(tree.is_open(h(&tree, "a")));
        assert!(tree.is_open(h(&tree, "b")));
    }

    #[test]
    fn close_cascades_to_descendants() {
        let mut tree = sample();
        tree.open(h(&tree, "a"));
        tree.open(h(&tree, "a1"));
        tree.open(h(&tree, "a2"));
        tree.close(h(&tree, "a"));
        assert_eq!(tree.open_handles().count(), 0);
    }

    #[test]
    fn close_reaches_stray_flyouts_under_closed_parent() {
        let mut tree = sample();
        tree.open(h(&tree, "b1"));
        tree.close(h(&tree, "b"));
        assert!(!tree.is_open(h(&tree, "b1")));
    }

    #[test]
    fn toggle_flips_without_cascading() {
        let mut tree = sample();
        let a = h(&tree, "a");
        let a1 = h(&tree, "a1");
        assert!(tree.toggle(a));
        tree.open(a1);
        assert!(!tree.toggle(a));
        // Toggle alone leaves the flyout as it was.
        assert!(tree.is_open(a1));
        tree.close(a);
        assert!(!tree.is_open(a1));
    }

    #[test]
    fn close_on_closed_node_records_nothing() {
        let mut tree = sample();
        tree.close(h(&tree, "a"));
        tree.close(h(&tree, "a"));
        assert!(!tree.has_pending_changes());
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn changes_drain_in_order() {
        let mut tree = sample();
        tree.open(h(&tree, "b"));
        tree.open(h(&tree, "b1"));
        tree.close_all();
        assert_eq!(
            tree.take_changes(),
            vec![
                Expanded { id: "b", expanded: true },
                Expanded { id: "b1", expanded: true },
                Expanded { id: "b", expanded: false },
                Expanded { id: "b1", expanded: false },
            ]
        );
        assert!(!tree.has_pending_changes());
    }
}
