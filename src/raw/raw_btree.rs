use alloc::vec::Vec;
use core::mem;

use crate::less::Less;

use super::arena::{NodeArena, NodeId};
use super::node::{search, Node};

/// The parent-linked B-tree core backing [`BTree`](crate::BTree).
///
/// All nodes live in the arena and refer to each other by [`NodeId`], so
/// the child-to-parent back-link is a plain index rather than a borrow.
/// Every method that moves a child between nodes rewrites that child's
/// parent link before returning.
#[derive(Clone)]
pub(crate) struct RawBTree<T> {
    nodes: NodeArena<T>,
    root: Option<NodeId>,
    degree: usize,
    len: usize,
}

/// Outcome of a node-level insertion.
enum Inserted<T> {
    /// An equal item was already stored; it has been overwritten in place.
    Replaced(T),
    /// The item went in without a split.
    Grew,
    /// The node split: the median and the new right sibling await promotion
    /// into the parent.
    Promoted { median: T, right: NodeId },
}

impl<T> RawBTree<T> {
    pub(crate) fn new(degree: usize) -> Self {
        assert!(degree >= 2, "`BTree::new()` - `degree` must be at least 2!");
        Self {
            nodes: NodeArena::new(),
            root: None,
            degree,
            len: 0,
        }
    }

    #[inline]
    pub(crate) const fn degree(&self) -> usize {
        self.degree
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Largest number of items a node may hold: `2 * degree - 1`.
    #[inline]
    pub(crate) const fn max_items(&self) -> usize {
        self.degree * 2 - 1
    }

    /// Smallest number of items a non-root node may hold: `degree - 1`.
    #[inline]
    pub(crate) const fn min_items(&self) -> usize {
        self.degree - 1
    }

    #[inline]
    pub(crate) const fn root(&self) -> Option<NodeId> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id]
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.reset();
        self.root = None;
        self.len = 0;
    }

    /// Leftmost leaf of the subtree rooted at `n`.
    pub(crate) fn subtree_min(&self, mut n: NodeId) -> NodeId {
        while let Some(&first) = self.node(n).children.first() {
            n = first;
        }
        n
    }

    /// Rightmost leaf of the subtree rooted at `n`.
    pub(crate) fn subtree_max(&self, mut n: NodeId) -> NodeId {
        while let Some(&last) = self.node(n).children.last() {
            n = last;
        }
        n
    }

    /// Node holding the smallest item, if any.
    pub(crate) fn min(&self) -> Option<NodeId> {
        self.root.map(|root| self.subtree_min(root))
    }

    /// Node holding the largest item, if any.
    pub(crate) fn max(&self) -> Option<NodeId> {
        self.root.map(|root| self.subtree_max(root))
    }

    /// Drains every item in ascending order, leaving the tree empty.
    ///
    /// Walks the structure once and frees nodes as it goes; no rebalancing
    /// takes place.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let Some(root) = self.root.take() else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(self.len);
        self.drain_subtree(root, &mut out);
        self.nodes.reset();
        self.len = 0;
        out
    }

    fn drain_subtree(&mut self, n: NodeId, out: &mut Vec<T>) {
        let node = self.nodes.remove(n);
        if node.children.is_empty() {
            out.extend(node.items);
            return;
        }
        let mut children = node.children.into_iter();
        if let Some(first) = children.next() {
            self.drain_subtree(first, out);
        }
        for (item, child) in node.items.into_iter().zip(children) {
            out.push(item);
            self.drain_subtree(child, out);
        }
    }
}

impl<T: Less> RawBTree<T> {
    /// Descends from the root, returning the holding node and item index of
    /// the match, if any.
    pub(crate) fn search(&self, item: &T) -> Option<(NodeId, usize)> {
        let mut current = self.root?;
        loop {
            let node = self.node(current);
            let (i, existed) = search(&node.items, item);
            if existed {
                return Some((current, i));
            }
            current = *node.children.get(i)?;
        }
    }

    /// Position of `n` within its parent's child list, located by binary
    /// searching the node's first item among the parent's separators.
    /// `None` for the root.
    pub(crate) fn parent_index(&self, n: NodeId) -> Option<usize> {
        let node = self.node(n);
        let parent = self.node(node.parent?);
        let (i, _) = search(&parent.items, &node.items[0]);
        (i < parent.children.len()).then_some(i)
    }
}

impl<T: Less + Clone> RawBTree<T> {
    /// Inserts `item`, returning the previously stored equal item when the
    /// insertion was a replacement.
    pub(crate) fn insert(&mut self, item: T) -> Option<T> {
        let Some(root) = self.root else {
            let mut node = Node::new();
            node.items.push(item);
            self.root = Some(self.nodes.insert(node));
            self.len = 1;
            return None;
        };

        match self.node_insert(root, item, false) {
            Inserted::Replaced(old) => Some(old),
            Inserted::Grew => {
                self.len += 1;
                None
            }
            Inserted::Promoted { median, right } => {
                // The old root split; grow the tree by one level.
                let mut new_root = Node::new();
                new_root.items.push(median);
                new_root.children.push(root);
                new_root.children.push(right);
                let id = self.nodes.insert(new_root);
                self.node_mut(root).parent = Some(id);
                self.node_mut(right).parent = Some(id);
                self.root = Some(id);
                self.len += 1;
                None
            }
        }
    }

    /// Recursive insertion step.
    ///
    /// `reentry` is true when the node is being re-entered to place a
    /// median promoted out of one of its children; the node then acts as an
    /// insertion target itself instead of descending again.
    fn node_insert(&mut self, n: NodeId, item: T, reentry: bool) -> Inserted<T> {
        let (i, existed) = search(&self.node(n).items, &item);
        if existed {
            return Inserted::Replaced(mem::replace(&mut self.node_mut(n).items[i], item));
        }

        if self.node(n).is_leaf() || reentry {
            if self.node(n).items.len() < self.max_items() {
                self.node_mut(n).items.insert(i, item);
                return Inserted::Grew;
            }
            return self.split(n, item);
        }

        let child = self.node(n).children[i];
        match self.node_insert(child, item, false) {
            Inserted::Promoted { median, right } => {
                // Re-enter this node with the promoted median. That insert
                // may split this node too, in which case the median lands
                // either here or in the freshly made right sibling; find it
                // again and hang the child's right half just after it.
                let key = median.clone();
                let outcome = self.node_insert(n, median, true);
                let (index, found) = search(&self.node(n).items, &key);
                if found {
                    self.node_mut(n).children.insert(index + 1, right);
                    self.node_mut(right).parent = Some(n);
                    return outcome;
                }
                if let Inserted::Promoted { right: upper_right, .. } = &outcome {
                    let upper_right = *upper_right;
                    let (index, found) = search(&self.node(upper_right).items, &key);
                    if found {
                        self.node_mut(upper_right).children.insert(index + 1, right);
                        self.node_mut(right).parent = Some(upper_right);
                    }
                }
                outcome
            }
            other => other,
        }
    }

    /// Splits a full node around its median and inserts `item` into
    /// whichever half it sorts into. The median is returned for the caller
    /// to promote; it is stored in neither half.
    fn split(&mut self, n: NodeId, item: T) -> Inserted<T> {
        let mid = self.min_items();

        let node = self.node_mut(n);
        let median = node.items.remove(mid);
        let mut right = Node::new();
        right.items = node.items.drain(mid..).collect();
        if !node.children.is_empty() {
            right.children = node.children.drain(mid + 1..).collect();
        }

        let goes_left = item.less(&median);
        let right_id = self.nodes.insert(right);
        for idx in 0..self.node(right_id).children.len() {
            let child = self.node(right_id).children[idx];
            self.node_mut(child).parent = Some(right_id);
        }

        let side = if goes_left { n } else { right_id };
        let (index, _) = search(&self.node(side).items, &item);
        self.node_mut(side).items.insert(index, item);

        Inserted::Promoted { median, right: right_id }
    }

    /// Removes the item equal to `item`, returning it when present.
    pub(crate) fn remove(&mut self, item: &T) -> Option<T> {
        let root = self.root?;
        let (new_root, removed) = self.node_remove(root, item, None);
        self.root = new_root;
        if let Some(id) = self.root {
            // Root promotion leaves a dangling back-link behind.
            self.node_mut(id).parent = None;
        }
        if removed.is_some() {
            self.len -= 1;
            if self.len == 0 {
                self.clear();
            }
        }
        removed
    }

    /// Recursive removal step.
    ///
    /// Returns the (possibly promoted) root of the whole tree - only the
    /// outermost call's value is meaningful - and the removed item.
    /// `parent_index` is the caller's child index for `n`, `None` at the
    /// root.
    fn node_remove(&mut self, n: NodeId, item: &T, parent_index: Option<usize>) -> (Option<NodeId>, Option<T>) {
        let (found, existed) = search(&self.node(n).items, item);
        let mut i = found;

        // Owned search target once a separator replacement redirects the
        // descent, and the item actually unhooked from this node.
        let mut separator: Option<T> = None;
        let mut original: Option<T> = None;

        if existed {
            if self.node(n).is_leaf() {
                let removed = self.node_mut(n).items.remove(i);
                let root = (!self.node(n).items.is_empty()).then_some(n);
                if self.node(n).parent.is_some() && self.node(n).items.len() < self.min_items() {
                    let pi = parent_index.expect("`RawBTree::node_remove()` - non-root node without a parent index!");
                    self.rebalance(n, pi, false);
                }
                return (root, Some(removed));
            }

            // Internal match: overwrite the separator with the extreme item
            // of the fuller bordering leaf (ties go right), then keep
            // descending on that side to remove the extreme item itself.
            let left_max = self.subtree_max(self.node(n).children[i]);
            let right_min = self.subtree_min(self.node(n).children[i + 1]);
            let replacement = if self.node(left_max).items.len() > self.node(right_min).items.len() {
                let items = &self.node(left_max).items;
                items[items.len() - 1].clone()
            } else {
                i += 1;
                self.node(right_min).items[0].clone()
            };
            original = Some(mem::replace(&mut self.node_mut(n).items[found], replacement.clone()));
            separator = Some(replacement);
        }

        let mut root = Some(n);
        let mut removed = None;
        if self.node(n).children.len() > i {
            let child = self.node(n).children[i];
            let target = separator.as_ref().unwrap_or(item);
            let (_, deep) = self.node_remove(child, target, Some(i));
            removed = match original {
                // The copy pulled out of the leaf is discarded; the caller
                // receives the item that sat in this node.
                Some(original) => deep.map(|_copy| original),
                None => deep,
            };

            if self.node(n).parent.is_none() {
                if self.node(n).items.is_empty() && !self.node(n).children.is_empty() {
                    // The root ran dry: its lone child takes over.
                    let promoted = self.node(n).children[0];
                    self.nodes.discard(n);
                    root = Some(promoted);
                }
            } else if self.node(n).items.len() < self.min_items() {
                let pi = parent_index.expect("`RawBTree::node_remove()` - non-root node without a parent index!");
                self.rebalance(n, pi, true);
            }
        }

        (root, removed)
    }

    /// Restores the minimum-occupancy invariant of `n` after a removal, by
    /// preference: borrow from the right sibling, borrow from the left
    /// sibling, absorb the right sibling, fold into the left sibling.
    fn rebalance(&mut self, n: NodeId, parent_index: usize, internal: bool) {
        let p = self.node(n).parent.expect("`RawBTree::rebalance()` - called on the root!");

        let siblings = self.node(p).children.len();
        let right_len = if parent_index + 1 < siblings {
            self.node(self.node(p).children[parent_index + 1]).items.len()
        } else {
            0
        };
        if right_len > self.min_items() {
            return self.rotate_left(n, p, parent_index, internal);
        }

        let left_len = if parent_index > 0 {
            self.node(self.node(p).children[parent_index - 1]).items.len()
        } else {
            0
        };
        if left_len > self.min_items() {
            return self.rotate_right(n, p, parent_index, internal);
        }

        if right_len > 0 {
            self.absorb_right_sibling(n, p, parent_index, internal);
        } else if left_len > 0 {
            self.fold_into_left_sibling(n, p, parent_index, internal);
        }
    }

    /// Borrows one item through the parent from the right sibling: the
    /// separator drops into `n`, the sibling's first item lifts into the
    /// separator slot, and for internal nodes the sibling's first child
    /// crosses over.
    fn rotate_left(&mut self, n: NodeId, p: NodeId, parent_index: usize, internal: bool) {
        let right = self.node(p).children[parent_index + 1];
        let lifted = self.node_mut(right).items.remove(0);
        let separator = mem::replace(&mut self.node_mut(p).items[parent_index], lifted);
        self.node_mut(n).items.push(separator);
        if internal {
            let child = self.node_mut(right).children.remove(0);
            self.node_mut(n).children.push(child);
            self.node_mut(child).parent = Some(n);
        }
    }

    /// Mirror of [`rotate_left`](Self::rotate_left) using the left sibling
    /// and the separator at `parent_index - 1`.
    fn rotate_right(&mut self, n: NodeId, p: NodeId, parent_index: usize, internal: bool) {
        let left = self.node(p).children[parent_index - 1];
        let lifted = self.node_mut(left).items.pop().expect("`RawBTree::rotate_right()` - left sibling is empty!");
        let separator = mem::replace(&mut self.node_mut(p).items[parent_index - 1], lifted);
        self.node_mut(n).items.insert(0, separator);
        if internal {
            let child = self.node_mut(left).children.pop().expect("`RawBTree::rotate_right()` - left sibling has no children!");
            self.node_mut(n).children.insert(0, child);
            self.node_mut(child).parent = Some(n);
        }
    }

    /// Merges the right sibling into `n` through the parent separator and
    /// frees the sibling's slot. May leave the parent under-occupied; the
    /// caller's unwinding handles that.
    fn absorb_right_sibling(&mut self, n: NodeId, p: NodeId, parent_index: usize, internal: bool) {
        let separator = self.node_mut(p).items.remove(parent_index);
        let right_id = self.node_mut(p).children.remove(parent_index + 1);
        let mut right = self.nodes.remove(right_id);

        let node = self.node_mut(n);
        node.items.push(separator);
        node.items.append(&mut right.items);
        if internal {
            for &child in &right.children {
                self.node_mut(child).parent = Some(n);
            }
            self.node_mut(n).children.extend(right.children);
        }
    }

    /// Merges `n` into its left sibling through the parent separator and
    /// frees `n`'s slot.
    fn fold_into_left_sibling(&mut self, n: NodeId, p: NodeId, parent_index: usize, internal: bool) {
        let left_id = self.node(p).children[parent_index - 1];
        let separator = self.node_mut(p).items.remove(parent_index - 1);
        let unhooked = self.node_mut(p).children.remove(parent_index);
        debug_assert_eq!(unhooked, n);
        let mut node = self.nodes.remove(n);

        let left = self.node_mut(left_id);
        left.items.push(separator);
        left.items.append(&mut node.items);
        if internal {
            for &child in &node.children {
                self.node_mut(child).parent = Some(left_id);
            }
            self.node_mut(left_id).children.extend(node.children);
        }
    }
}
