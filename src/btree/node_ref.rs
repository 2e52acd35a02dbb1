use core::fmt;
use core::ptr;

use crate::less::Less;
use crate::raw::{NodeId, RawBTree};

use super::Cursor;

/// A borrowed view of one node of a [`BTree`](crate::BTree).
///
/// Node references expose the tree's structure for inspection and are the
/// entry points for [`Cursor`] construction. They are snapshot-bound: the
/// borrow they hold keeps the tree immutable for their whole lifetime.
///
/// # Examples
///
/// ```
/// use sabi_tree::BTree;
///
/// let tree: BTree<i32> = (0..20).collect();
/// let root = tree.root().unwrap();
/// assert!(!root.is_leaf());
///
/// // Every child points back at the node it hangs off.
/// let child = root.child(0).unwrap();
/// assert_eq!(child.parent(), Some(root));
/// ```
pub struct NodeRef<'a, T> {
    raw: &'a RawBTree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

/// Identity comparison: two references are equal when they view the same
/// node of the same tree.
impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.raw, other.raw) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(super) fn new(raw: &'a RawBTree<T>, id: NodeId) -> Self {
        Self { raw, id }
    }

    /// The node's items, in strictly increasing order.
    #[must_use]
    pub fn items(&self) -> &'a [T] {
        self.raw.node(self.id).items()
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.raw.node(self.id).is_leaf()
    }

    /// Number of children; zero for a leaf, `items().len() + 1` otherwise.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.raw.node(self.id).children().len()
    }

    /// The `index`-th child, or `None` when out of range.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<NodeRef<'a, T>> {
        let id = *self.raw.node(self.id).children().get(index)?;
        Some(NodeRef::new(self.raw, id))
    }

    /// The parent node; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        let id = self.raw.node(self.id).parent()?;
        Some(NodeRef::new(self.raw, id))
    }

    /// The node holding the smallest item of this subtree.
    #[must_use]
    pub fn min(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.raw, self.raw.subtree_min(self.id))
    }

    /// The node holding the largest item of this subtree.
    #[must_use]
    pub fn max(&self) -> NodeRef<'a, T> {
        NodeRef::new(self.raw, self.raw.subtree_max(self.id))
    }
}

impl<'a, T: Less> NodeRef<'a, T> {
    /// Returns a cursor at the `index`-th item of this node.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid item index.
    #[must_use]
    pub fn cursor(&self, index: usize) -> Cursor<'a, T> {
        assert!(
            index < self.items().len(),
            "`NodeRef::cursor()` - `index` is out of bounds!"
        );
        Cursor::new(self.raw, self.id, index)
    }

    /// Returns a cursor at this node's first item.
    #[must_use]
    pub fn min_cursor(&self) -> Cursor<'a, T> {
        self.cursor(0)
    }

    /// Returns a cursor at this node's last item.
    #[must_use]
    pub fn max_cursor(&self) -> Cursor<'a, T> {
        self.cursor(self.items().len() - 1)
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("items", &self.items())
            .field("children", &self.child_count())
            .finish()
    }
}
