use alloc::vec::Vec;
use core::mem;
use core::num::NonZero;
use core::ops::{Index, IndexMut};

use super::node::Node;

/// 1-based slot number of a node in its tree's arena.
///
/// Zero never occurs, so `Option<NodeId>` - the representation of the
/// parent back-link and of the root - costs the same four bytes as the id
/// itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct NodeId(NonZero<u32>);

impl NodeId {
    /// Slot number of the slot appended after `count` existing ones.
    fn after(count: usize) -> Self {
        let raw = u32::try_from(count + 1).expect("`NodeArena` - node count exceeds `u32::MAX`!");
        // Slot numbers start at one, so the nonzero constructor holds.
        Self(NonZero::new(raw).expect("`NodeId::after()` - slot number is zero!"))
    }

    #[inline]
    fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}

/// Slab of tree nodes addressed by [`NodeId`].
///
/// Vacant slots form an intrusive free list: each one remembers the slot
/// vacated before it, and [`insert`](NodeArena::insert) pops the most
/// recently vacated slot before it ever grows the vector. A tree that
/// splits and merges in steady state therefore cycles through a fixed set
/// of slots, and a merge's husk costs nothing to give back.
#[derive(Clone)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    vacant_head: Option<NodeId>,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { older: Option<NodeId> },
}

impl<T> NodeArena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant_head: None,
        }
    }

    /// Stores `node` and returns its slot number.
    pub(crate) fn insert(&mut self, node: Node<T>) -> NodeId {
        match self.vacant_head {
            Some(id) => {
                let older = match self.slots[id.slot()] {
                    Slot::Vacant { older } => older,
                    Slot::Occupied(_) => panic!("`NodeArena::insert()` - free list points at a live node!"),
                };
                self.slots[id.slot()] = Slot::Occupied(node);
                self.vacant_head = older;
                id
            }
            None => {
                let id = NodeId::after(self.slots.len());
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Unlinks a node, returning it and threading its slot onto the free
    /// list.
    pub(crate) fn remove(&mut self, id: NodeId) -> Node<T> {
        let vacated = Slot::Vacant { older: self.vacant_head };
        match mem::replace(&mut self.slots[id.slot()], vacated) {
            Slot::Occupied(node) => {
                self.vacant_head = Some(id);
                node
            }
            Slot::Vacant { .. } => panic!("`NodeArena::remove()` - slot {id:?} is already vacant!"),
        }
    }

    /// Drops a node that merged away.
    pub(crate) fn discard(&mut self, id: NodeId) {
        drop(self.remove(id));
    }

    /// Forgets every node and every vacancy at once.
    pub(crate) fn reset(&mut self) {
        self.slots.clear();
        self.vacant_head = None;
    }

    /// Number of live nodes, counted the slow way. Test instrumentation:
    /// the tree checks it against the reachable node count to catch leaked
    /// slots.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Occupied(_))).count()
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("`NodeArena` - slot {id:?} is vacant!"),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.slot()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("`NodeArena` - slot {id:?} is vacant!"),
        }
    }
}
