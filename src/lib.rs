//! A classic Knuth B-tree with parent back-links and bidirectional cursors.
//!
//! This crate provides [`BTree`], an ordered, set-like container keyed by a
//! caller-supplied strict weak order (the [`Less`] trait). The item *is* the
//! key: inserting an item that compares equal to a stored one replaces it in
//! place. On top of the usual logarithmic lookup, insertion and removal,
//! the tree exposes its node structure ([`NodeRef`]) and position-stable
//! [`Cursor`]s that walk to the ordered predecessor or successor, crossing
//! node boundaries through the parent back-link.
//!
//! # Example
//!
//! ```
//! use sabi_tree::BTree;
//!
//! let mut tree = BTree::new(2);
//! for word in ["pear", "apple", "quince", "fig"] {
//!     tree.insert(word);
//! }
//!
//! assert_eq!(tree.len(), 4);
//! assert_eq!(tree.get(&"fig"), Some(&"fig"));
//! assert_eq!(tree.first(), Some(&"apple"));
//!
//! // Walk forward from a found position.
//! let mut cursor = tree.find(&"fig").unwrap();
//! assert_eq!(cursor.next(), Some(&"pear"));
//! assert_eq!(cursor.next(), Some(&"quince"));
//! assert_eq!(cursor.next(), None);
//!
//! tree.remove(&"apple");
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), ["fig", "pear", "quince"]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Runtime fanout** - The branching factor is a per-tree `degree` parameter
//! - **Bidirectional cursors** - Ordered predecessor/successor stepping from any position
//! - **No unsafe code** - Nodes live in an index-addressed arena, so the parent
//!   back-link is a plain integer and the crate forbids `unsafe` outright
//!
//! # Implementation
//!
//! The tree is a classical B-tree in Knuth's sense: every item lives in
//! exactly one node, internal nodes carry separator items between their
//! children, and a node holds between `degree - 1` and `2 * degree - 1`
//! items (the root excepted). Each node records its parent, which is what
//! lets a cursor resume an in-order walk from any position without carrying
//! a path stack.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod less;
mod raw;

pub mod btree;

pub use btree::{BTree, Cursor, IntoIter, Iter, NodeRef};
pub use less::Less;
