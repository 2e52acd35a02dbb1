use std::collections::BTreeSet;

use proptest::prelude::*;
use sabi_tree::BTree;

/// Collects the whole tree by walking a cursor forward from the minimum.
fn ascending_walk(tree: &BTree<i64>) -> Vec<i64> {
    let mut out = Vec::new();
    let Some(min) = tree.min() else {
        return out;
    };
    let mut cursor = min.min_cursor();
    out.push(*cursor.item());
    while let Some(&item) = cursor.next() {
        out.push(item);
    }
    out
}

/// Collects the whole tree by walking a cursor backward from the maximum.
fn descending_walk(tree: &BTree<i64>) -> Vec<i64> {
    let mut out = Vec::new();
    let Some(max) = tree.max() else {
        return out;
    };
    let mut cursor = max.max_cursor();
    out.push(*cursor.item());
    while let Some(&item) = cursor.prev() {
        out.push(item);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A forward walk visits every item exactly once, strictly increasing;
    /// a backward walk mirrors it.
    #[test]
    fn full_walks_cover_everything(
        degree in 2usize..=16,
        values in prop::collection::btree_set(-1000i64..1000, 0..512),
    ) {
        let mut tree = BTree::new(degree);
        tree.extend(values.iter().copied());
        let expected: Vec<i64> = values.iter().copied().collect();

        prop_assert_eq!(ascending_walk(&tree), expected.clone());
        prop_assert_eq!(ascending_walk(&tree).len(), tree.len());

        let mut reversed = expected;
        reversed.reverse();
        prop_assert_eq!(descending_walk(&tree), reversed);
    }

    /// From any found position, `next` yields the model successor and
    /// `prev` the model predecessor.
    #[test]
    fn steps_agree_with_the_model(
        degree in 2usize..=8,
        values in prop::collection::btree_set(-500i64..500, 1..256),
    ) {
        let mut tree = BTree::new(degree);
        tree.extend(values.iter().copied());
        let model: BTreeSet<i64> = values;

        for &v in &model {
            let mut forward = tree.find(&v).unwrap();
            prop_assert_eq!(forward.item(), &v);
            let successor = model.range((v + 1)..).next();
            prop_assert_eq!(forward.next(), successor, "successor of {}", v);

            let mut backward = tree.find(&v).unwrap();
            let predecessor = model.range(..v).next_back();
            prop_assert_eq!(backward.prev(), predecessor, "predecessor of {}", v);
        }
    }

    /// The std-style iterator agrees with `BTreeSet` front to back, back to
    /// front, and when consumed from both ends at once.
    #[test]
    fn iter_matches_btreeset(
        degree in 2usize..=16,
        values in prop::collection::vec(-1000i64..1000, 0..512),
    ) {
        let mut tree = BTree::new(degree);
        tree.extend(values.iter().copied());
        let model: BTreeSet<i64> = values.iter().copied().collect();

        let forward: Vec<_> = tree.iter().copied().collect();
        let expected: Vec<_> = model.iter().copied().collect();
        prop_assert_eq!(&forward, &expected);

        let backward: Vec<_> = tree.iter().rev().copied().collect();
        let mut expected_rev = expected.clone();
        expected_rev.reverse();
        prop_assert_eq!(&backward, &expected_rev);

        prop_assert_eq!(tree.iter().len(), tree.len());

        // Alternate ends; together both halves cover the set exactly.
        let mut iter = tree.iter();
        let mut seen = Vec::new();
        let mut toggle = true;
        loop {
            let next = if toggle { iter.next() } else { iter.next_back() };
            match next {
                Some(&item) => seen.push(item),
                None => break,
            }
            toggle = !toggle;
        }
        seen.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}

#[test]
fn ascending_walk_of_ten() {
    let mut tree = BTree::new(2);
    for i in 0i64..10 {
        tree.insert(i);
    }

    let mut cursor = tree.min().unwrap().min_cursor();
    let mut visited = vec![*cursor.item()];
    for _ in 0..9 {
        visited.push(*cursor.next().unwrap());
    }
    assert_eq!(visited, (0..10).collect::<Vec<_>>());
    assert_eq!(cursor.next(), None);
}

#[test]
fn exhausted_cursor_stays_put() {
    let tree: BTree<i64> = (0..100).collect();

    let mut cursor = tree.max().unwrap().max_cursor();
    assert_eq!(cursor.item(), &99);
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.next(), None);
    // The failed step did not move the cursor.
    assert_eq!(cursor.item(), &99);
    assert_eq!(cursor.prev(), Some(&98));

    let mut cursor = tree.min().unwrap().min_cursor();
    assert_eq!(cursor.prev(), None);
    assert_eq!(cursor.item(), &0);
    assert_eq!(cursor.next(), Some(&1));
}

#[test]
fn single_item_tree() {
    let mut tree = BTree::new(2);
    tree.insert(7i64);

    assert_eq!(tree.min(), tree.max());
    assert_eq!(tree.min(), tree.root());

    let mut cursor = tree.root().unwrap().min_cursor();
    assert_eq!(cursor.item(), &7);
    assert_eq!(cursor.next(), None);
    assert_eq!(cursor.prev(), None);
}

#[test]
fn cloned_cursor_forks_the_position() {
    let tree: BTree<i64> = (0..50).collect();

    let mut cursor = tree.find(&20).unwrap();
    let mut fork = cursor.clone();

    assert_eq!(cursor.next(), Some(&21));
    assert_eq!(cursor.next(), Some(&22));
    // The fork is unaffected by the original's movement.
    assert_eq!(fork.item(), &20);
    assert_eq!(fork.prev(), Some(&19));
}

#[test]
fn cursor_from_separator_positions() {
    // At degree 2 with this many items, plenty of items sit in internal
    // nodes; stepping from them must cross into subtrees both ways.
    let mut tree = BTree::new(2);
    tree.extend(0i64..64);
    let root = tree.root().unwrap();
    assert!(!root.is_leaf());

    for (i, &separator) in root.items().iter().enumerate() {
        let mut forward = root.cursor(i);
        assert_eq!(forward.item(), &separator);
        assert_eq!(forward.next(), Some(&(separator + 1)));

        let mut backward = root.cursor(i);
        assert_eq!(backward.prev(), Some(&(separator - 1)));
    }
}

#[test]
#[should_panic(expected = "`NodeRef::cursor()` - `index` is out of bounds!")]
fn cursor_index_out_of_bounds() {
    let tree: BTree<i64> = (0..4).collect();
    let root = tree.root().unwrap();
    let _ = root.cursor(root.items().len());
}
