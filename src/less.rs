use alloc::boxed::Box;
use alloc::string::String;

/// A strict weak order over `Self`, the ordering contract consumed by
/// [`BTree`](crate::BTree).
///
/// Implementations must be irreflexive (`!a.less(a)`), asymmetric
/// (`a.less(b)` implies `!b.less(a)`) and transitive. Two items `a` and `b`
/// with `!a.less(b) && !b.less(a)` are treated as equal everywhere in the
/// tree; this derived test is the only equality the tree ever uses, so
/// items may well be distinguishable (by fields the order ignores) while
/// still occupying the same slot.
///
/// The order must be pure and stable for as long as an item is stored.
/// Mutating a stored item so that its order relative to any other stored
/// item changes is a logic error; the resulting behavior is unspecified,
/// though it cannot violate memory safety.
///
/// Implementations are provided for the primitive integer types, `char`,
/// `bool`, `str`, `String`, references and `Box`es. Custom item types
/// implement the trait directly:
///
/// ```
/// use sabi_tree::{BTree, Less};
///
/// #[derive(Clone)]
/// struct Account {
///     id: u64,
///     balance: i64,
/// }
///
/// impl Less for Account {
///     fn less(&self, other: &Self) -> bool {
///         self.id < other.id
///     }
/// }
///
/// let mut tree = BTree::new(2);
/// tree.insert(Account { id: 7, balance: 100 });
/// // Same id, so this replaces the stored account.
/// tree.insert(Account { id: 7, balance: -25 });
/// assert_eq!(tree.len(), 1);
/// ```
pub trait Less {
    /// Returns `true` if `self` sorts strictly before `other`.
    fn less(&self, other: &Self) -> bool;
}

macro_rules! less_via_ord {
    ($($t:ty),* $(,)?) => {$(
        impl Less for $t {
            #[inline]
            fn less(&self, other: &Self) -> bool {
                self < other
            }
        }
    )*};
}

less_via_ord!(i8, i16, i32, i64, i128, isize);
less_via_ord!(u8, u16, u32, u64, u128, usize);
less_via_ord!(char, bool, str, String);

impl<T: Less + ?Sized> Less for &T {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        (**self).less(&**other)
    }
}

impl<T: Less + ?Sized> Less for Box<T> {
    #[inline]
    fn less(&self, other: &Self) -> bool {
        (**self).less(&**other)
    }
}
