/// A zero-based position in the ascending key order of a map.
///
/// Indexing a [`BstMap`](crate::BstMap) by `Rank` selects through the cached
/// subtree sizes instead of walking the entries.
///
/// # Examples
///
/// ```
/// use size_bst::{BstMap, Rank};
///
/// let mut map = BstMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// assert_eq!(map[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
