use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use crate::error::{Error, Result};
use crate::raw::RawBstMap;

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// An ordered map based on a size-augmented [binary search tree].
///
/// Keys must implement [`Ord`]; the map keeps at most one entry per key and
/// re-inserting a key overwrites its value in place. Every node caches the size
/// of its subtree, which turns rank and select into single root-to-node walks.
///
/// The tree is not self-balancing. Lookups, insertions and removals take time
/// proportional to the depth of the tree, which is logarithmic for random
/// insertion orders and linear for sorted ones.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
///
/// # Examples
///
/// ```
/// use size_bst::{BstMap, Error};
///
/// let mut stock = BstMap::new();
///
/// stock.insert("pears", 12);
/// stock.insert("apples", 3);
/// stock.insert("plums", 0);
///
/// // Overwrite an existing entry.
/// assert_eq!(stock.insert("apples", 5), Some(3));
/// assert_eq!(stock.len(), 3);
///
/// // Failed lookups report why.
/// assert_eq!(stock.get("figs"), Err(Error::KeyNotFound));
///
/// // Order statistics.
/// assert_eq!(stock.min(), Ok(&"apples"));
/// assert_eq!(stock.floor("peaches"), Ok(&"apples"));
/// assert_eq!(stock.ceiling("peaches"), Ok(&"pears"));
///
/// // Removing an absent key is a no-op.
/// assert_eq!(stock.remove("figs"), None);
/// assert_eq!(stock.remove("plums"), Some(0));
/// assert_eq!(stock.to_string(), "pears:12(apples:5, --)");
/// ```
///
/// A `BstMap` with a known list of items can be initialized from an array:
///
/// ```
/// use size_bst::BstMap;
///
/// let solar_distance = BstMap::from([
///     ("Mercury", 0.4),
///     ("Venus", 0.7),
///     ("Earth", 1.0),
///     ("Mars", 1.5),
/// ]);
/// assert_eq!(solar_distance.max(), Ok(&"Venus"));
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct BstMap<K, V> {
    raw: RawBstMap<K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        BstMap { raw: RawBstMap::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// The count is cached at the root, so this is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a");
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut a = BstMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of nodes on the longest path from the root to a leaf,
    /// or 0 for an empty map.
    ///
    /// The tree is not rebalanced, so the height depends on insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let shuffled = BstMap::from([(2, ()), (1, ()), (3, ())]);
    /// assert_eq!(shuffled.height(), 2);
    ///
    /// let sorted = BstMap::from([(1, ()), (2, ()), (3, ())]);
    /// assert_eq!(sorted.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::{BstMap, Error};
    ///
    /// let mut map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.delete_min(), Ok((1, "a")));
    /// assert_eq!(map.delete_min(), Ok((2, "b")));
    /// assert_eq!(map.delete_min(), Err(Error::EmptyMap));
    /// ```
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        self.raw.delete_min().ok_or(Error::EmptyMap)
    }

    /// Removes and returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::{BstMap, Error};
    ///
    /// let mut map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.delete_max(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn delete_max(&mut self) -> Result<(K, V)> {
        self.raw.delete_max().ok_or(Error::EmptyMap)
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Ok(&"a"));
    /// assert_eq!(map.get(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// if let Ok(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the stored key and its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is not in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get_key_value(&1), Ok((&1, &"a")));
    /// assert!(map.get_key_value(&2).is_err());
    /// ```
    pub fn get_key_value<Q>(&self, key: &Q) -> Result<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_key_value(key).ok_or(Error::KeyNotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned and a new
    /// leaf is linked where the search for the key ended.
    ///
    /// If the map did have this key present, the value is updated in place and
    /// the old value is returned. The key is not updated and the shape of the
    /// tree does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert!(!map.is_empty());
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map. Removing an absent key changes nothing.
    ///
    /// A node with two children is replaced by its in-order successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove_entry(&1), Some((1, "a")));
    /// assert_eq!(map.remove_entry(&1), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }
}

impl<K, V> Default for BstMap<K, V> {
    /// Creates an empty `BstMap`.
    fn default() -> BstMap<K, V> {
        BstMap::new()
    }
}

impl<K: Clone, V: Clone> Clone for BstMap<K, V> {
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

/// Maps compare equal when they hold the same entries, whatever their shape.
impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    fn eq(&self, other: &BstMap<K, V>) -> bool {
        self.len() == other.len() && self.raw.in_order().eq(other.raw.in_order())
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.raw.in_order()).finish()
    }
}

/// Formats the tree structure: each node as `key:value`, followed by its
/// children in parentheses, with `--` standing for an empty child.
///
/// # Examples
///
/// ```
/// use size_bst::BstMap;
///
/// let map = BstMap::from([("M", 1), ("A", 2), ("S", 3), ("Z", 4)]);
/// assert_eq!(map.to_string(), "M:1(A:2, S:3(--, Z:4))");
/// assert_eq!(BstMap::<i32, i32>::new().to_string(), "--");
/// ```
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.write_tree(f)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> BstMap<K, V> {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    /// Inserts the pairs in iteration order, which fixes the shape of the tree.
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for BstMap<K, V> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    /// Converts a `[(K, V); N]` into a `BstMap<K, V>`, inserting in array order.
    ///
    /// If any entries in the array have equal keys, all but one of the
    /// corresponding values will be dropped.
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let map1 = BstMap::from([(1, 2), (3, 4)]);
    /// let map2: BstMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `BstMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}
