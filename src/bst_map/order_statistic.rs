use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::BstMap;
use crate::Rank;
use crate::error::{Error, Result};

impl<K, V> BstMap<K, V> {
    /// Returns the smallest key in the map.
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
    /// let mut map = BstMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyMap));
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.first_key_value().map(|(key, _)| key)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.max(), Ok(&2));
    /// ```
    pub fn max(&self) -> Result<&K> {
        self.last_key_value().map(|(key, _)| key)
    }

    /// Returns the entry with the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let map = BstMap::from([(2, "b"), (1, "a")]);
    /// assert_eq!(map.first_key_value(), Ok((&1, &"a")));
    /// ```
    pub fn first_key_value(&self) -> Result<(&K, &V)> {
        self.raw.first_key_value().ok_or(Error::EmptyMap)
    }

    /// Returns the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty.
    pub fn last_key_value(&self) -> Result<(&K, &V)> {
        self.raw.last_key_value().ok_or(Error::EmptyMap)
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty, and [`Error::NoFloor`]
    /// if every key in the map is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::{BstMap, Error};
    ///
    /// let map = BstMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
    /// assert_eq!(map.floor(&20), Ok(&20));
    /// assert_eq!(map.floor(&25), Ok(&20));
    /// assert_eq!(map.floor(&99), Ok(&30));
    /// assert_eq!(map.floor(&5), Err(Error::NoFloor));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyMap);
        }
        self.raw.floor(key).ok_or(Error::NoFloor)
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMap`] if the map is empty, and
    /// [`Error::NoCeiling`] if every key in the map is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::{BstMap, Error};
    ///
    /// let map = BstMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
    /// assert_eq!(map.ceiling(&20), Ok(&20));
    /// assert_eq!(map.ceiling(&15), Ok(&20));
    /// assert_eq!(map.ceiling(&1), Ok(&10));
    /// assert_eq!(map.ceiling(&31), Err(Error::NoCeiling));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::EmptyMap);
        }
        self.raw.ceiling(key).ok_or(Error::NoCeiling)
    }

    /// Returns the number of keys in the map that are strictly less than `key`.
    ///
    /// `key` does not have to be present.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let map = BstMap::from([(10, 'a'), (20, 'b'), (30, 'c')]);
    /// assert_eq!(map.rank(&5), 0);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank(key)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.get_by_rank(rank)
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_bst::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Ok(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.get_by_rank_mut(rank)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K: Ord, V> Index<Rank> for BstMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use size_bst::{BstMap, Rank};
///
/// let mut map = BstMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Ok(&5));
/// ```
impl<K: Ord, V> IndexMut<Rank> for BstMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
