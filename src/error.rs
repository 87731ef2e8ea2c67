use thiserror::Error;

/// The ways a map query can fail.
///
/// Every variant describes the state of the map or the query, never a partial
/// mutation: an operation that returns an error has left the map unchanged.
///
/// # Examples
///
/// ```
/// use size_bst::{BstMap, Error};
///
/// let mut map: BstMap<i32, &str> = BstMap::new();
/// assert_eq!(map.min(), Err(Error::EmptyMap));
///
/// map.insert(10, "ten");
/// assert_eq!(map.get(&3), Err(Error::KeyNotFound));
/// assert_eq!(map.floor(&3), Err(Error::NoFloor));
/// assert_eq!(map.ceiling(&30), Err(Error::NoCeiling));
/// assert_eq!(Error::NoFloor.to_string(), "no key is less than or equal to the query");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// The operation needs at least one entry.
    #[error("map is empty")]
    EmptyMap,
    /// The key is not stored in the map.
    #[error("key not found")]
    KeyNotFound,
    /// Every stored key is greater than the query.
    #[error("no key is less than or equal to the query")]
    NoFloor,
    /// Every stored key is less than the query.
    #[error("no key is greater than or equal to the query")]
    NoCeiling,
}

/// Result alias for fallible map operations.
pub type Result<T> = core::result::Result<T, Error>;
