//! An ordered map backed by a size-augmented binary search tree.
//!
//! [`BstMap`] keeps its entries in an unbalanced binary search tree in which
//! every node caches the number of nodes in its subtree. The cached sizes make
//! order-statistic queries as cheap as a lookup:
//!
//! - [`min`](BstMap::min) / [`max`](BstMap::max) - the smallest and largest keys
//! - [`floor`](BstMap::floor) / [`ceiling`](BstMap::ceiling) - the nearest stored key on either side of a query
//! - [`rank`](BstMap::rank) / [`get_by_rank`](BstMap::get_by_rank) - position of a key, and the key at a position
//!
//! # Example
//!
//! ```
//! use size_bst::{BstMap, Error};
//!
//! let mut ages = BstMap::new();
//! ages.insert("Mary", 10);
//! ages.insert("Alice", 30);
//! ages.insert("Vera", 60);
//!
//! assert_eq!(ages.get("Alice"), Ok(&30));
//! assert_eq!(ages.floor("Bob"), Ok(&"Alice"));
//! assert_eq!(ages.ceiling("Zoe"), Err(Error::NoCeiling));
//! assert_eq!(ages.to_string(), "Mary:10(Alice:30, Vera:60)");
//!
//! ages.remove("Mary");
//! assert_eq!(ages.to_string(), "Vera:60(Alice:30, --)");
//! ```
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to their children by handle, so an empty
//! subtree is simply `None`. Mutations walk down from the root recording the
//! path, link the replacement subtree into its parent and recompute the cached
//! sizes of the ancestors on the way back. Nothing recurses, so deep trees cost
//! time but not stack. The tree is never rebalanced: its depth is
//! whatever the insertion order produces, and sorted input degenerates into a
//! path.
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Structural events** - Emitted at `trace` level through [`tracing`]

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod bst_map;

pub use bst_map::BstMap;
pub use error::{Error, Result};
pub use order_statistic::Rank;
