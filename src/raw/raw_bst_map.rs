use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::{Handle, Link};
use super::node::{Node, Side};
use super::size::Size;

/// The core binary search tree backing `BstMap`.
///
/// Walks never recurse. Mutations descend with an explicit [`Path`], compute the
/// link that replaces the subtree they changed, splice it into the parent's
/// child slot (or the root) and then recompute the size of every ancestor on the
/// path, deepest first. Tree depth is therefore bounded by memory, not by the
/// call stack.
#[derive(Clone)]
pub(crate) struct RawBstMap<K, V> {
    /// Arena owning every node; each live handle is referenced by exactly one link.
    nodes: Arena<Node<K, V>>,
    /// The whole tree. `None` when the map is empty.
    root: Link,
}

/// Path element for tracking traversal during mutations.
struct PathElement {
    /// Handle to the node at this level.
    node: Handle,
    /// The child slot we descended into.
    side: Side,
}

/// Ancestors of the subtree being changed, root first.
type Path = SmallVec<[PathElement; 32]>;

/// Explicit stack for the in-order walk. Spills to the heap only on trees deeper
/// than the inline capacity.
type WalkStack = SmallVec<[Handle; 32]>;

/// In-order walk over the entries of a `RawBstMap`.
pub(crate) struct InOrder<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    stack: WalkStack,
    remaining: usize,
}

/// Pending output of the tree dump.
enum DumpStep {
    Link(Link),
    Text(&'static str),
}

impl<K, V> RawBstMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries, read from the root's cached size.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        trace!("cleared tree");
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub(crate) fn height(&self) -> usize {
        let mut pending: SmallVec<[(Handle, usize); 32]> = SmallVec::new();
        pending.extend(self.root.map(|root| (root, 1)));
        let mut height = 0;
        while let Some((handle, depth)) = pending.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            for child in [node.left(), node.right()].into_iter().flatten() {
                pending.push((child, depth + 1));
            }
        }
        height
    }

    /// Walks the entries in ascending key order.
    pub(crate) fn in_order(&self) -> InOrder<'_, K, V> {
        let mut walk = InOrder {
            nodes: &self.nodes,
            stack: WalkStack::new(),
            remaining: self.len(),
        };
        walk.push_left_spine(self.root);
        walk
    }

    #[inline]
    fn size_of(&self, link: Link) -> usize {
        link.map_or(0, |handle| self.nodes.get(handle).size().to_usize())
    }

    /// Re-establishes `size == 1 + size(left) + size(right)` at `handle` from its
    /// children's cached sizes.
    fn update_size(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let size = Size::of_children(self.size_of(node.left()), self.size_of(node.right()));
        self.nodes.get_mut(handle).set_size(size);
    }

    /// Stores `link` in the slot the path ends at: the last element's child, or
    /// the root when the path is empty.
    fn splice(&mut self, path: &Path, link: Link) {
        match path.last() {
            Some(parent) => self.nodes.get_mut(parent.node).set_child(parent.side, link),
            None => self.root = link,
        }
    }

    /// Recomputes sizes along `path`, deepest ancestor first.
    fn update_path(&mut self, path: &Path) {
        for element in path.iter().rev() {
            self.update_size(element.node);
        }
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), node.value())
    }

    /// Returns the first (minimum) entry.
    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let root = self.root?;
        Some(self.key_value(self.leftmost(root)))
    }

    /// Returns the last (maximum) entry.
    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let root = self.root?;
        Some(self.key_value(self.rightmost(root)))
    }

    /// Removes and returns the minimum entry.
    pub(crate) fn delete_min(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let (root, min) = self.detach_extreme(root, Side::Left);
        self.root = root;
        let entry = self.nodes.take(min).into_entry();
        trace!(len = self.len(), "deleted minimum");
        Some(entry)
    }

    /// Removes and returns the maximum entry.
    pub(crate) fn delete_max(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let (root, max) = self.detach_extreme(root, Side::Right);
        self.root = root;
        let entry = self.nodes.take(max).into_entry();
        trace!(len = self.len(), "deleted maximum");
        Some(entry)
    }

    /// Unlinks the outermost node on `side` of the subtree at `handle`: the
    /// minimum for [`Side::Left`], the maximum for [`Side::Right`].
    ///
    /// Returns the remaining subtree and the detached node, which keeps its entry
    /// but no longer has children; its cached size is stale until relinked.
    fn detach_extreme(&mut self, handle: Handle, side: Side) -> (Link, Handle) {
        let mut path = Path::new();
        let mut extreme = handle;
        while let Some(child) = self.nodes.get(extreme).child(side) {
            path.push(PathElement { node: extreme, side });
            extreme = child;
        }

        let node = self.nodes.get_mut(extreme);
        let inner = node.child(side.opposite());
        node.set_child(side.opposite(), None);

        // The path is local to this subtree, so the subtree root is not `self.root`.
        let Some(parent) = path.last() else {
            return (inner, extreme);
        };
        self.nodes.get_mut(parent.node).set_child(side, inner);
        self.update_path(&path);
        (Some(handle), extreme)
    }

    /// Removes the node at `handle` and returns the subtree that takes its place.
    ///
    /// With two children the in-order successor is detached from the right
    /// subtree and adopts both remaining children.
    fn unlink(&mut self, handle: Handle) -> (Link, (K, V)) {
        let node = self.nodes.get(handle);
        let replacement = match (node.left(), node.right()) {
            (left, None) => left,
            (None, right) => right,
            (Some(left), Some(right)) => {
                let (right, successor) = self.detach_extreme(right, Side::Left);
                let promoted = self.nodes.get_mut(successor);
                promoted.set_left(Some(left));
                promoted.set_right(right);
                self.update_size(successor);
                trace!(size = self.size_of(Some(successor)), "promoted in-order successor");
                Some(successor)
            }
        };
        (replacement, self.nodes.take(handle).into_entry())
    }
}

impl<K: fmt::Display, V: fmt::Display> RawBstMap<K, V> {
    /// Writes the parenthesized tree dump, e.g. `M:1(A:2, S:3(--, Z:4))`.
    pub(crate) fn write_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending: SmallVec<[DumpStep; 32]> = SmallVec::new();
        pending.push(DumpStep::Link(self.root));
        while let Some(step) = pending.pop() {
            let link = match step {
                DumpStep::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                DumpStep::Link(link) => link,
            };
            let Some(handle) = link else {
                f.write_str("--")?;
                continue;
            };
            let node = self.nodes.get(handle);
            write!(f, "{}:{}", node.key(), node.value())?;
            if node.left().is_none() && node.right().is_none() {
                continue;
            }
            // Popped in reverse: "(", left, ", ", right, ")".
            pending.extend([
                DumpStep::Text(")"),
                DumpStep::Link(node.right()),
                DumpStep::Text(", "),
                DumpStep::Link(node.left()),
                DumpStep::Text("("),
            ]);
        }
        Ok(())
    }
}

impl<K: Ord, V> RawBstMap<K, V> {
    /// Walks from the root to the node holding `key`.
    fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get(handle).value())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    /// Returns the key-value pair corresponding to the key.
    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(self.key_value(handle))
    }

    /// Returns true if the search for `key` succeeds.
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }

    /// Inserts a key-value pair, returning the old value if the key was present.
    /// The stored key is kept on overwrite.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut path = Path::new();
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    // Shape and sizes are unchanged.
                    trace!("overwrote value of existing key");
                    return Some(self.nodes.get_mut(handle).replace_value(value));
                }
            };
            current = node.child(side);
            path.push(PathElement { node: handle, side });
        }

        let handle = self.nodes.alloc(Node::new(key, value));
        trace!(nodes = self.nodes.len(), depth = path.len(), "linked new node");
        self.splice(&path, Some(handle));
        self.update_path(&path);
        None
    }

    /// Removes a key, returning the stored entry if it was present. An absent
    /// key leaves the tree untouched.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path = Path::new();
        let mut current = self.root;
        let handle = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let side = match key.cmp(node.key().borrow()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            current = node.child(side);
            path.push(PathElement { node: handle, side });
        };

        let (replacement, entry) = self.unlink(handle);
        self.splice(&path, replacement);
        self.update_path(&path);
        trace!(len = self.len(), "removed entry");
        Some(entry)
    }

    /// Returns the largest key less than or equal to `key`.
    pub(crate) fn floor<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(node.key()),
                // Nothing here or to the right is small enough.
                Ordering::Less => node.left(),
                // This node is the floor unless something on the right is closer.
                Ordering::Greater => {
                    best = Some(node.key());
                    node.right()
                }
            };
        }
        best
    }

    /// Returns the smallest key greater than or equal to `key`.
    pub(crate) fn ceiling<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut best = None;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Ordering::Equal => return Some(node.key()),
                Ordering::Greater => node.right(),
                Ordering::Less => {
                    best = Some(node.key());
                    node.left()
                }
            };
        }
        best
    }

    /// Returns the number of keys strictly less than `key`.
    pub(crate) fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Equal => return rank + left_size,
                Ordering::Greater => {
                    rank += left_size + 1;
                    node.right()
                }
            };
        }
        rank
    }

    /// Returns the rank (0-indexed position) of a key that is present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            current = match key.cmp(node.key().borrow()) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(rank + left_size),
                Ordering::Greater => {
                    rank += left_size + 1;
                    node.right()
                }
            };
        }
        None
    }

    /// Finds the node at position `rank` in sorted order.
    fn select(&self, rank: usize) -> Option<Handle> {
        let mut current = self.root;
        let mut remaining = rank;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            current = match remaining.cmp(&left_size) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    node.right()
                }
            };
        }
        None
    }

    /// Gets an element by its rank (0-indexed position in sorted order).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let handle = self.select(rank)?;
        Some(self.key_value(handle))
    }

    /// Gets a mutable element by its rank.
    pub(crate) fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.select(rank)?;
        Some(self.nodes.get_mut(handle).key_value_mut())
    }
}

impl<K, V> InOrder<'_, K, V> {
    fn push_left_spine(&mut self, mut link: Link) {
        while let Some(handle) = link {
            self.stack.push(handle);
            link = self.nodes.get(handle).left();
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let node: &'a Node<K, V> = self.nodes.get(handle);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for InOrder<'_, K, V> {}

impl<K, V> FusedIterator for InOrder<'_, K, V> {}
