//! AA-tree: a balanced binary search tree with one integer level per node
//!
//! Balance law (for every node n):
//!   - left.level < n.level               (no horizontal left links)
//!   - right.level ∈ {n.level, n.level-1} (at most one horizontal right link)
//!   - right.right.level < n.level        (no double horizontal right links)
//!   - leaves sit at level 1
//!
//! Height ≤ 2·log₂(n+1). Only two rotations (skew, split) keep it there.

mod balance;
mod check;
mod node;

pub use check::InvariantViolation;

use balance::{rebalance_insert, rebalance_link, rebalance_remove};
use node::{Link, Node};
use std::cmp::Ordering;
use std::fmt;

/// Ordered set backed by an AA-tree
///
/// Duplicates are ignored on insert; removing an absent value is a no-op.
/// Every comparison against a caller's value happens while descending,
/// before any structural edit, so a panicking `Ord` leaves the tree intact.
#[derive(Clone)]
pub struct AaTree<T> {
    root: Link<T>,
    size: usize,
}

/// What a removal descends towards
enum Target<'a, T> {
    /// Node holding an equal value
    Value(&'a T),
    /// Leftmost node of the subtree (in-order successor search)
    Min,
    /// Rightmost node of the subtree (in-order predecessor search)
    Max,
}

impl<T: Ord> Target<'_, T> {
    fn locate(&self, node: &Node<T>) -> Ordering {
        match self {
            Target::Value(value) => (*value).cmp(&node.value),
            Target::Min if node.left.is_some() => Ordering::Less,
            Target::Max if node.right.is_some() => Ordering::Greater,
            Target::Min | Target::Max => Ordering::Equal,
        }
    }
}

impl<T> AaTree<T> {
    /// Create empty tree
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Number of distinct values stored (O(1))
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if no values are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every value
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }
}

impl<T: Ord> AaTree<T> {
    /// Check membership
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Insert `value`
    ///
    /// Returns `true` if the value was not already present.
    pub fn add(&mut self, value: T) -> bool {
        let inserted = insert(&mut self.root, value);
        if inserted {
            self.size += 1;
            tracing::trace!(size = self.size, "value inserted");
        }
        inserted
    }

    /// Remove `value`
    ///
    /// Returns `true` if the value was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove `value` and hand back the stored copy
    pub fn take(&mut self, value: &T) -> Option<T> {
        let removed = delete(&mut self.root, &Target::Value(value))?;
        self.size -= 1;
        tracing::trace!(size = self.size, "value removed");
        Some(removed)
    }
}

/// Insert below `link`, rebalancing each node on the way back up
///
/// Returns `true` if a new node was created.
fn insert<T: Ord>(link: &mut Link<T>, value: T) -> bool {
    let inserted = match link.as_mut() {
        None => {
            *link = Some(Node::leaf(value));
            return true;
        }
        Some(node) => match value.cmp(&node.value) {
            Ordering::Less => insert(&mut node.left, value),
            Ordering::Greater => insert(&mut node.right, value),
            Ordering::Equal => false,
        },
    };

    // Nothing changed below: the subtree is still balanced
    if inserted {
        rebalance_link(link, rebalance_insert);
    }
    inserted
}

/// Remove the node `target` locates below `link`
///
/// Interior nodes are never unlinked directly: their value is swapped with
/// the in-order successor (when there is no left child) or predecessor, and
/// that node is removed from the matching subtree instead. The recursion
/// therefore always ends by unlinking a leaf.
fn delete<T: Ord>(link: &mut Link<T>, target: &Target<'_, T>) -> Option<T> {
    let node = link.as_mut()?;
    let removed = match target.locate(node) {
        Ordering::Less => delete(&mut node.left, target)?,
        Ordering::Greater => delete(&mut node.right, target)?,
        Ordering::Equal if node.is_leaf() => {
            return link.take().map(|leaf| leaf.value);
        }
        Ordering::Equal => {
            let replacement = if node.left.is_none() {
                delete(&mut node.right, &Target::Min)?
            } else {
                delete(&mut node.left, &Target::Max)?
            };
            std::mem::replace(&mut node.value, replacement)
        }
    };

    rebalance_link(link, rebalance_remove);
    Some(removed)
}

impl<T> Default for AaTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for AaTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for AaTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AaTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AaTree")
            .field("size", &self.size)
            .field("height", &self.height())
            .field("rows", &self.level_order())
            .finish()
    }
}
