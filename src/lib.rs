//! # Ordered set on an AA-tree
//!
//! A balanced binary search tree that keeps a single integer *level* per
//! node instead of a color bit.
//!
//! ## Core Algorithm
//!
//! 1. **Insert**: descend, attach a level-1 leaf, then `skew` + `split` every
//!    node on the way back up
//! 2. **Remove**: reduce to a leaf removal via successor/predecessor swap, then
//!    `decrease_level`, three skews and two splits on the way back up
//! 3. **Balance law**: no horizontal left links, no two consecutive horizontal
//!    right links, leaves at level 1
//!
//! Result: height ≤ 2·log₂(n+1), O(log n) insert/remove/contains
//!
//! ## Usage Example
//!
//! ```
//! use aatree::AaTree;
//!
//! let mut tree = AaTree::new();
//! for value in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.add(value);
//! }
//! tree.remove(&5);
//!
//! assert!(!tree.contains(&5));
//! assert_eq!(tree.size(), 6);
//! assert!(tree.check_invariants().is_ok());
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod harness; // Dataset generation and timed workloads
pub mod tree; // AA-tree core and diagnostics

// Re-exports for convenience
pub use harness::{DatasetOrder, HarnessConfig, RunReport};
pub use tree::{AaTree, InvariantViolation};

use thiserror::Error;

/// Errors raised by the workload harness
///
/// The tree itself never fails: duplicate inserts and absent removals are
/// no-ops.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Dataset size of zero
    #[error("Dataset must contain at least one value")]
    EmptyDataset,

    /// Removal ratio outside [0, 1]
    #[error("Removal ratio {0} outside [0, 1]")]
    InvalidRemovalRatio(f64),

    /// Unrecognised dataset order name
    #[error("Unknown dataset order '{0}' (expected ascending, descending, shuffled or random)")]
    UnknownOrder(String),

    /// Tree size disagrees with the reference set
    #[error("Size mismatch after {phase} phase: expected {expected}, tree reports {actual}")]
    SizeMismatch {
        /// Phase that detected the mismatch
        phase: &'static str,
        /// Reference set size
        expected: usize,
        /// Tree size
        actual: usize,
    },

    /// Membership answer disagrees with the reference set
    #[error("Membership mismatch after {phase} phase: {detail}")]
    MembershipMismatch {
        /// Phase that detected the mismatch
        phase: &'static str,
        /// Human-readable description
        detail: String,
    },

    /// Balance law or search order broken
    #[error("Tree invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HarnessError::SizeMismatch {
            phase: "insert",
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Size mismatch after insert phase: expected 3, tree reports 2"
        );

        let err: HarnessError = InvariantViolation::LeafLevel {
            value: "7".to_string(),
            level: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Tree invariant violated: leaf 7 at level 2, expected 1"
        );
    }
}
