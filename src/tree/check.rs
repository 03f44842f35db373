//! Structural diagnostics
//!
//! Invariant verification plus level-order / in-order dumps.
//! Used by tests, the harness and the `dump` command; never on hot paths.

use super::node::{level, Link, Node};
use super::AaTree;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// First broken rule found by [`AaTree::check_invariants`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Left child shares its parent's level
    #[error("horizontal left link below {value} at level {level}")]
    HorizontalLeftLink {
        /// Parent value (debug formatted)
        value: String,
        /// Parent level
        level: usize,
    },

    /// Right child is neither at the parent's level nor one below
    #[error("right child of {value} (level {level}) sits at level {right_level}")]
    RightLevel {
        /// Parent value (debug formatted)
        value: String,
        /// Parent level
        level: usize,
        /// Offending right child level
        right_level: usize,
    },

    /// Two consecutive horizontal right links
    #[error("double horizontal right link starting at {value} (level {level})")]
    DoubleHorizontalRight {
        /// Value at the start of the chain (debug formatted)
        value: String,
        /// Shared level
        level: usize,
    },

    /// Leaf above level 1
    #[error("leaf {value} at level {level}, expected 1")]
    LeafLevel {
        /// Leaf value (debug formatted)
        value: String,
        /// Recorded level
        level: usize,
    },

    /// Value on the wrong side of an ancestor
    #[error("value {value} breaks search order against ancestor {ancestor}")]
    Order {
        /// Misplaced value (debug formatted)
        value: String,
        /// Ancestor whose bound is violated (debug formatted)
        ancestor: String,
    },

    /// Size counter disagrees with the number of nodes
    #[error("size counter is {recorded} but the tree holds {counted} nodes")]
    SizeMismatch {
        /// Maintained counter
        recorded: usize,
        /// Nodes actually reachable
        counted: usize,
    },
}

impl<T> AaTree<T> {
    /// Nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        fn height_of<T>(link: &Link<T>) -> usize {
            link.as_ref()
                .map_or(0, |node| 1 + height_of(&node.left).max(height_of(&node.right)))
        }
        height_of(&self.root)
    }

    /// Upper bound on height guaranteed by the balance law: 2·log₂(n+1)
    pub fn height_bound(&self) -> usize {
        (2.0 * ((self.size + 1) as f64).log2()).floor() as usize
    }

    /// Breadth-first rows of `(value, level)`, root row first
    pub fn level_order(&self) -> Vec<Vec<(&T, usize)>> {
        let mut rows = Vec::new();
        let mut queue: VecDeque<&Node<T>> = self.root.as_deref().into_iter().collect();

        while !queue.is_empty() {
            let width = queue.len();
            let mut row = Vec::with_capacity(width);
            for _ in 0..width {
                let Some(node) = queue.pop_front() else { break };
                row.push((&node.value, node.level));
                queue.extend(node.left.as_deref());
                queue.extend(node.right.as_deref());
            }
            rows.push(row);
        }

        rows
    }

    /// Snapshot of every value in ascending order
    pub fn in_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    values.push(&node.value);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }

        values
    }
}

impl<T: Ord + fmt::Debug> AaTree<T> {
    /// Verify the balance law, search order and size counter
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let counted = check_subtree(&self.root, None, None)?;
        if counted != self.size {
            return Err(InvariantViolation::SizeMismatch {
                recorded: self.size,
                counted,
            });
        }
        Ok(())
    }
}

/// Check every node below `link` against its ancestors' bounds
///
/// Returns the number of nodes visited.
fn check_subtree<T: Ord + fmt::Debug>(
    link: &Link<T>,
    lower: Option<&T>,
    upper: Option<&T>,
) -> Result<usize, InvariantViolation> {
    let Some(node) = link.as_deref() else {
        return Ok(0);
    };

    let misplaced = lower
        .filter(|l| node.value <= **l)
        .or_else(|| upper.filter(|u| node.value >= **u));
    if let Some(ancestor) = misplaced {
        return Err(InvariantViolation::Order {
            value: format!("{:?}", node.value),
            ancestor: format!("{:?}", ancestor),
        });
    }

    if node.is_leaf() && node.level != 1 {
        return Err(InvariantViolation::LeafLevel {
            value: format!("{:?}", node.value),
            level: node.level,
        });
    }

    if node.left.is_some() && level(&node.left) >= node.level {
        return Err(InvariantViolation::HorizontalLeftLink {
            value: format!("{:?}", node.value),
            level: node.level,
        });
    }

    if let Some(right) = node.right.as_deref() {
        if right.level > node.level || right.level + 1 < node.level {
            return Err(InvariantViolation::RightLevel {
                value: format!("{:?}", node.value),
                level: node.level,
                right_level: right.level,
            });
        }
        if right.right.is_some() && level(&right.right) == node.level {
            return Err(InvariantViolation::DoubleHorizontalRight {
                value: format!("{:?}", node.value),
                level: node.level,
            });
        }
    }

    let left = check_subtree(&node.left, lower, Some(&node.value))?;
    let right = check_subtree(&node.right, Some(&node.value), upper)?;
    Ok(1 + left + right)
}

impl<T: fmt::Display> fmt::Display for AaTree<T> {
    /// One line per depth, `value@level` entries
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.level_order();
        if rows.is_empty() {
            return write!(f, "(empty)");
        }

        for (depth, row) in rows.iter().enumerate() {
            if depth > 0 {
                writeln!(f)?;
            }
            for (idx, (value, level)) in row.iter().enumerate() {
                if idx > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}@{}", value, level)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: i32, level: usize, left: Link<i32>, right: Link<i32>) -> Link<i32> {
        Some(Box::new(Node {
            value,
            level,
            left,
            right,
        }))
    }

    fn tree_from(root: Link<i32>, size: usize) -> AaTree<i32> {
        AaTree { root, size }
    }

    #[test]
    fn test_valid_tree_passes() {
        let tree = tree_from(node(2, 2, node(1, 1, None, None), node(3, 1, None, None)), 3);
        assert_eq!(tree.check_invariants(), Ok(()));
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.in_order(), vec![&1, &2, &3]);
    }

    #[test]
    fn test_detects_horizontal_left_link() {
        let tree = tree_from(node(2, 1, node(1, 1, None, None), None), 2);
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::HorizontalLeftLink { level: 1, .. })
        ));
    }

    #[test]
    fn test_detects_double_horizontal_right() {
        let tree = tree_from(node(1, 1, None, node(2, 1, None, node(3, 1, None, None))), 3);
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::DoubleHorizontalRight { .. })
        ));
    }

    #[test]
    fn test_detects_leaf_level() {
        let tree = tree_from(node(1, 2, None, None), 1);
        assert!(matches!(
            tree.check_invariants(),
            Err(InvariantViolation::LeafLevel { level: 2, .. })
        ));
    }

    #[test]
    fn test_detects_right_level_gap() {
        let tree = tree_from(
            node(2, 3, node(1, 2, node(0, 1, None, None), None), node(3, 1, None, None)),
            4,
        );
        let err = tree.check_invariants().expect_err("right child two levels down");
        assert!(matches!(err, InvariantViolation::RightLevel { right_level: 1, .. }));
    }

    #[test]
    fn test_detects_order_violation() {
        let tree = tree_from(node(2, 2, node(5, 1, None, None), node(3, 1, None, None)), 3);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::Order {
                value: "5".to_string(),
                ancestor: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_detects_size_mismatch() {
        let tree = tree_from(node(1, 1, None, None), 4);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::SizeMismatch {
                recorded: 4,
                counted: 1
            })
        );
    }

    #[test]
    fn test_display_rows() {
        let tree: AaTree<i32> = (1..=3).collect();
        assert_eq!(tree.to_string(), "2@2\n1@1 3@1");
        assert_eq!(AaTree::<i32>::new().to_string(), "(empty)");
    }

    #[test]
    fn test_height_bound_grows_logarithmically() {
        let tree: AaTree<u32> = (0..1023).collect();
        // 2·log₂(1024) = 20
        assert_eq!(tree.height_bound(), 20);
        assert!(tree.height() <= tree.height_bound());
    }
}
