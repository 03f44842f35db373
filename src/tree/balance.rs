//! Rebalancing primitives
//!
//! skew  = right rotation removing a horizontal left link
//! split = left rotation removing two consecutive horizontal right links
//! decrease_level = pull an over-tall node back down after a removal
//!
//! All O(1): local pointer and level edits only.

use super::node::{level, Link, Node};

/// Remove a horizontal left link
///
/// ```text
///     L <- T              L -> T
///    / \    \     =>     /    / \
///   A   B    R          A    B   R
/// ```
/// Levels are unchanged.
pub(crate) fn skew<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        Some(mut left) if left.level == node.level => {
            node.left = left.right.take();
            left.right = Some(node);
            left
        }
        left => {
            node.left = left;
            node
        }
    }
}

/// Remove two consecutive horizontal right links
///
/// ```text
///   T -> R -> X            R
///  /    /          =>     / \
/// A    B                 T   X
///                       / \
///                      A   B
/// ```
/// The promoted node gains one level. This is the only place a level grows.
pub(crate) fn split<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        // level(None) == 0 and node.level >= 1, so equality implies right.right exists
        Some(mut right) if level(&right.right) == node.level => {
            node.right = right.left.take();
            right.left = Some(node);
            right.level += 1;
            right
        }
        right => {
            node.right = right;
            node
        }
    }
}

/// Lower `node` (and a horizontal right child) to `min(children) + 1`
pub(crate) fn decrease_level<T>(node: &mut Node<T>) {
    let target = level(&node.left).min(level(&node.right)) + 1;
    if target < node.level {
        node.level = target;
        if let Some(right) = node.right.as_mut() {
            if target < right.level {
                right.level = target;
            }
        }
    }
}

/// Repair after an insertion below `node`
pub(crate) fn rebalance_insert<T>(node: Box<Node<T>>) -> Box<Node<T>> {
    split(skew(node))
}

/// Repair after a removal below `node`
///
/// A level deficiency can span up to three horizontally linked nodes, so
/// the right spine is skewed twice more and split once more than on insert.
pub(crate) fn rebalance_remove<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    decrease_level(&mut *node);

    let mut node = skew(node);
    if let Some(right) = node.right.take() {
        let mut right = skew(right);
        right.right = right.right.take().map(skew);
        node.right = Some(right);
    }

    let mut node = split(node);
    node.right = node.right.take().map(split);
    node
}

/// Replace the subtree in `link` with `f(subtree)`
#[inline]
pub(crate) fn rebalance_link<T>(link: &mut Link<T>, f: fn(Box<Node<T>>) -> Box<Node<T>>) {
    *link = link.take().map(f);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(value: i32, level: usize, left: Link<i32>, right: Link<i32>) -> Box<Node<i32>> {
        Box::new(Node {
            value,
            level,
            left,
            right,
        })
    }

    #[test]
    fn test_skew_rotates_horizontal_left() {
        // 2(1) with left 1(1) and right 3(1)
        let tree = node(2, 1, Some(Node::leaf(1)), Some(Node::leaf(3)));
        let root = skew(tree);

        assert_eq!(root.value, 1);
        assert_eq!(root.level, 1);
        assert!(root.left.is_none());
        let right = root.right.as_ref().expect("old root moved right");
        assert_eq!(right.value, 2);
        assert_eq!(right.level, 1);
        assert!(right.left.is_none());
        assert_eq!(right.right.as_ref().map(|n| n.value), Some(3));
    }

    #[test]
    fn test_skew_leaves_valid_left_alone() {
        let tree = node(2, 2, Some(Node::leaf(1)), Some(Node::leaf(3)));
        let root = skew(tree);
        assert_eq!(root.value, 2);
        assert_eq!(root.left.as_ref().map(|n| n.value), Some(1));
    }

    #[test]
    fn test_skew_moves_inner_subtree() {
        // 4(2) <- 2(2), 2 has right child 3(1)
        let left = node(2, 2, Some(Node::leaf(1)), Some(Node::leaf(3)));
        let tree = node(4, 2, Some(left), Some(Node::leaf(5)));
        let root = skew(tree);

        assert_eq!(root.value, 2);
        let right = root.right.as_ref().expect("old root");
        assert_eq!(right.value, 4);
        assert_eq!(right.left.as_ref().map(|n| n.value), Some(3));
    }

    #[test]
    fn test_split_promotes_middle() {
        // 1(1) -> 2(1) -> 3(1)
        let tree = node(1, 1, None, Some(node(2, 1, None, Some(Node::leaf(3)))));
        let root = split(tree);

        assert_eq!(root.value, 2);
        assert_eq!(root.level, 2);
        assert_eq!(root.left.as_ref().map(|n| (n.value, n.level)), Some((1, 1)));
        assert_eq!(root.right.as_ref().map(|n| (n.value, n.level)), Some((3, 1)));
    }

    #[test]
    fn test_split_single_horizontal_link_unchanged() {
        let tree = node(1, 1, None, Some(Node::leaf(2)));
        let root = split(tree);
        assert_eq!(root.value, 1);
        assert_eq!(root.level, 1);
    }

    #[test]
    fn test_split_on_missing_children() {
        let root = split(Node::leaf(1));
        assert_eq!(root.value, 1);
        assert!(root.is_leaf());
    }

    #[test]
    fn test_decrease_level_lowers_node_and_right() {
        // 4(3) with left 2(1), right 6(3)
        let mut tree = node(4, 3, Some(Node::leaf(2)), Some(node(6, 3, Some(Node::leaf(5)), Some(Node::leaf(7)))));
        decrease_level(&mut *tree);

        assert_eq!(tree.level, 2);
        assert_eq!(tree.right.as_ref().map(|n| n.level), Some(2));
    }

    #[test]
    fn test_decrease_level_noop_when_balanced() {
        let mut tree = node(2, 2, Some(Node::leaf(1)), Some(Node::leaf(3)));
        decrease_level(&mut *tree);
        assert_eq!(tree.level, 2);
    }

    #[test]
    fn test_decrease_level_leaf_after_children_removed() {
        let mut tree = node(9, 2, None, None);
        decrease_level(&mut *tree);
        assert_eq!(tree.level, 1);
    }
}
