//! Tree node representation
//!
//! Node = (value, level, left, right)
//! Children are exclusively owned boxes; absent child has level 0.

/// Owned link to a subtree (`None` = empty subtree)
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// Single AA-tree node
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// Stored value
    pub(crate) value: T,

    /// Level (1 for leaves)
    pub(crate) level: usize,

    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    /// Fresh leaf at level 1
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            level: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Level of a subtree root, treating an absent subtree as level 0
#[inline]
pub(crate) fn level<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.level)
}
