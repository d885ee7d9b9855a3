//! Arena nodes and rotations for [`AvlSet`](super::AvlSet).
//!
//! Nodes are addressed by their position in the arena. A rotation only
//! reassigns child links and recomputes heights; no node is moved or copied.

use std::cmp::Ordering;

/// Position of a node inside the arena.
pub(super) type NodeIndex = usize;

/// Which child link a descent followed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum Side {
    Left,
    Right,
}

/// The rebalancing case applied at a node.
///
/// Named after the path from the unbalanced node to the inserted element.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Rotation {
    /// Inserted into the left child's left subtree; one right rotation.
    LeftLeft,
    /// Inserted into the left child's right subtree; left rotation on the
    /// child, then right rotation at the node.
    LeftRight,
    /// Inserted into the right child's right subtree; one left rotation.
    RightRight,
    /// Inserted into the right child's left subtree; right rotation on the
    /// child, then left rotation at the node.
    RightLeft,
}

#[derive(Clone, Debug)]
pub(super) struct Node<T> {
    pub(super) value: T,
    pub(super) left: Option<NodeIndex>,
    pub(super) right: Option<NodeIndex>,
    pub(super) height: i32,
}

impl<T> Node<T> {
    pub(super) const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    pub(super) const fn set_child(&mut self, side: Side, child: Option<NodeIndex>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

/// Height of an optional subtree; an absent subtree has height -1.
#[inline]
pub(super) fn height_of<T>(nodes: &[Node<T>], index: Option<NodeIndex>) -> i32 {
    index.map_or(-1, |index| nodes[index].height)
}

/// Left height minus right height.
#[inline]
pub(super) fn balance_factor<T>(nodes: &[Node<T>], index: NodeIndex) -> i32 {
    let node = &nodes[index];
    height_of(nodes, node.left) - height_of(nodes, node.right)
}

/// Recomputes a node's height from its children and returns it.
#[inline]
pub(super) fn update_height<T>(nodes: &mut [Node<T>], index: NodeIndex) -> i32 {
    let height = 1 + height_of(nodes, nodes[index].left).max(height_of(nodes, nodes[index].right));
    nodes[index].height = height;
    height
}

/// Rotates the subtree rooted at `index` to the left and returns its new root.
///
/// ```text
///     A                B
///    / \              / \
///   T1  B     =>     A   T3
///      / \          / \
///     T2  T3       T1  T2
/// ```
pub(super) fn rotate_left<T>(nodes: &mut [Node<T>], index: NodeIndex) -> NodeIndex {
    let Some(pivot) = nodes[index].right else {
        return index;
    };
    nodes[index].right = nodes[pivot].left;
    nodes[pivot].left = Some(index);
    update_height(nodes, index);
    update_height(nodes, pivot);
    pivot
}

/// Rotates the subtree rooted at `index` to the right and returns its new root.
///
/// ```text
///       B            A
///      / \          / \
///     A   T3  =>   T1  B
///    / \              / \
///   T1  T2           T2  T3
/// ```
pub(super) fn rotate_right<T>(nodes: &mut [Node<T>], index: NodeIndex) -> NodeIndex {
    let Some(pivot) = nodes[index].left else {
        return index;
    };
    nodes[index].left = nodes[pivot].right;
    nodes[pivot].right = Some(index);
    update_height(nodes, index);
    update_height(nodes, pivot);
    pivot
}

/// Restores the balance of `index` after `inserted` was added below it.
///
/// The case is chosen by comparing the inserted value against the child on the
/// taller side. Returns the new subtree root and the rotation applied, or
/// `None` when the node is within balance.
pub(super) fn rebalance<T: Ord>(
    nodes: &mut [Node<T>],
    index: NodeIndex,
    inserted: NodeIndex,
) -> Option<(NodeIndex, Rotation)> {
    let balance = balance_factor(nodes, index);
    if balance <= -2 {
        let right = nodes[index].right?;
        let rotation = match nodes[inserted].value.cmp(&nodes[right].value) {
            Ordering::Greater => Rotation::RightRight,
            Ordering::Less => Rotation::RightLeft,
            Ordering::Equal => return None,
        };
        if rotation == Rotation::RightLeft {
            let lifted = rotate_right(nodes, right);
            nodes[index].right = Some(lifted);
        }
        Some((rotate_left(nodes, index), rotation))
    } else if balance >= 2 {
        let left = nodes[index].left?;
        let rotation = match nodes[inserted].value.cmp(&nodes[left].value) {
            Ordering::Less => Rotation::LeftLeft,
            Ordering::Greater => Rotation::LeftRight,
            Ordering::Equal => return None,
        };
        if rotation == Rotation::LeftRight {
            let lifted = rotate_left(nodes, left);
            nodes[index].left = Some(lifted);
        }
        Some((rotate_right(nodes, index), rotation))
    } else {
        None
    }
}
