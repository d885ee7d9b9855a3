//! Depth-first traversals over the arena.
//!
//! All traversals run on an explicit stack. An unbalanced tree built from
//! sorted input has linear height, and recursion over it would exhaust the
//! call stack long before the arena runs out of memory.

use super::node::{Node, NodeIndex};

/// The order in which a traversal visits the nodes of an [`AvlSet`](super::AvlSet).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum TraversalOrder {
    /// Node, then left subtree, then right subtree.
    Preorder,
    /// Left subtree, then node, then right subtree (ascending order).
    Inorder,
    /// Left subtree, then right subtree, then node.
    Postorder,
}

pub(super) fn preorder<T, F>(nodes: &[Node<T>], root: Option<NodeIndex>, mut visit: F)
where
    F: FnMut(&T),
{
    let mut stack: Vec<NodeIndex> = root.into_iter().collect();
    while let Some(index) = stack.pop() {
        let node = &nodes[index];
        visit(&node.value);
        stack.extend(node.right);
        stack.extend(node.left);
    }
}

pub(super) fn inorder<T, F>(nodes: &[Node<T>], root: Option<NodeIndex>, mut visit: F)
where
    F: FnMut(&T),
{
    let mut stack: Vec<NodeIndex> = Vec::new();
    let mut cursor = root;
    loop {
        while let Some(index) = cursor {
            stack.push(index);
            cursor = nodes[index].left;
        }
        let Some(index) = stack.pop() else {
            break;
        };
        visit(&nodes[index].value);
        cursor = nodes[index].right;
    }
}

pub(super) fn postorder<T, F>(nodes: &[Node<T>], root: Option<NodeIndex>, mut visit: F)
where
    F: FnMut(&T),
{
    // The flag records whether both subtrees of the node have been scheduled.
    let mut stack: Vec<(NodeIndex, bool)> = root.into_iter().map(|index| (index, false)).collect();
    while let Some((index, expanded)) = stack.pop() {
        let node = &nodes[index];
        if expanded {
            visit(&node.value);
        } else {
            stack.push((index, true));
            stack.extend(node.right.map(|right| (right, false)));
            stack.extend(node.left.map(|left| (left, false)));
        }
    }
}

/// An ascending iterator over the elements of an [`AvlSet`](super::AvlSet).
pub struct AvlSetIterator<'a, T> {
    nodes: &'a [Node<T>],
    stack: Vec<NodeIndex>,
    remaining: usize,
}

impl<'a, T> AvlSetIterator<'a, T> {
    pub(super) fn new(nodes: &'a [Node<T>], root: Option<NodeIndex>) -> Self {
        let mut iterator = Self {
            nodes,
            stack: Vec::new(),
            remaining: nodes.len(),
        };
        iterator.push_left_spine(root);
        iterator
    }

    fn push_left_spine(&mut self, mut cursor: Option<NodeIndex>) {
        while let Some(index) = cursor {
            self.stack.push(index);
            cursor = self.nodes[index].left;
        }
    }
}

impl<'a, T> Iterator for AvlSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let nodes = self.nodes;
        self.push_left_spine(nodes[index].right);
        self.remaining -= 1;
        Some(&nodes[index].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for AvlSetIterator<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> std::iter::FusedIterator for AvlSetIterator<'_, T> {}
