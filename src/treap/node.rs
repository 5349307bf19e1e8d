use crate::entry::Entry;
use crate::treap::tree::Tree;
use std::mem;

/// A struct representing an internal node of a treap.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub priority: u32,
    pub len: usize,
    pub left: Tree<T, U>,
    pub right: Tree<T, U>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, priority: u32) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            len: 1,
            left: None,
            right: None,
        }
    }

    pub fn update(&mut self) {
        let Node {
            ref mut len,
            ref left,
            ref right,
            ..
        } = self;
        *len = 1;
        if let Some(ref left_node) = left {
            *len += left_node.len;
        }
        if let Some(ref right_node) = right {
            *len += right_node.len;
        }
    }

    pub fn is_heap_property_violated(&self, child: &Tree<T, U>) -> bool {
        match child {
            Some(ref child_node) => child_node.priority > self.priority,
            None => false,
        }
    }

    // precondition: the right child is `Some`
    pub fn rotate_left(&mut self) {
        let mut child = self
            .right
            .take()
            .expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        child.update();
        self.left = Some(child);
        self.update();
    }

    // precondition: the left child is `Some`
    pub fn rotate_right(&mut self) {
        let mut child = self
            .left
            .take()
            .expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        child.update();
        self.right = Some(child);
        self.update();
    }
}
