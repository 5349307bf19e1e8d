use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::treap::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

// precondition: every key in `l_tree` is less than every key in `r_tree`
pub fn merge<T, U>(l_tree: &mut Tree<T, U>, r_tree: Tree<T, U>) {
    match (l_tree.take(), r_tree) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority > r_node.priority {
                merge(&mut l_node.right, Some(r_node));
                l_node.update();
                *l_tree = Some(l_node);
            } else {
                let mut new_tree = Some(l_node);
                merge(&mut new_tree, r_node.left.take());
                r_node.left = new_tree;
                r_node.update();
                *l_tree = Some(r_node);
            }
        },
        (new_tree, None) | (None, new_tree) => *l_tree = new_tree,
    }
}

/// Splits `tree` so that it keeps every key less than or equal to `key` and returns the tree of
/// every key greater than `key`.
pub fn split<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Tree<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    match tree.take() {
        Some(mut node) => {
            let ret;
            if key < node.entry.key.borrow() {
                let res = split(&mut node.left, key);
                *tree = node.left.take();
                node.left = res;
                node.update();
                ret = Some(node);
            } else {
                ret = split(&mut node.right, key);
                node.update();
                *tree = Some(node);
            }
            ret
        },
        None => None,
    }
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Option<U>
where
    T: Ord,
{
    match *tree {
        Some(ref mut node) => {
            let ret;
            match new_node.entry.key.cmp(&node.entry.key) {
                Ordering::Less => {
                    ret = insert(&mut node.left, new_node);
                    node.update();
                    if node.is_heap_property_violated(&node.left) {
                        node.rotate_right();
                    }
                },
                Ordering::Greater => {
                    ret = insert(&mut node.right, new_node);
                    node.update();
                    if node.is_heap_property_violated(&node.right) {
                        node.rotate_left();
                    }
                },
                Ordering::Equal => {
                    let Node {
                        entry: Entry { value, .. },
                        ..
                    } = new_node;
                    ret = Some(mem::replace(&mut node.entry.value, value));
                },
            }
            ret
        },
        None => {
            *tree = Some(Box::new(new_node));
            None
        },
    }
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ordering = match *tree {
        Some(ref node) => key.cmp(node.entry.key.borrow()),
        None => return None,
    };

    match ordering {
        Ordering::Less | Ordering::Greater => {
            let node = tree.as_mut()?;
            let ret = if ordering == Ordering::Less {
                remove(&mut node.left, key)
            } else {
                remove(&mut node.right, key)
            };
            node.update();
            ret
        },
        Ordering::Equal => {
            let node = tree.take()?;
            let Node {
                entry, left, right, ..
            } = *node;
            *tree = left;
            merge(tree, right);
            Some(entry)
        },
    }
}

pub fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Option<Entry<T, U>> {
    let has_left = match *tree {
        Some(ref node) => node.left.is_some(),
        None => return None,
    };

    if has_left {
        let node = tree.as_mut()?;
        let ret = remove_min(&mut node.left);
        node.update();
        ret
    } else {
        let node = tree.take()?;
        let Node { entry, right, .. } = *node;
        *tree = right;
        Some(entry)
    }
}

pub fn remove_max<T, U>(tree: &mut Tree<T, U>) -> Option<Entry<T, U>> {
    let has_right = match *tree {
        Some(ref node) => node.right.is_some(),
        None => return None,
    };

    if has_right {
        let node = tree.as_mut()?;
        let ret = remove_max(&mut node.right);
        node.update();
        ret
    } else {
        let node = tree.take()?;
        let Node { entry, left, .. } = *node;
        *tree = left;
        Some(entry)
    }
}

/// Drops every node of `tree` using an explicit stack instead of recursion.
pub fn clear<T, U>(tree: &mut Tree<T, U>) {
    let mut stack = Vec::new();
    stack.extend(tree.take());
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

pub fn contains<T, U, V>(tree: &Tree<T, U>, key: &V) -> bool
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    get(tree, key).is_some()
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => get(&node.left, key),
            Ordering::Greater => get(&node.right, key),
            Ordering::Equal => Some(&node.entry),
        }
    })
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => get_mut(&mut node.left, key),
            Ordering::Greater => get_mut(&mut node.right, key),
            Ordering::Equal => Some(&mut node.entry),
        }
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

/// Returns the number of keys in `tree` that are less than `key`.
pub fn rank<T, U, V>(tree: &Tree<T, U>, key: &V) -> usize
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    match *tree {
        Some(ref node) => {
            match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => rank(&node.left, key),
                Ordering::Equal => len(&node.left),
                Ordering::Greater => len(&node.left) + 1 + rank(&node.right, key),
            }
        },
        None => 0,
    }
}

pub fn get_index_mut<T, U>(tree: &mut Tree<T, U>, index: usize) -> Option<&mut Entry<T, U>> {
    tree.as_mut().and_then(|node| {
        let left_len = len(&node.left);
        match index.cmp(&left_len) {
            Ordering::Less => get_index_mut(&mut node.left, index),
            Ordering::Greater => get_index_mut(&mut node.right, index - left_len - 1),
            Ordering::Equal => Some(&mut node.entry),
        }
    })
}

pub fn len<T, U>(tree: &Tree<T, U>) -> usize {
    match *tree {
        Some(ref node) => node.len,
        None => 0,
    }
}

/// Verifies the binary search tree order, the heap order, and the cached subtree lengths of
/// `tree`.
pub fn check<T, U>(tree: &Tree<T, U>) -> Result<()>
where
    T: Ord,
{
    check_subtree(tree, None, None, None).map(|_| ())
}

fn check_subtree<'a, T, U>(
    tree: &'a Tree<T, U>,
    lower: Option<&'a T>,
    upper: Option<&'a T>,
    parent_priority: Option<u32>,
) -> Result<usize>
where
    T: Ord,
{
    let node = match *tree {
        Some(ref node) => node,
        None => return Ok(0),
    };
    let key = &node.entry.key;

    let below_lower = lower.map_or(false, |lower| key <= lower);
    let above_upper = upper.map_or(false, |upper| key >= upper);
    if below_lower || above_upper {
        return Err(Error::InvariantViolation(String::from(
            "keys are not in binary search tree order",
        )));
    }
    if parent_priority.map_or(false, |priority| node.priority > priority) {
        return Err(Error::InvariantViolation(format!(
            "node priority {} exceeds its parent's priority",
            node.priority,
        )));
    }

    let left_len = check_subtree(&node.left, lower, Some(key), Some(node.priority))?;
    let right_len = check_subtree(&node.right, Some(key), upper, Some(node.priority))?;
    let len = left_len + right_len + 1;
    if len != node.len {
        return Err(Error::InvariantViolation(format!(
            "cached length {} does not match subtree size {}",
            node.len, len,
        )));
    }
    Ok(len)
}
