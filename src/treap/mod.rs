//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod map;
mod node;
mod tree;

pub use self::map::{
    TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapIterMut, TreapMapKeys, TreapMapValues,
    TreapMapValuesMut,
};
