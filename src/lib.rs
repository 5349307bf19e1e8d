//! An ordered map backed by a treap: a binary search tree on keys that is also a max-heap on
//! randomly drawn priorities, giving an expected logarithmic height.
//!
//! ```
//! use treap_map::TreapMap;
//!
//! let mut map = TreapMap::new();
//! map.insert(3, "c");
//! map.insert(1, "a");
//! map.insert(2, "b");
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! assert_eq!(map.to_string(), "{1: a, 2: b, 3: c}");
//! ```

mod entry;
mod error;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::treap::TreapMap;
