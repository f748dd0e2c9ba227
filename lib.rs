//! A doubly-linked list with head and tail sentinels and bidirectional
//! cursors.
//!
//! ```
//! use sentinel_list::list;
//!
//! let mut list = list![1, 2, 3];
//! list.push_front(0);
//! assert_eq!(list.front(), Some(&0));
//! assert_eq!(list.back(), Some(&3));
//!
//! let end = list.end().position();
//! list.insert(end, 4).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
//! ```

pub mod arena;
mod cursor;
mod error;
mod iter;
mod list;

pub use cursor::{Cursor, CursorMut, Position};
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut};
pub use list::LinkedList;

/// Creates a [`LinkedList`] from literal elements.
///
/// Example:
/// ```
/// # use sentinel_list::list;
/// let a = list![1, 2, 3];
/// let b = list![0; 4]; // [0, 0, 0, 0]
/// let c: sentinel_list::LinkedList<i32> = list![];
/// assert_eq!(a.len() + b.len() + c.len(), 7);
/// ```
#[macro_export]
macro_rules! list {
    () => {
        $crate::LinkedList::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::LinkedList::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::LinkedList::from([$($x),+])
    };
}
