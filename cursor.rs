//! Positions and cursors.
//!
//! A [`Position`] names one node of one list, the way an iterator value does
//! in other list implementations, without borrowing the list. It is what
//! `insert` and `erase` take and return. [`Cursor`] and [`CursorMut`] borrow
//! the list and walk it in both directions from a position; they share the
//! navigation steps of the list itself and differ only in access.
//!
//! Positions compare by node identity. Two cursors are equal when they
//! stand on the same node, whatever the values stored there.
//!
//! Moving backwards from the first element lands on the head sentinel, which
//! holds no value; moving further back, or forward from the end, stays put.

use std::fmt;
use std::ops::{Add, Sub};

use crate::arena::Handle;
use crate::error::Result;
use crate::list::{LinkedList, ListId};

/// A detached position in a [`LinkedList`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    list: ListId,
    node: Handle,
}

impl Position {
    pub(crate) fn new(list: ListId, node: Handle) -> Self {
        Position { list, node }
    }

    pub(crate) fn list(self) -> ListId {
        self.list
    }

    pub(crate) fn node(self) -> Handle {
        self.node
    }
}

/// A read-only bidirectional cursor.
pub struct Cursor<'a, T> {
    list: &'a LinkedList<T>,
    node: Handle,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(list: &'a LinkedList<T>, node: Handle) -> Self {
        Cursor { list, node }
    }

    pub fn position(&self) -> Position {
        self.list.position(self.node)
    }

    /// Returns the element under the cursor, or `None` on a sentinel.
    pub fn get(&self) -> Option<&'a T> {
        self.list.value(self.node)
    }

    pub fn is_end(&self) -> bool {
        self.node == self.list.tail_handle()
    }

    /// True on the head sentinel, one step before the first element.
    pub fn is_before_begin(&self) -> bool {
        self.node == self.list.head_handle()
    }

    pub fn move_next(&mut self) -> &mut Self {
        self.node = self.list.step_next(self.node);
        self
    }

    pub fn move_prev(&mut self) -> &mut Self {
        self.node = self.list.step_prev(self.node);
        self
    }

    /// Moves forward and returns the cursor as it was before the move.
    pub fn post_next(&mut self) -> Self {
        let before = *self;
        self.move_next();
        before
    }

    /// Moves backward and returns the cursor as it was before the move.
    pub fn post_prev(&mut self) -> Self {
        let before = *self;
        self.move_prev();
        before
    }

    /// Takes `steps` single steps forward.
    pub fn advance_by(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.move_next();
        }
        self
    }

    /// Takes `steps` single steps backward.
    pub fn retreat_by(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.move_prev();
        }
        self
    }

    /// Counts the forward steps from this cursor to `other`.
    ///
    /// Fails with [`Error::UnreachableRange`](crate::Error::UnreachableRange)
    /// if `other` lies behind this cursor, and with
    /// [`Error::ForeignPosition`](crate::Error::ForeignPosition) if it walks
    /// another list.
    pub fn distance_to(&self, other: &Cursor<'_, T>) -> Result<usize> {
        self.list.distance(self.position(), other.position())
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> Add<usize> for Cursor<'_, T> {
    type Output = Self;

    fn add(mut self, steps: usize) -> Self {
        self.advance_by(steps);
        self
    }
}

impl<T> Sub<usize> for Cursor<'_, T> {
    type Output = Self;

    fn sub(mut self, steps: usize) -> Self {
        self.retreat_by(steps);
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A bidirectional cursor with mutable access to the element under it.
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedList<T>,
    node: Handle,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(list: &'a mut LinkedList<T>, node: Handle) -> Self {
        CursorMut { list, node }
    }

    pub fn position(&self) -> Position {
        self.list.position(self.node)
    }

    pub fn get(&self) -> Option<&T> {
        self.list.value(self.node)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.list.value_mut(self.node)
    }

    pub fn is_end(&self) -> bool {
        self.node == self.list.tail_handle()
    }

    pub fn is_before_begin(&self) -> bool {
        self.node == self.list.head_handle()
    }

    /// Borrows this cursor as a read-only one at the same node.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.list, self.node)
    }

    pub fn move_next(&mut self) -> &mut Self {
        self.node = self.list.step_next(self.node);
        self
    }

    pub fn move_prev(&mut self) -> &mut Self {
        self.node = self.list.step_prev(self.node);
        self
    }

    /// Moves forward and returns the position the cursor left.
    ///
    /// Returns a [`Position`] rather than a second cursor: the list is
    /// mutably borrowed by `self`, so no other cursor can exist alongside it.
    pub fn post_next(&mut self) -> Position {
        let before = self.position();
        self.move_next();
        before
    }

    /// Moves backward and returns the position the cursor left.
    ///
    /// Returns a [`Position`] rather than a second cursor: the list is
    /// mutably borrowed by `self`, so no other cursor can exist alongside it.
    pub fn post_prev(&mut self) -> Position {
        let before = self.position();
        self.move_prev();
        before
    }

    pub fn advance_by(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.move_next();
        }
        self
    }

    pub fn retreat_by(&mut self, steps: usize) -> &mut Self {
        for _ in 0..steps {
            self.move_prev();
        }
        self
    }

    pub fn distance_to(&self, other: Position) -> Result<usize> {
        self.list.distance(self.position(), other)
    }

    /// Inserts `value` before the cursor, which stays on its element.
    pub fn insert_before(&mut self, value: T) -> Result<Position> {
        let pos = self.position();
        self.list.insert(pos, value)
    }

    /// Removes the element under the cursor and moves to the one after it.
    /// Returns `None` on a sentinel.
    pub fn remove_current(&mut self) -> Option<T> {
        self.get()?;
        let next = self.list.step_next(self.node);
        let value = self.list.unlink(self.node);
        self.node = next;
        Some(value)
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.position() == other.position()
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}
