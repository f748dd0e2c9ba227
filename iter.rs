use std::fmt;
use std::iter::FusedIterator;

use crate::arena::{Handle, SlotsMut};
use crate::list::{LinkedList, Node};

/// Borrowing iterator over a window of a list, front to back.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Handle,
    back: Handle,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a LinkedList<T>, front: Handle, back: Handle, len: usize) -> Self {
        Iter {
            list,
            front,
            back,
            len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.front;
        self.front = self.list.step_next(node);
        self.len -= 1;
        self.list.value(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = self.back;
        self.back = self.list.step_prev(node);
        self.len -= 1;
        self.list.value(node)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over a list, front to back.
pub struct IterMut<'a, T> {
    slots: SlotsMut<'a, Node<T>>,
    front: Handle,
    back: Handle,
    len: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(slots: SlotsMut<'a, Node<T>>, front: Handle, back: Handle, len: usize) -> Self {
        IterMut {
            slots,
            front,
            back,
            len,
        }
    }
}

// SAFETY: an `IterMut` is a `&mut LinkedList<T>` split into element borrows.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: `len` bounds the walk, so front and back never hand out the
        // same node twice.
        let node = unsafe { self.slots.get_mut(self.front) }?;
        if let Some(next) = node.next {
            self.front = next;
        }
        node.value.as_mut()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: see `next`.
        let node = unsafe { self.slots.get_mut(self.back) }?;
        if let Some(prev) = node.prev {
            self.back = prev;
        }
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a list, front to back.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(list: LinkedList<T>) -> Self {
        IntoIter { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
