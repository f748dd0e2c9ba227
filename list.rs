use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::arena::{Arena, Handle};
use crate::cursor::{Cursor, CursorMut, Position};
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, IterMut};

/// Identifies one list instance so that positions cannot be used across lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ListId(u64);

impl ListId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ListId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A list node. Sentinels are the only nodes without a value.
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<T> Node<T> {
    fn sentinel() -> Self {
        Node {
            value: None,
            prev: None,
            next: None,
        }
    }

    fn detached(value: T) -> Self {
        Node {
            value: Some(value),
            prev: None,
            next: None,
        }
    }
}

/// Nodes linked to each other but not yet reachable from the sentinels.
struct Run {
    first: Handle,
    last: Handle,
    len: usize,
}

impl Run {
    fn single(node: Handle) -> Self {
        Run {
            first: node,
            last: node,
            len: 1,
        }
    }
}

/// A doubly-linked list with permanent head and tail sentinels.
///
/// Nodes are stored in a generational [`Arena`] owned by the list and refer
/// to each other by handle, so the list is the only owner of every node and
/// each node is dropped exactly once. Positions handed out by the list are
/// checked on use: a position from another list, or one whose element has
/// been removed, is rejected instead of being followed.
///
/// ```
/// use sentinel_list::{list, LinkedList};
///
/// let mut list = list![1, 2, 3];
/// let second = list.begin().move_next().position();
/// list.insert_iter(second, [9, 8, 7]).unwrap();
///
/// assert_eq!(list, LinkedList::from([1, 9, 8, 7, 2, 3]));
/// ```
pub struct LinkedList<T> {
    nodes: Arena<Node<T>>,
    head: Handle,
    tail: Handle,
    len: usize,
    id: ListId,
}

impl<T> LinkedList<T> {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with node storage for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Arena::with_capacity(capacity.saturating_add(2));
        let head = nodes.insert(Node::sentinel());
        let tail = nodes.insert(Node::sentinel());

        let mut list = Self {
            nodes,
            head,
            tail,
            len: 0,
            id: ListId::fresh(),
        };
        list.node_mut(head).next = Some(tail);
        list.node_mut(tail).prev = Some(head);
        list
    }

    /// Creates a list of `count` default values.
    pub fn with_len(count: usize) -> Self
    where
        T: Default,
    {
        let mut list = Self::with_capacity(count);
        list.extend(iter::repeat_with(T::default).take(count));
        list
    }

    /// Creates a list of `count` clones of `value`.
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_capacity(count);
        list.extend(iter::repeat(value).take(count));
        list
    }

    /// Creates a list holding copies of the elements in `[first, last)` of
    /// `source`.
    ///
    /// Fails with [`Error::UnreachableRange`] if `last` does not follow
    /// `first` in `source`.
    pub fn from_range(source: &LinkedList<T>, first: Position, last: Position) -> Result<Self>
    where
        T: Clone,
    {
        let values = source.range(first, last)?;
        let mut list = Self::with_capacity(values.len());
        list.assign_iter(values.cloned())?;
        Ok(list)
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements the list can hold before its node storage grows.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(2)
    }

    /// Reserves node storage for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Returns a reference to the front value.
    pub fn front(&self) -> Option<&T> {
        self.value(self.step_next(self.head))
    }

    /// Returns a mutable reference to the front value.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let first = self.step_next(self.head);
        self.node_mut(first).value.as_mut()
    }

    /// Returns a reference to the back value.
    pub fn back(&self) -> Option<&T> {
        self.value(self.step_prev(self.tail))
    }

    /// Returns a mutable reference to the back value.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.step_prev(self.tail);
        self.node_mut(last).value.as_mut()
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| item == value)
    }

    /// Pushes a value to the front of the list.
    pub fn push_front(&mut self, value: T) {
        let node = self.nodes.insert(Node::detached(value));
        let first = self.step_next(self.head);
        self.splice_before(first, Run::single(node));
    }

    /// Pushes a value to the back of the list.
    pub fn push_back(&mut self, value: T) {
        let node = self.nodes.insert(Node::detached(value));
        self.splice_before(self.tail, Run::single(node));
    }

    /// Like [`LinkedList::push_front`], but reports allocation failure.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        let node = self.nodes.try_insert(Node::detached(value))?;
        let first = self.step_next(self.head);
        self.splice_before(first, Run::single(node));
        Ok(())
    }

    /// Like [`LinkedList::push_back`], but reports allocation failure.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        let node = self.nodes.try_insert(Node::detached(value))?;
        self.splice_before(self.tail, Run::single(node));
        Ok(())
    }

    /// Pops a value from the front of the list.
    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.step_next(self.head);
        (first != self.tail).then(|| self.unlink(first))
    }

    /// Pops a value from the back of the list.
    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.step_prev(self.tail);
        (last != self.head).then(|| self.unlink(last))
    }

    /// Inserts `value` immediately before `pos` and returns the position of
    /// the new element. Inserting before [`LinkedList::end`] appends.
    pub fn insert(&mut self, pos: Position, value: T) -> Result<Position> {
        let at = self.insertion_point(pos)?;
        let node = self.nodes.try_insert(Node::detached(value))?;
        self.splice_before(at, Run::single(node));
        Ok(self.position(node))
    }

    /// Inserts every item of `values`, in order, immediately before `pos`.
    ///
    /// Returns the position of the first inserted element, or `pos` itself
    /// when `values` is empty. The new elements are linked in only once all
    /// of them have been allocated, so a failed call leaves the list as it was.
    pub fn insert_iter<I>(&mut self, pos: Position, values: I) -> Result<Position>
    where
        I: IntoIterator<Item = T>,
    {
        let at = self.insertion_point(pos)?;
        match self.build_run(values.into_iter())? {
            Some(run) => {
                let first = run.first;
                trace!(count = run.len, "insert run");
                self.splice_before(at, run);
                Ok(self.position(first))
            }
            None => Ok(pos),
        }
    }

    /// Inserts copies of the elements in `[first, last)` of `source`
    /// immediately before `pos`. Returns as [`LinkedList::insert_iter`] does.
    pub fn insert_range(
        &mut self,
        pos: Position,
        source: &LinkedList<T>,
        first: Position,
        last: Position,
    ) -> Result<Position>
    where
        T: Clone,
    {
        let values = source.range(first, last)?;
        self.insert_iter(pos, values.cloned())
    }

    /// Removes the element at `pos` and returns the position that followed
    /// it, which is [`LinkedList::end`] if `pos` was the last element.
    pub fn erase(&mut self, pos: Position) -> Result<Position> {
        let node = self.element(pos)?;
        let next = self.step_next(node);
        self.unlink(node);
        Ok(self.position(next))
    }

    /// Removes the element at `pos` and returns it.
    pub fn remove(&mut self, pos: Position) -> Result<T> {
        let node = self.element(pos)?;
        Ok(self.unlink(node))
    }

    /// Removes every element in `[first, last)` and returns `last`.
    ///
    /// The range is checked before anything is removed.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Result<Position> {
        let (mut node, to, count) = self.checked_range(first, last)?;
        trace!(count, "erase range");
        for _ in 0..count {
            let next = self.step_next(node);
            self.unlink(node);
            node = next;
        }
        Ok(self.position(to))
    }

    /// Removes all elements. The sentinels, and with them
    /// [`LinkedList::end`], stay valid.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        trace!(len = self.len, "clear");
        while self.pop_front().is_some() {}
    }

    /// Overwrites every element with a clone of `value`. Length and
    /// positions are unchanged.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for item in self.iter_mut() {
            item.clone_from(&value);
        }
    }

    /// Replaces the contents with `count` clones of `value`.
    pub fn assign_n(&mut self, count: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        self.assign_iter(iter::repeat(value).take(count))
    }

    /// Replaces the contents with copies of `[first, last)` of `source`.
    pub fn assign_range(&mut self, source: &LinkedList<T>, first: Position, last: Position) -> Result<()>
    where
        T: Clone,
    {
        let values = source.range(first, last)?;
        self.assign_iter(values.cloned())
    }

    /// Replaces the contents with the items of `values`, in order.
    ///
    /// The new nodes are allocated before the old ones are dropped; on
    /// failure the old contents are kept.
    pub fn assign_iter<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let run = self.build_run(values.into_iter())?;
        self.clear();
        if let Some(run) = run {
            self.splice_before(self.tail, run);
        }
        trace!(len = self.len, "assign");
        Ok(())
    }

    /// Returns a cursor at the first element, or at the end if the list is
    /// empty.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.step_next(self.head))
    }

    /// Returns a cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.tail)
    }

    /// Like [`LinkedList::begin`], but the cursor can edit the list.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        let first = self.step_next(self.head);
        CursorMut::new(self, first)
    }

    /// Like [`LinkedList::end`], but the cursor can edit the list.
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let tail = self.tail;
        CursorMut::new(self, tail)
    }

    /// Returns a cursor at `pos`.
    pub fn cursor(&self, pos: Position) -> Result<Cursor<'_, T>> {
        let node = self.resolve(pos)?;
        Ok(Cursor::new(self, node))
    }

    /// Returns a mutable cursor at `pos`.
    pub fn cursor_mut(&mut self, pos: Position) -> Result<CursorMut<'_, T>> {
        let node = self.resolve(pos)?;
        Ok(CursorMut::new(self, node))
    }

    /// Returns the element at `pos`, or `None` if `pos` is a boundary or
    /// does not refer to a live element of this list.
    pub fn get(&self, pos: Position) -> Option<&T> {
        let node = self.resolve(pos).ok()?;
        self.value(node)
    }

    /// Mutable counterpart of [`LinkedList::get`].
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        let node = self.resolve(pos).ok()?;
        self.node_mut(node).value.as_mut()
    }

    /// Returns the position after `pos`. The end position maps to itself.
    pub fn next_position(&self, pos: Position) -> Result<Position> {
        let node = self.resolve(pos)?;
        Ok(self.position(self.step_next(node)))
    }

    /// Returns the position before `pos`. Stepping back from the first
    /// element yields the before-begin position.
    pub fn prev_position(&self, pos: Position) -> Result<Position> {
        let node = self.resolve(pos)?;
        Ok(self.position(self.step_prev(node)))
    }

    /// Counts the forward steps from `first` to `last`.
    ///
    /// Fails with [`Error::UnreachableRange`] if `last` is not reachable from
    /// `first` by moving forward.
    pub fn distance(&self, first: Position, last: Position) -> Result<usize> {
        let from = self.resolve(first)?;
        let to = self.resolve(last)?;
        self.steps_between(from, to)
    }

    /// Iterates over the elements in `[first, last)`.
    pub fn range(&self, first: Position, last: Position) -> Result<Iter<'_, T>> {
        let (from, to, count) = self.checked_range(first, last)?;
        Ok(Iter::new(self, from, self.step_prev(to), count))
    }

    /// Iterates over the elements from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, self.step_next(self.head), self.step_prev(self.tail), self.len)
    }

    /// Iterates mutably over the elements from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.step_next(self.head);
        let back = self.step_prev(self.tail);
        let len = self.len;
        IterMut::new(self.nodes.slots_mut(), front, back, len)
    }

    pub(crate) fn position(&self, node: Handle) -> Position {
        Position::new(self.id, node)
    }

    pub(crate) fn tail_handle(&self) -> Handle {
        self.tail
    }

    pub(crate) fn head_handle(&self) -> Handle {
        self.head
    }

    pub(crate) fn value(&self, node: Handle) -> Option<&T> {
        self.nodes.get(node)?.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self, node: Handle) -> Option<&mut T> {
        self.nodes.get_mut(node)?.value.as_mut()
    }

    /// Follows `next`, staying put at the tail sentinel.
    pub(crate) fn step_next(&self, node: Handle) -> Handle {
        self.node(node).next.unwrap_or(node)
    }

    /// Follows `prev`, staying put at the head sentinel.
    pub(crate) fn step_prev(&self, node: Handle) -> Handle {
        self.node(node).prev.unwrap_or(node)
    }

    pub(crate) fn resolve(&self, pos: Position) -> Result<Handle> {
        if pos.list() != self.id {
            debug!(?pos, "rejected position from another list");
            return Err(Error::ForeignPosition);
        }
        if !self.nodes.contains(pos.node()) {
            debug!(?pos, "rejected stale position");
            return Err(Error::StalePosition);
        }
        Ok(pos.node())
    }

    /// Resolves a position that must hold an element.
    fn element(&self, pos: Position) -> Result<Handle> {
        let node = self.resolve(pos)?;
        if node == self.head || node == self.tail {
            debug!(?pos, "rejected boundary position");
            return Err(Error::Boundary);
        }
        Ok(node)
    }

    /// Resolves a position new elements can be linked in front of.
    fn insertion_point(&self, pos: Position) -> Result<Handle> {
        let node = self.resolve(pos)?;
        if node == self.head {
            debug!(?pos, "rejected insertion before the head sentinel");
            return Err(Error::Boundary);
        }
        Ok(node)
    }

    /// Resolves `[first, last)` to its first node, end node and length.
    fn checked_range(&self, first: Position, last: Position) -> Result<(Handle, Handle, usize)> {
        let from = self.resolve(first)?;
        let to = self.resolve(last)?;
        if from == self.head {
            debug!(?first, "rejected range starting at the head sentinel");
            return Err(Error::Boundary);
        }
        let count = self.steps_between(from, to)?;
        Ok((from, to, count))
    }

    fn steps_between(&self, from: Handle, to: Handle) -> Result<usize> {
        let mut steps = 0;
        let mut node = from;
        while node != to {
            match self.node(node).next {
                Some(next) => {
                    node = next;
                    steps += 1;
                }
                None => {
                    debug!(?from, ?to, "range end not reachable");
                    return Err(Error::UnreachableRange);
                }
            }
        }
        Ok(steps)
    }

    /// Allocates and chains a detached run for `values`. If an allocation
    /// fails, the nodes created so far are dropped again.
    fn build_run<I>(&mut self, values: I) -> Result<Option<Run>>
    where
        I: Iterator<Item = T>,
    {
        let mut run: Option<Run> = None;
        for value in values {
            let node = match self.nodes.try_insert(Node::detached(value)) {
                Ok(node) => node,
                Err(err) => {
                    if let Some(run) = run {
                        self.discard(run);
                    }
                    return Err(err.into());
                }
            };
            run = Some(match run {
                None => Run::single(node),
                Some(mut run) => {
                    self.node_mut(run.last).next = Some(node);
                    self.node_mut(node).prev = Some(run.last);
                    run.last = node;
                    run.len += 1;
                    run
                }
            });
        }
        Ok(run)
    }

    fn discard(&mut self, run: Run) {
        let mut next = Some(run.first);
        while let Some(node) = next {
            next = self.nodes.remove(node).and_then(|node| node.next);
        }
    }

    /// Links `run` between `at` and its predecessor.
    fn splice_before(&mut self, at: Handle, run: Run) {
        let Some(prev) = self.node(at).prev else {
            unreachable!("splice before the head sentinel");
        };
        self.node_mut(prev).next = Some(run.first);
        self.node_mut(run.first).prev = Some(prev);
        self.node_mut(run.last).next = Some(at);
        self.node_mut(at).prev = Some(run.last);
        self.len += run.len;
    }

    /// Unlinks and frees a real node.
    pub(crate) fn unlink(&mut self, node: Handle) -> T {
        let Some(Node { value, prev, next }) = self.nodes.remove(node) else {
            unreachable!("unlink of dead node {node:?}");
        };
        let (Some(value), Some(prev), Some(next)) = (value, prev, next) else {
            unreachable!("unlink of sentinel {node:?}");
        };
        self.node_mut(prev).next = Some(next);
        self.node_mut(next).prev = Some(prev);
        self.len -= 1;
        value
    }

    fn node(&self, node: Handle) -> &Node<T> {
        match self.nodes.get(node) {
            Some(node) => node,
            None => unreachable!("dangling link to {node:?}"),
        }
    }

    fn node_mut(&mut self, node: Handle) -> &mut Node<T> {
        match self.nodes.get_mut(node) {
            Some(node) => node,
            None => unreachable!("dangling link to {node:?}"),
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        list.extend(self.iter().cloned());
        list
    }

    /// Reuses the nodes already owned by `self`; the result still shares
    /// nothing with `source`.
    fn clone_from(&mut self, source: &Self) {
        let mut values = source.iter();
        for (item, value) in self.iter_mut().zip(&mut values) {
            item.clone_from(value);
        }
        while self.len > source.len {
            self.pop_back();
        }
        self.extend(values.cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: PartialOrd> PartialOrd for LinkedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedList<T> {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for LinkedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for item in self {
            item.hash(state);
        }
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedList<T> {
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Tracked(Rc<Cell<usize>>);

    impl Tracked {
        fn new(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Tracked(live.clone())
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    fn values(list: &LinkedList<(u8, Tracked)>) -> Vec<u8> {
        list.iter().map(|(value, _)| *value).collect()
    }

    fn filled(live: &Rc<Cell<usize>>) -> LinkedList<(u8, Tracked)> {
        let mut list = LinkedList::new();
        for value in 1..=3 {
            list.push_back((value, Tracked::new(live)));
        }
        list
    }

    #[test]
    fn failed_insert_iter_leaves_list_untouched() {
        let live = Rc::new(Cell::new(0));
        let mut list = filled(&live);
        let second = (list.begin() + 1).position();
        let end = list.end().position();

        list.nodes.fail_growth_after(2);
        let run = (10..15).map(|value| (value, Tracked::new(&live)));
        let err = list.insert_iter(second, run).unwrap_err();

        assert!(matches!(err, Error::Alloc(_)));
        assert_eq!(list.len(), 3);
        assert_eq!(values(&list), [1, 2, 3]);
        assert_eq!(list.get(second).map(|(value, _)| *value), Some(2));
        assert_eq!(list.distance(second, end), Ok(2));
        // Two nodes were built and dropped again, the third value with them.
        assert_eq!(live.get(), 3);
        assert_eq!(list.nodes.len(), 3 + 2);
    }

    #[test]
    fn failed_assign_iter_keeps_old_contents() {
        let live = Rc::new(Cell::new(0));
        let mut list = filled(&live);
        let first = list.begin().position();

        list.nodes.fail_growth_after(1);
        let run = (10..14).map(|value| (value, Tracked::new(&live)));
        let err = list.assign_iter(run).unwrap_err();

        assert!(matches!(err, Error::Alloc(_)));
        assert_eq!(values(&list), [1, 2, 3]);
        assert_eq!(list.get(first).map(|(value, _)| *value), Some(1));
        assert_eq!(live.get(), 3);

        list.clear();
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn failed_try_push_back_drops_the_value() {
        let live = Rc::new(Cell::new(0));
        let mut list = filled(&live);
        let last = (list.end() - 1).position();

        list.nodes.fail_growth_after(0);
        let err = list.try_push_back((4, Tracked::new(&live))).unwrap_err();
        assert!(matches!(err, Error::Alloc(_)));
        assert!(matches!(
            list.try_push_front((0, Tracked::new(&live))),
            Err(Error::Alloc(_))
        ));
        assert_eq!(values(&list), [1, 2, 3]);
        assert_eq!(live.get(), 3);

        // A freed slot is reused without growing.
        list.pop_front();
        list.try_push_back((4, Tracked::new(&live))).unwrap();
        assert_eq!(values(&list), [2, 3, 4]);
        assert_eq!(list.next_position(last).map(|pos| list.get(pos).map(|(v, _)| *v)), Ok(Some(4)));
    }

    #[test]
    fn failed_insert_reports_alloc_error() {
        let mut list = LinkedList::from([1, 2]);
        list.nodes.fail_growth_after(0);
        let end = list.end().position();
        assert!(matches!(list.insert(end, 3), Err(Error::Alloc(_))));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2]);
    }
}
