//! A generational arena.
//!
//! Values live in a flat vector of slots. Removing a value frees its slot for
//! reuse and bumps the slot's generation, so a [`Handle`] taken before the
//! removal never resolves to whatever is stored there later.

use std::collections::TryReserveError;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: usize,
    generation: u32,
}

impl Handle {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Clone, Debug)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<usize> },
}

#[derive(Clone, Debug)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
    #[cfg(test)]
    slot_limit: Option<usize>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an arena that can hold `capacity` values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
            #[cfg(test)]
            slot_limit: None,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of values the arena can hold without growing its slot storage.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Stores `value` and returns its handle. Vacant slots are reused before
    /// the slot storage grows.
    pub fn insert(&mut self, value: T) -> Handle {
        let index = match self.free_head {
            Some(index) => index,
            None => {
                self.slots.push(Slot::Vacant {
                    generation: 0,
                    next_free: None,
                });
                self.slots.len() - 1
            }
        };

        let generation = match self.slots[index] {
            Slot::Vacant {
                generation,
                next_free,
            } => {
                self.free_head = next_free;
                generation
            }
            Slot::Occupied { .. } => unreachable!("free list points at occupied slot {index}"),
        };

        self.slots[index] = Slot::Occupied { generation, value };
        self.len += 1;
        Handle { index, generation }
    }

    /// Like [`Arena::insert`], but reports a failure to grow the slot storage
    /// instead of aborting. On failure the arena is unchanged.
    pub fn try_insert(&mut self, value: T) -> Result<Handle, TryReserveError> {
        if self.free_head.is_none() {
            #[cfg(test)]
            self.check_slot_limit()?;
            self.slots.try_reserve(1)?;
        }
        Ok(self.insert(value))
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.slots.get(handle.index)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.slots.get_mut(handle.index)? {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }

    /// Removes the value behind `handle`. Stale handles return `None` and
    /// leave the arena untouched.
    ///
    /// A slot whose generation is exhausted is retired instead of reused, so
    /// no handle ever matches a second value.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.contains(handle) {
            return None;
        }

        let next_generation = handle.generation.checked_add(1);
        let vacant = Slot::Vacant {
            generation: next_generation.unwrap_or(handle.generation),
            next_free: next_generation.and(self.free_head),
        };
        match mem::replace(&mut self.slots[handle.index], vacant) {
            Slot::Occupied { value, .. } => {
                if next_generation.is_some() {
                    self.free_head = Some(handle.index);
                }
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => unreachable!("slot {} checked as occupied", handle.index),
        }
    }

    pub(crate) fn slots_mut(&mut self) -> SlotsMut<'_, T> {
        SlotsMut {
            base: NonNull::new(self.slots.as_mut_ptr()).unwrap_or(NonNull::dangling()),
            len: self.slots.len(),
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
impl<T> Arena<T> {
    /// Lets `try_insert` grow the slot storage by `slots` more slots, then
    /// fails every further growth. Reusing vacant slots keeps working.
    pub(crate) fn fail_growth_after(&mut self, slots: usize) {
        self.slot_limit = Some(self.slots.len() + slots);
    }

    fn check_slot_limit(&self) -> Result<(), TryReserveError> {
        match self.slot_limit {
            Some(limit) if self.slots.len() >= limit => {
                // Any real reservation error will do; this one never allocates.
                Vec::<u8>::new().try_reserve(usize::MAX)
            }
            _ => Ok(()),
        }
    }

    /// Inserts `value` into a fresh or reused slot stamped with `generation`.
    fn insert_at_generation(&mut self, value: T, generation: u32) -> Handle {
        let handle = self.insert(value);
        if let Slot::Occupied { generation: slot, .. } = &mut self.slots[handle.index] {
            *slot = generation;
        }
        Handle {
            index: handle.index,
            generation,
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive view over the slots of an arena that hands out mutable
/// borrows of distinct values at the same time.
pub(crate) struct SlotsMut<'a, T> {
    base: NonNull<Slot<T>>,
    len: usize,
    _marker: PhantomData<&'a mut Arena<T>>,
}

impl<'a, T> SlotsMut<'a, T> {
    /// # Safety
    ///
    /// No two live borrows returned from this view may come from the same
    /// handle.
    pub(crate) unsafe fn get_mut(&self, handle: Handle) -> Option<&'a mut T> {
        if handle.index >= self.len {
            return None;
        }
        // SAFETY: the index is in bounds, the view holds the arena's unique
        // borrow for 'a and the caller keeps the borrows disjoint.
        match unsafe { &mut *self.base.as_ptr().add(handle.index) } {
            Slot::Occupied { generation, value } if *generation == handle.generation => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_generation_retires_the_slot() {
        let mut arena = Arena::new();
        let last = arena.insert_at_generation('a', u32::MAX);
        assert_eq!(arena.get(last), Some(&'a'));

        assert_eq!(arena.remove(last), Some('a'));
        assert_eq!(arena.get(last), None);

        let next = arena.insert('b');
        assert_ne!(next.index(), last.index());
        assert_eq!(arena.get(last), None);
        assert_eq!(arena.remove(last), None);

        // Churn on the other slots never hands the retired one out again.
        for value in 0..8 {
            let handle = arena.insert('c');
            assert_ne!(handle.index(), last.index(), "reused retired slot at {value}");
            arena.remove(handle);
        }
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get(next), Some(&'b'));
    }

    #[test]
    fn generation_below_the_limit_still_recycles() {
        let mut arena = Arena::new();
        let h = arena.insert_at_generation(1, u32::MAX - 1);
        arena.remove(h);

        let reused = arena.insert(2);
        assert_eq!(reused.index(), h.index());
        assert_eq!(reused.generation(), u32::MAX);
        assert_eq!(arena.get(h), None);
    }

    #[test]
    fn slot_limit_fails_growth_but_not_reuse() {
        let mut arena = Arena::new();
        arena.fail_growth_after(1);
        let h = arena.try_insert(1).unwrap();
        assert!(arena.try_insert(2).is_err());
        assert_eq!(arena.len(), 1);

        arena.remove(h);
        assert!(arena.try_insert(3).is_ok());
    }
}
