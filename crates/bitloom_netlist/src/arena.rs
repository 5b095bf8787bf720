//! Append-only, ID-indexed storage for wires and nets.
//!
//! A block never deletes a wire or net while a circuit is being described,
//! so IDs handed out by [`Arena::alloc`] stay valid for the block's lifetime.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque ID types used as arena keys.
pub trait ArenaId: Copy {
    /// Creates an ID from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, append-only container keyed by an [`ArenaId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Returns the ID the next [`alloc`](Self::alloc) will hand out.
    pub fn next_id(&self) -> I {
        I::from_raw(self.items.len() as u32)
    }

    /// Appends an item and returns its ID.
    pub fn alloc(&mut self, item: T) -> I {
        let id = self.next_id();
        self.items.push(item);
        id
    }

    /// Returns a reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID was issued by a different arena and is out of bounds.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the item with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID is out of bounds.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns the number of items in the arena.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena contains no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(ID, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over references to items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{NetId, WireId};

    #[test]
    fn alloc_returns_sequential_ids() {
        let mut arena: Arena<WireId, &str> = Arena::new();
        assert_eq!(arena.next_id(), WireId::from_raw(0));
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        assert_eq!(a.as_raw(), 0);
        assert_eq!(b.as_raw(), 1);
        assert_eq!(arena[b], "b");
    }

    #[test]
    fn get_mut_modifies() {
        let mut arena: Arena<WireId, u32> = Arena::new();
        let id = arena.alloc(1);
        arena[id] += 4;
        assert_eq!(arena[id], 5);
    }

    #[test]
    fn iter_preserves_allocation_order() {
        let mut arena: Arena<NetId, char> = Arena::new();
        for c in ['x', 'y', 'z'] {
            arena.alloc(c);
        }
        let collected: Vec<_> = arena.iter().map(|(id, c)| (id.as_raw(), *c)).collect();
        assert_eq!(collected, vec![(0, 'x'), (1, 'y'), (2, 'z')]);
        assert_eq!(arena.len(), 3);
        assert!(!arena.is_empty());
    }
}
