//! Bounded circular buffer shared by the free list and the active list.
//!
//! Both structures are FIFOs over a fixed slot array whose size is their own
//! capacity. Head and tail are kept as monotonically increasing positions; the
//! backing slot is `position % capacity`. Because positions never wrap, an
//! empty ring (`head == tail`) and a full one (`tail - head == capacity`) are
//! always distinguishable, and a head position saved earlier can be restored
//! later without ambiguity.
//!
//! Popping does not erase the slot. The free list relies on this: rewinding the
//! head after a misprediction makes the popped identifiers visible again.

/// A saved ring position, as recorded by a branch checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cursor(u64);

/// Fixed-capacity circular FIFO.
#[derive(Clone, Debug)]
pub struct Ring<T> {
    slots: Box<[T]>,
    /// Position of the oldest element.
    head: u64,
    /// Position one past the youngest element.
    tail: u64,
}

impl<T: Clone + Default> Ring<T> {
    /// Creates an empty ring with `capacity` default-initialized slots.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            slots: vec![T::default(); capacity].into_boxed_slice(),
            head: 0,
            tail: 0,
        }
    }
}

impl<T> Ring<T> {
    /// Creates a full ring holding `items` in order (first item at the head).
    pub fn full_of(items: Vec<T>) -> Self {
        assert!(!items.is_empty(), "ring capacity must be non-zero");
        let tail = items.len() as u64;
        Self {
            slots: items.into_boxed_slice(),
            head: 0,
            tail,
        }
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        (self.tail - self.head) as usize
    }

    /// Returns true if no slot is occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns the number of unoccupied slots.
    #[inline]
    pub fn free(&self) -> usize {
        self.capacity() - self.len()
    }

    #[inline]
    fn slot_of(&self, pos: u64) -> usize {
        (pos % self.slots.len() as u64) as usize
    }

    /// Appends `value` after the youngest element and returns its slot.
    pub fn push_back(&mut self, value: T) -> usize {
        assert!(!self.is_full(), "push into a full ring");
        let slot = self.slot_of(self.tail);
        self.slots[slot] = value;
        self.tail += 1;
        slot
    }

    /// Returns the oldest element and its slot without removing it.
    pub fn front(&self) -> Option<(usize, &T)> {
        if self.is_empty() {
            return None;
        }
        let slot = self.slot_of(self.head);
        Some((slot, &self.slots[slot]))
    }

    /// Advances the head past the oldest element. Returns the element's slot.
    pub fn advance_head(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let slot = self.slot_of(self.head);
        self.head += 1;
        Some(slot)
    }

    /// Returns the element at `slot` if that slot is currently occupied.
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.position_of(slot).map(|_| &self.slots[slot])
    }

    /// Returns the element at `slot` mutably if that slot is currently occupied.
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.position_of(slot).map(|_| &mut self.slots[slot])
    }

    /// Returns the current head position.
    #[inline]
    pub const fn head(&self) -> Cursor {
        Cursor(self.head)
    }

    /// Moves the head back to a previously saved position, re-exposing every
    /// element popped since then.
    pub fn rewind_head(&mut self, cursor: Cursor) {
        assert!(cursor.0 <= self.head, "ring head cannot be rewound forward");
        assert!(
            self.tail - cursor.0 <= self.slots.len() as u64,
            "ring head rewind would overfill the ring"
        );
        self.head = cursor.0;
    }

    /// Discards every element younger than the one at `slot`; `slot` becomes the tail.
    pub fn truncate_after(&mut self, slot: usize) {
        let pos = self.position_of(slot);
        assert!(pos.is_some(), "truncate to unoccupied ring slot {slot}");
        if let Some(pos) = pos {
            self.tail = pos + 1;
        }
    }

    /// Discards every element.
    pub const fn clear(&mut self) {
        self.tail = self.head;
    }

    /// Marks every slot occupied again, starting from the current head.
    ///
    /// Whatever each slot last held becomes live. For the free list this is
    /// exactly the set of registers not held by the architectural map.
    pub fn reclaim_all(&mut self) {
        self.tail = self.head + self.slots.len() as u64;
    }

    /// Iterates occupied slots from oldest to youngest as `(slot, element)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        (self.head..self.tail).map(move |pos| {
            let slot = self.slot_of(pos);
            (slot, &self.slots[slot])
        })
    }

    /// Maps an occupied slot back to its absolute position.
    fn position_of(&self, slot: usize) -> Option<u64> {
        if slot >= self.slots.len() {
            return None;
        }
        let cap = self.slots.len() as u64;
        let offset = (slot as u64 + cap - self.head % cap) % cap;
        if offset < self.tail - self.head {
            Some(self.head + offset)
        } else {
            None
        }
    }
}

impl<T: Clone> Ring<T> {
    /// Removes and returns the oldest element. The slot keeps its value.
    pub fn pop_front(&mut self) -> Option<T> {
        self.advance_head().map(|slot| self.slots[slot].clone())
    }
}
