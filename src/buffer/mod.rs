//! # Ring Buffer Module
//!
//! This module provides the circular (ring) buffer and its thread-safe wrapper.
//!
//! ## Plain English Explanation
//!
//! Imagine a circular conveyor belt with a fixed number of spots.
//! Every time a new item comes along:
//! 1. It goes on the belt at the next spot
//! 2. If the belt is full, the oldest item gets removed first
//! 3. A consumer picks items off in the order they went on
//!
//! The belt never grows, so memory use is fixed from the start.

mod one_slot;

pub use one_slot::OneSlotRing;

use std::fmt;

use log::info;
use parking_lot::Mutex;

use crate::config::RingConfig;
use crate::element::Element;
use crate::error::{RingBufferError, RingResult};

// ============================================
// RING CONTRACT
// ============================================

/// What every full/empty scheme has to provide
///
/// ## Plain English
///
/// Each `BufferKind` is a different recipe for the same dish. Callers only
/// talk to this trait, so adding a recipe never touches them.
pub trait Ring<T: Clone> {
    /// Maximum number of unread elements.
    fn capacity(&self) -> usize;

    /// Number of unread elements.
    fn len(&self) -> usize;

    /// True when nothing is left to read.
    fn is_empty(&self) -> bool;

    /// True when the next write evicts the oldest element.
    fn is_full(&self) -> bool;

    /// Stores an element, evicting the oldest if full. Never fails.
    fn write(&mut self, element: Element<T>);

    /// Removes the oldest element, or returns nil when empty.
    fn read(&mut self) -> Element<T>;

    /// Drops all content and resets to empty.
    fn clear(&mut self);
}

// ============================================
// RING BUFFER
// ============================================

#[derive(Debug, Clone)]
enum Engine<T> {
    OneSlot(OneSlotRing<T>),
}

/// A fixed-capacity ring buffer chosen by [`BufferKind`](crate::BufferKind)
///
/// ## Plain English
///
/// This is the type callers hold. It forwards every call to the engine the
/// configuration picked. Today that is always the one-slot-open engine.
///
/// Not safe to share between threads without a lock; see
/// [`SharedRingBuffer`].
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    engine: Engine<T>,
}

impl<T> RingBuffer<T> {
    /// Creates a one-slot-open buffer with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0 or `usize::MAX`.
    pub fn new(capacity: usize) -> Self {
        match Self::with_config(RingConfig::new(capacity)) {
            Ok(buffer) => buffer,
            Err(error) => panic!("Invalid ring buffer configuration: {}", error),
        }
    }

    /// Creates a buffer from explicit options.
    ///
    /// Fails on invalid capacity or on a kind with no engine.
    pub fn with_config(config: RingConfig) -> RingResult<Self> {
        if !config.kind.is_implemented() {
            return Err(RingBufferError::UnsupportedKind(config.kind));
        }

        let engine = Engine::OneSlot(OneSlotRing::with_config(&config)?);
        Ok(Self { engine })
    }

    /// Returns the maximum number of unread elements.
    pub fn capacity(&self) -> usize {
        match &self.engine {
            Engine::OneSlot(ring) => ring.capacity(),
        }
    }

    /// Returns the number of unread elements.
    pub fn len(&self) -> usize {
        match &self.engine {
            Engine::OneSlot(ring) => ring.len(),
        }
    }

    /// Returns true if nothing is left to read.
    pub fn is_empty(&self) -> bool {
        match &self.engine {
            Engine::OneSlot(ring) => ring.is_empty(),
        }
    }

    /// Returns true if the next write evicts the oldest element.
    pub fn is_full(&self) -> bool {
        match &self.engine {
            Engine::OneSlot(ring) => ring.is_full(),
        }
    }

    /// Steps a cursor forward with wraparound.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than the capacity.
    pub fn next(&self, index: usize) -> usize {
        match &self.engine {
            Engine::OneSlot(ring) => ring.next(index),
        }
    }

    /// Steps a cursor forward, reporting a bad index as an error.
    pub fn checked_next(&self, index: usize) -> RingResult<usize> {
        match &self.engine {
            Engine::OneSlot(ring) => ring.checked_next(index),
        }
    }

    /// Adds an element. If the buffer is full, the oldest is evicted first.
    pub fn write(&mut self, element: impl Into<Element<T>>) {
        match &mut self.engine {
            Engine::OneSlot(ring) => ring.write(element),
        }
    }

    /// Returns the oldest unread element without removing it.
    pub fn peek_oldest(&self) -> Option<&Element<T>> {
        match &self.engine {
            Engine::OneSlot(ring) => ring.peek_oldest(),
        }
    }

    /// Returns the newest unread element without removing it.
    pub fn peek_newest(&self) -> Option<&Element<T>> {
        match &self.engine {
            Engine::OneSlot(ring) => ring.peek_newest(),
        }
    }

    /// Returns an iterator over unread elements (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &Element<T>> {
        match &self.engine {
            Engine::OneSlot(ring) => ring.iter(),
        }
    }

    /// Returns the raw backing storage, stale slots included.
    pub fn slots(&self) -> &[Element<T>] {
        match &self.engine {
            Engine::OneSlot(ring) => ring.slots(),
        }
    }

    /// Clears all elements and resets both cursors.
    pub fn clear(&mut self) {
        match &mut self.engine {
            Engine::OneSlot(ring) => ring.clear(),
        }
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Removes and returns the oldest unread element.
    ///
    /// Returns [`Element::Nil`] when empty; that is not an error.
    pub fn read(&mut self) -> Element<T> {
        match &mut self.engine {
            Engine::OneSlot(ring) => ring.read(),
        }
    }

    /// Reads until empty, yielding each element.
    ///
    /// Elements not consumed before the iterator is dropped stay unread.
    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { buffer: self }
    }

    /// Returns clones of all unread elements (oldest first).
    pub fn to_vec(&self) -> Vec<Element<T>> {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> RingBuffer<T> {
    /// Renders cursor positions and every slot for debugging.
    pub fn dump(&self) -> String {
        match &self.engine {
            Engine::OneSlot(ring) => ring.dump(),
        }
    }
}

impl<T: Clone> Ring<T> for RingBuffer<T> {
    fn capacity(&self) -> usize {
        RingBuffer::capacity(self)
    }

    fn len(&self) -> usize {
        RingBuffer::len(self)
    }

    fn is_empty(&self) -> bool {
        RingBuffer::is_empty(self)
    }

    fn is_full(&self) -> bool {
        RingBuffer::is_full(self)
    }

    fn write(&mut self, element: Element<T>) {
        RingBuffer::write(self, element)
    }

    fn read(&mut self) -> Element<T> {
        RingBuffer::read(self)
    }

    fn clear(&mut self) {
        RingBuffer::clear(self)
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(RingConfig::default().capacity)
    }
}

/// Iterator returned by [`RingBuffer::drain`].
pub struct Drain<'a, T> {
    buffer: &'a mut RingBuffer<T>,
}

impl<T: Clone> Iterator for Drain<'_, T> {
    type Item = Element<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer.read())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl<T: Clone> ExactSizeIterator for Drain<'_, T> {}

// ============================================
// SHARED RING BUFFER
// Lock-guarded wrapper for cross-thread use
// ============================================

/// A ring buffer that can be shared across threads
///
/// ## Plain English Explanation
///
/// A producer thread writes while a consumer thread reads. Both move the
/// cursors, so every operation takes the same lock (like a single key to a
/// storeroom). Reads mutate the buffer too, which is why this is a plain
/// mutex rather than a read-write lock.
///
/// The plain [`RingBuffer`] does none of this; opt in by using this type.
pub struct SharedRingBuffer<T> {
    /// The actual ring buffer, protected by a mutex
    inner: Mutex<RingBuffer<T>>,

    /// Fixed at construction, so readable without the lock
    capacity: usize,
}

impl<T> SharedRingBuffer<T> {
    /// Creates a new shared buffer from explicit options.
    pub fn with_config(config: RingConfig) -> RingResult<Self> {
        let capacity = config.capacity;
        let buffer = RingBuffer::with_config(config)?;

        info!("Creating shared ring buffer: {} element capacity", capacity);

        Ok(Self {
            inner: Mutex::new(buffer),
            capacity,
        })
    }

    /// Wraps an existing buffer.
    pub fn from_buffer(buffer: RingBuffer<T>) -> Self {
        let capacity = buffer.capacity();
        Self {
            inner: Mutex::new(buffer),
            capacity,
        }
    }

    /// Adds an element, evicting the oldest if full.
    pub fn write(&self, element: impl Into<Element<T>>) {
        self.inner.lock().write(element);
    }

    /// Returns true if nothing is left to read.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns true if the next write evicts the oldest element.
    pub fn is_full(&self) -> bool {
        self.inner.lock().is_full()
    }

    /// Returns the number of unread elements.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns the maximum number of unread elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns how full the buffer is (0.0 = empty, 1.0 = full)
    pub fn fill_ratio(&self) -> f32 {
        self.len() as f32 / self.capacity as f32
    }

    /// Clears all elements from the buffer.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with the lock held, for compound operations.
    ///
    /// ## Example
    /// ```
    /// # use oneslot_ring::{RingConfig, SharedRingBuffer};
    /// let shared = SharedRingBuffer::<u8>::with_config(RingConfig::new(4)).unwrap();
    /// shared.with_lock(|buffer| {
    ///     if !buffer.is_full() {
    ///         buffer.write(b'a');
    ///     }
    /// });
    /// assert_eq!(shared.len(), 1);
    /// ```
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut RingBuffer<T>) -> R) -> R {
        let mut buffer = self.inner.lock();
        f(&mut buffer)
    }

    /// Unwraps the inner buffer.
    pub fn into_inner(self) -> RingBuffer<T> {
        self.inner.into_inner()
    }
}

impl<T: Clone> SharedRingBuffer<T> {
    /// Removes and returns the oldest element, or nil when empty.
    pub fn read(&self) -> Element<T> {
        self.inner.lock().read()
    }

    /// Takes a snapshot of all unread elements (oldest first).
    ///
    /// The buffer is NOT modified.
    pub fn snapshot(&self) -> Vec<Element<T>> {
        self.inner.lock().to_vec()
    }
}

impl<T: fmt::Debug> SharedRingBuffer<T> {
    /// Renders cursor positions and every slot for debugging.
    pub fn dump(&self) -> String {
        self.inner.lock().dump()
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BufferKind;
    use std::sync::Arc;
    use std::thread;

    fn values(elements: impl IntoIterator<Item = Element<i64>>) -> Vec<i64> {
        elements.into_iter().filter_map(Element::into_value).collect()
    }

    #[test]
    fn test_buffer_creation() {
        let buffer: RingBuffer<i64> = RingBuffer::new(8);
        assert_eq!(buffer.capacity(), 8);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
    }

    #[test]
    fn test_default_capacity() {
        let buffer: RingBuffer<u8> = RingBuffer::default();
        assert_eq!(buffer.capacity(), 16);
    }

    #[test]
    #[should_panic(expected = "Capacity must be at least 1")]
    fn test_new_rejects_zero_capacity() {
        let _ = RingBuffer::<i64>::new(0);
    }

    #[test]
    fn test_unimplemented_kind_rejected() {
        let config = RingConfig::new(4).with_kind(BufferKind::FillCount);
        let result = RingBuffer::<i64>::with_config(config);

        assert_eq!(
            result.err(),
            Some(RingBufferError::UnsupportedKind(BufferKind::FillCount))
        );
    }

    #[test]
    fn test_write_then_drain_in_order() {
        let mut buffer: RingBuffer<i64> = RingBuffer::new(5);
        for i in 0..5i64 {
            buffer.write(i);
        }

        assert!(buffer.is_full());
        assert_eq!(buffer.drain().len(), 5);
        assert_eq!(values(buffer.drain()), vec![0, 1, 2, 3, 4]);
        assert!(buffer.drain().next().is_none());
    }

    #[test]
    fn test_buffer_overflow() {
        let mut buffer: RingBuffer<i64> = RingBuffer::new(8);
        for i in 1..=16i64 {
            buffer.write(i);
        }

        assert!(buffer.is_full());
        assert_eq!(values(buffer.drain()), (9..=16).collect::<Vec<_>>());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_one_more_evicts_first_written() {
        let mut buffer: RingBuffer<i64> = RingBuffer::new(3);
        for i in 1..=3i64 {
            buffer.write(i);
        }
        buffer.write(4i64);

        assert_eq!(buffer.peek_oldest(), Some(&Element::new(2)));
        assert_eq!(buffer.peek_newest(), Some(&Element::new(4)));
    }

    #[test]
    fn test_partial_drain_leaves_rest() {
        let mut buffer: RingBuffer<i64> = RingBuffer::new(4);
        for i in 1..=4i64 {
            buffer.write(i);
        }

        let first: Vec<_> = buffer.drain().take(2).collect();
        assert_eq!(values(first), vec![1, 2]);
        assert_eq!(values(buffer.to_vec()), vec![3, 4]);
    }

    #[test]
    fn test_empty_read_is_nil() {
        let mut buffer: RingBuffer<i64> = RingBuffer::new(2);

        assert!(buffer.read().is_nil());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_resets() {
        let config = RingConfig::new(3).with_clear_on_vacate(true);
        let mut buffer: RingBuffer<i64> = RingBuffer::with_config(config).unwrap();
        buffer.write(1i64);
        buffer.write(2i64);

        buffer.clear();
        assert!(buffer.is_empty());
        assert!(buffer.slots().iter().all(Element::is_nil));
        assert!(buffer.dump().contains("start: 0"));
    }

    #[test]
    fn test_ring_trait_is_generic_over_engines() {
        fn fill<R: Ring<i64>>(ring: &mut R, count: i64) {
            for i in 0..count {
                ring.write(Element::new(i));
            }
        }

        let mut buffer: RingBuffer<i64> = RingBuffer::new(2);
        fill(&mut buffer, 5);
        assert_eq!(Ring::len(&buffer), 2);
        assert_eq!(Ring::read(&mut buffer), Element::new(3));
    }

    #[test]
    fn test_shared_push_and_snapshot() {
        let shared: SharedRingBuffer<i64> =
            SharedRingBuffer::with_config(RingConfig::new(10)).unwrap();

        for i in 0..5i64 {
            shared.write(i);
        }

        let snapshot = shared.snapshot();
        assert_eq!(values(snapshot), vec![0, 1, 2, 3, 4]);
        assert_eq!(shared.len(), 5);
        assert!((shared.fill_ratio() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_shared_producer_consumer() {
        let shared: Arc<SharedRingBuffer<i64>> =
            Arc::new(SharedRingBuffer::with_config(RingConfig::new(64)).unwrap());

        let producer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..1000i64 {
                    shared.write(i);
                }
            })
        };

        let mut received = Vec::new();
        loop {
            match shared.read().into_value() {
                Some(value) => received.push(value),
                None if producer.is_finished() => break,
                None => thread::yield_now(),
            }
        }
        producer.join().unwrap();
        received.extend(values(shared.with_lock(|buffer| buffer.drain().collect::<Vec<_>>())));

        // Whatever got through is strictly increasing and ends with the last write
        assert!(received.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(received.last(), Some(&999));
    }
}
