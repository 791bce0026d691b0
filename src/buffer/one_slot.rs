//! # One-Slot-Open Ring Buffer
//!
//! A fixed-size circular buffer that overwrites old elements when full.
//!
//! ## Plain English
//!
//! Picture a circular track with `capacity + 1` numbered parking spots.
//! One spot is always left empty, right in front of the oldest car.
//! If the read and write markers sit on the same spot, the track is empty;
//! if the write marker is one spot behind the read marker, it is full.
//! When a new car arrives at a full track, the oldest car is towed first.

use std::fmt::{self, Write as _};
use std::mem;

use log::{debug, trace};

use super::Ring;
use crate::config::RingConfig;
use crate::element::Element;
use crate::error::{RingBufferError, RingResult};

/// The one-slot-open ring buffer engine.
///
/// ## Properties
/// - Fixed capacity (doesn't grow)
/// - O(1) read and write
/// - Discards the oldest unread element when written while full
/// - No element counter: fullness comes from the two cursors alone
///
/// Not synchronized. Wrap it in [`SharedRingBuffer`](super::SharedRingBuffer)
/// when a producer and a consumer live on different threads.
#[derive(Debug, Clone)]
pub struct OneSlotRing<T> {
    /// Backing storage, `capacity + 1` long
    slots: Vec<Element<T>>,

    /// Usable size
    capacity: usize,

    /// Next slot to read
    start: usize,

    /// Next slot to write
    end: usize,

    /// Overwrite vacated slots with nil
    clear_on_vacate: bool,
}

impl<T> OneSlotRing<T> {
    /// Creates a buffer from validated options.
    ///
    /// The `kind` field is not consulted; see
    /// [`RingBuffer::with_config`](super::RingBuffer::with_config).
    pub fn with_config(config: &RingConfig) -> RingResult<Self> {
        if let Some(error) = config.validate().into_iter().next() {
            return Err(error.into());
        }

        debug!(
            "Creating one-slot ring buffer: capacity {}, {} slots, clear on vacate {}",
            config.capacity,
            config.slot_count(),
            config.clear_on_vacate
        );

        let mut ring = Self {
            slots: Vec::new(),
            capacity: config.capacity,
            start: 0,
            end: 0,
            clear_on_vacate: config.clear_on_vacate,
        };
        ring.reset_slots();
        Ok(ring)
    }

    /// Returns the maximum number of unread elements.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no unread element is stored.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if the next write will evict the oldest element.
    pub fn is_full(&self) -> bool {
        self.start == self.next(self.end)
    }

    /// Returns the number of unread elements.
    pub fn len(&self) -> usize {
        let slots = self.slots.len();
        (self.end + slots - self.start) % slots
    }

    /// Returns whether vacated slots are wiped.
    pub fn clear_on_vacate(&self) -> bool {
        self.clear_on_vacate
    }

    /// Returns the read cursor.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the write cursor.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the raw backing storage, stale slots included.
    pub fn slots(&self) -> &[Element<T>] {
        &self.slots
    }

    /// Steps a cursor forward, wrapping from `capacity` back to 0.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than `capacity`. That only happens when
    /// a cursor has been corrupted.
    pub fn next(&self, index: usize) -> usize {
        match self.checked_next(index) {
            Ok(next) => next,
            Err(error) => panic!("{}", error),
        }
    }

    /// Like [`next`](Self::next), but reports a bad index as an error.
    pub fn checked_next(&self, index: usize) -> RingResult<usize> {
        if index > self.capacity {
            return Err(RingBufferError::IndexOutOfBounds {
                index,
                max: self.capacity,
            });
        }

        if index == self.capacity {
            Ok(0)
        } else {
            Ok(index + 1)
        }
    }

    /// Writes an element, evicting the oldest one first if full.
    pub fn write(&mut self, element: impl Into<Element<T>>) {
        // Evict using the state from before this write. Deciding after the
        // insert would hand the oldest element back at capacity 1.
        if self.is_full() {
            trace!("Buffer full, evicting slot {}", self.start);
            if self.clear_on_vacate {
                self.slots[self.start] = Element::Nil;
            }
            self.start = self.next(self.start);
        }

        self.slots[self.end] = element.into();
        self.end = self.next(self.end);
    }

    /// Returns the oldest unread element without removing it.
    pub fn peek_oldest(&self) -> Option<&Element<T>> {
        self.get(0)
    }

    /// Returns the newest unread element without removing it.
    pub fn peek_newest(&self) -> Option<&Element<T>> {
        self.len().checked_sub(1).and_then(|offset| self.get(offset))
    }

    /// Returns the unread element `offset` places after the oldest.
    pub fn get(&self, offset: usize) -> Option<&Element<T>> {
        if offset >= self.len() {
            return None;
        }
        Some(&self.slots[(self.start + offset) % self.slots.len()])
    }

    /// Returns an iterator over unread elements (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &Element<T>> {
        (0..self.len()).filter_map(move |offset| self.get(offset))
    }

    /// Discards everything and puts both cursors back at 0.
    pub fn clear(&mut self) {
        debug!("Clearing ring buffer ({} unread dropped)", self.len());
        self.reset_slots();
        self.start = 0;
        self.end = 0;
    }

    fn reset_slots(&mut self) {
        self.slots.clear();
        self.slots.resize_with(self.capacity + 1, Element::nil);
    }
}

impl<T: Clone> OneSlotRing<T> {
    /// Removes and returns the oldest unread element.
    ///
    /// An empty buffer returns [`Element::Nil`] and stays as it is. With
    /// clear-on-vacate off, the value is cloned out and the stale copy
    /// stays in its slot until overwritten.
    pub fn read(&mut self) -> Element<T> {
        if self.is_empty() {
            return Element::Nil;
        }

        let element = if self.clear_on_vacate {
            mem::replace(&mut self.slots[self.start], Element::Nil)
        } else {
            self.slots[self.start].clone()
        };
        self.start = self.next(self.start);
        element
    }
}

impl<T: fmt::Debug> OneSlotRing<T> {
    /// Renders the cursors and every slot for debugging.
    ///
    /// ```text
    /// full: false
    /// empty: false
    /// start: 0
    /// end: 2
    /// [0]1 [1]2 [2]nil
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "full: {}", self.is_full());
        let _ = writeln!(out, "empty: {}", self.is_empty());
        let _ = writeln!(out, "start: {}", self.start);
        let _ = writeln!(out, "end: {}", self.end);

        let cells: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, element)| format!("[{}]{}", index, element))
            .collect();
        out.push_str(&cells.join(" "));
        out
    }
}

impl<T: Clone> Ring<T> for OneSlotRing<T> {
    fn capacity(&self) -> usize {
        OneSlotRing::capacity(self)
    }

    fn len(&self) -> usize {
        OneSlotRing::len(self)
    }

    fn is_empty(&self) -> bool {
        OneSlotRing::is_empty(self)
    }

    fn is_full(&self) -> bool {
        OneSlotRing::is_full(self)
    }

    fn write(&mut self, element: Element<T>) {
        OneSlotRing::write(self, element)
    }

    fn read(&mut self) -> Element<T> {
        OneSlotRing::read(self)
    }

    fn clear(&mut self) {
        OneSlotRing::clear(self)
    }
}

// ============================================
// TESTS
// ============================================
