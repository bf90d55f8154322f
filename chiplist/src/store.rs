//! Bounded record store.
//!
//! [`RecordStore`] keeps up to `capacity` processor records in one
//! contiguous, fixed-size buffer. Records always occupy slots `[0, len)`
//! in insertion/positional order; positional inserts and removes shift the
//! tail of that range by one slot.
//!
//! # Positions
//!
//! Every public operation takes a 1-based position, translated internally
//! to a 0-based slot index. A position is valid when `1 <= position <= len`.
//!
//! # Example
//!
//! ```rust
//! use chiplist::record::Processor;
//! use chiplist::store::RecordStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let cpu = |name: &str| Processor {
//! #     name: name.to_string(), cores: 4, threads: 8, node_nm: 7,
//! #     base_clock_ghz: 3.0, boost_clock_ghz: 4.0, tdp_watts: 65,
//! #     integrated_graphics: false,
//! # };
//! let mut store = RecordStore::new(5)?;
//! store.append(cpu("A"))?;
//! store.append(cpu("C"))?;
//! store.insert_at(cpu("B"), 2)?;
//!
//! assert_eq!(store.get_at(2)?.name, "B");
//! assert_eq!(store.len(), 3);
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result, StoreError};
use crate::record::Processor;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 5;

/// A fixed-capacity, ordered buffer of processor records.
///
/// # Thread Safety
///
/// The store is designed for single-threaded access. It is owned by one
/// call path and never shared.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Backing buffer; its length is the capacity and never changes.
    /// Slots `[0, len)` are always `Some`, the rest always `None`.
    slots: Box<[Option<Processor>]>,
    /// Number of live records.
    len: usize,
}

impl RecordStore {
    /// Creates an empty store that can hold `capacity` records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            warn!(capacity, "rejected store creation");
            return Err(ConfigError::InvalidCapacity { capacity }.into());
        }

        info!(capacity, "created record store");
        Ok(Self {
            slots: empty_slots(capacity),
            len: 0,
        })
    }

    /// Creates an empty store with [`DEFAULT_CAPACITY`].
    pub fn with_default_capacity() -> Self {
        info!(capacity = DEFAULT_CAPACITY, "created record store");
        Self {
            slots: empty_slots(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Maximum number of records the store can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if another insert would be rejected.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends a record after the last one.
    ///
    /// # Errors
    ///
    /// - [`RecordError`](crate::error::RecordError) if the record is invalid
    /// - [`StoreError::CapacityExceeded`] if the store is full
    pub fn append(&mut self, record: Processor) -> Result<()> {
        checked(&record)?;
        self.ensure_room()?;

        self.slots[self.len] = Some(record);
        self.len += 1;

        debug!(position = self.len, len = self.len, "appended record");
        Ok(())
    }

    /// Inserts a record at `position`, shifting it and everything after it
    /// one place towards the end.
    ///
    /// Only occupied positions (`1..=len`) are accepted, so inserting into
    /// an empty store always fails; use [`append`](Self::append) or
    /// [`insert_front`](Self::insert_front) instead.
    ///
    /// # Errors
    ///
    /// - [`RecordError`](crate::error::RecordError) if the record is invalid
    /// - [`StoreError::CapacityExceeded`] if the store is full
    /// - [`StoreError::InvalidPosition`] if `position` is outside `1..=len`
    pub fn insert_at(&mut self, record: Processor, position: usize) -> Result<()> {
        checked(&record)?;
        self.ensure_room()?;
        let index = self.index_of(position)?;

        self.open_gap(index);
        self.slots[index] = Some(record);
        self.len += 1;

        debug!(position, len = self.len, "inserted record");
        Ok(())
    }

    /// Inserts a record at position 1, shifting all existing records.
    ///
    /// # Errors
    ///
    /// - [`RecordError`](crate::error::RecordError) if the record is invalid
    /// - [`StoreError::CapacityExceeded`] if the store is full
    pub fn insert_front(&mut self, record: Processor) -> Result<()> {
        checked(&record)?;
        self.ensure_room()?;

        self.open_gap(0);
        self.slots[0] = Some(record);
        self.len += 1;

        debug!(position = 1, len = self.len, "inserted record at front");
        Ok(())
    }

    /// Removes and returns the record at `position`, closing the gap.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPosition`] if `position` is outside `1..=len`.
    pub fn remove_at(&mut self, position: usize) -> Result<Processor> {
        let index = self.index_of(position)?;

        let removed = self.slots[index]
            .take()
            .ok_or_else(|| self.invalid_position(position))?;

        // The vacated slot travels to len - 1; nothing at or past len is read.
        self.slots[index..self.len].rotate_left(1);
        self.len -= 1;

        debug!(position, len = self.len, "removed record");
        Ok(removed)
    }

    /// Replaces the record at `position` and returns the previous one.
    ///
    /// # Errors
    ///
    /// - [`RecordError`](crate::error::RecordError) if the record is invalid
    /// - [`StoreError::InvalidPosition`] if `position` is outside `1..=len`
    pub fn update_at(&mut self, record: Processor, position: usize) -> Result<Processor> {
        checked(&record)?;
        let index = self.index_of(position)?;

        let previous = self.slots[index]
            .replace(record)
            .ok_or_else(|| self.invalid_position(position))?;

        debug!(position, "updated record");
        Ok(previous)
    }

    /// Returns the record at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPosition`] if `position` is outside `1..=len`.
    pub fn get_at(&self, position: usize) -> Result<&Processor> {
        let index = self.index_of(position)?;
        self.slots[index]
            .as_ref()
            .ok_or_else(|| self.invalid_position(position).into())
    }

    /// Iterates over `(position, record)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Processor)> {
        self.slots[..self.len]
            .iter()
            .flatten()
            .enumerate()
            .map(|(index, record)| (index + 1, record))
    }

    /// Releases the store and all of its records.
    pub fn destroy(self) {
        info!(len = self.len, capacity = self.capacity(), "destroyed record store");
    }

    /// Moves slots `[index, len)` one place right. Requires `len < capacity`.
    fn open_gap(&mut self, index: usize) {
        // slots[len] is vacant, so the rotation leaves the vacancy at index.
        self.slots[index..=self.len].rotate_right(1);
    }

    fn ensure_room(&self) -> Result<()> {
        if self.is_full() {
            warn!(capacity = self.capacity(), "rejected insert into full store");
            return Err(StoreError::CapacityExceeded {
                capacity: self.capacity(),
            }
            .into());
        }
        Ok(())
    }

    /// Translates a 1-based position into a slot index.
    fn index_of(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.len {
            warn!(position, len = self.len, "rejected invalid position");
            return Err(self.invalid_position(position).into());
        }
        Ok(position - 1)
    }

    fn invalid_position(&self, position: usize) -> StoreError {
        StoreError::InvalidPosition {
            position,
            len: self.len,
        }
    }
}

/// Validates a record before it reaches the buffer.
fn checked(record: &Processor) -> Result<()> {
    record.validate().inspect_err(|e| {
        warn!(error = %e, "rejected invalid record");
    })
}

fn empty_slots(capacity: usize) -> Box<[Option<Processor>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}
