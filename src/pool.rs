//! # Timer Pool
//!
//! Fixed-capacity pool of timer slots. Owns all slot storage, the free-slot
//! bitmask and the running count of active slots.
//!
//! ## Tick Algorithm
//!
//! At each hardware tick:
//! 1. **Snapshot** the active count as the walk budget
//! 2. **Walk** positions in ascending order, skipping free or inactive slots
//! 3. **Count** each live slot one step toward its terminal value
//! 4. **Expire**: reclaim one-shot slots, then run the slot's callback
//! 5. **Stop** once the budget is spent or every position was scanned
//!
//! The walk is a resumable cursor ([`TickWalk`]) so a caller holding the pool
//! behind a lock can release it before each callback. [`TimerPool::execute`]
//! is the same loop for a pool the caller owns outright.
//!
//! ## Allocation
//!
//! `append` always takes the lowest free index. Freed positions are reused
//! before higher ones; slots never move.

use log::{debug, trace, warn};

use crate::config::{MAX_SLOTS_PER_POOL, MAX_TIMER_NUMBER};
use crate::error::TimerError;
use crate::slot::{Callback, Direction, TimerConfig, TimerSlot};

// ---------------------------------------------------------------------------
// Tick walk
// ---------------------------------------------------------------------------

/// Cursor over one tick's walk of the pool.
///
/// Obtained from [`TimerPool::begin_tick`] and driven with
/// [`TimerPool::step`] until it returns `None`.
#[derive(Debug, Clone, Copy)]
pub struct TickWalk {
    position: usize,
    remaining: usize,
}

/// One expiry produced by the walk.
#[derive(Debug, Clone, Copy)]
pub struct Expired {
    pub index: usize,
    pub callback: Option<Callback>,
}

impl Expired {
    /// Run the bound callback, if any.
    #[inline]
    pub fn fire(&self) {
        if let Some(callback) = self.callback {
            callback.invoke(self.index);
        }
    }
}

// ---------------------------------------------------------------------------
// Pool struct
// ---------------------------------------------------------------------------

/// The pool state.
///
/// ## Design Notes
///
/// - Slots are stored inline in a fixed-size array (no heap)
/// - `free_mask` bit `i` set means slot `i` is unused
/// - `active_count` is maintained incrementally by the allocator and the
///   mutators, never by scanning
pub struct TimerPool<const N: usize = MAX_TIMER_NUMBER> {
    free_mask: u32,
    active_count: usize,
    slots: [TimerSlot; N],
}

impl<const N: usize> TimerPool<N> {
    const CAPACITY_FITS_MASK: () = assert!(
        N <= MAX_SLOTS_PER_POOL,
        "Maximum number of timers is restricted to 32."
    );

    /// Bits of `free_mask` that correspond to real slots.
    const SLOT_BITS: u32 = if N >= MAX_SLOTS_PER_POOL {
        u32::MAX
    } else {
        (1u32 << N) - 1
    };

    /// Create a pool with every slot free.
    pub const fn new() -> Self {
        let () = Self::CAPACITY_FITS_MASK;
        Self {
            free_mask: u32::MAX,
            active_count: 0,
            slots: [TimerSlot::EMPTY; N],
        }
    }

    // -----------------------------------------------------------------------
    // Allocator
    // -----------------------------------------------------------------------

    /// Register a timer in the lowest free slot.
    ///
    /// # Returns
    /// - `Ok(index)`: position of the new slot
    /// - `Err(TimerError::Exhausted)`: every slot is in use; nothing changed
    pub fn append(&mut self, config: TimerConfig) -> Result<usize, TimerError> {
        let free = self.free_mask & Self::SLOT_BITS;
        if free == 0 {
            warn!("timer pool exhausted: all {} slots in use", N);
            return Err(TimerError::Exhausted { capacity: N });
        }

        let index = free.trailing_zeros() as usize;
        self.slots[index] = TimerSlot::from_config(index, config);
        self.free_mask &= !(1 << index);

        if config.active {
            self.active_count += 1;
        }

        debug!(
            "timer {} appended: reload={} one_shot={} active={}",
            index, config.reload, config.one_shot, config.active
        );
        Ok(index)
    }

    /// Free the slot at `index`, stopping it first.
    pub fn destruct(&mut self, index: usize) -> Result<(), TimerError> {
        self.check_allocated(index)?;
        self.reclaim(index);
        debug!("timer {} destructed", index);
        Ok(())
    }

    /// Return a slot to the free state. `index` must be allocated.
    fn reclaim(&mut self, index: usize) {
        self.write_active(index, false);
        self.free_mask |= 1 << index;
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Start or stop the slot at `index`.
    pub fn set_active(&mut self, index: usize, active: bool) -> Result<(), TimerError> {
        self.check_allocated(index)?;
        self.write_active(index, active);
        Ok(())
    }

    /// Rearm the slot at `index` with `value`, then start or stop it.
    ///
    /// The effect depends on the slot's direction:
    /// - `Up`: `value` becomes the new ceiling and the count restarts at 0.
    /// - `Down`: the count jumps to `value`; the reset value is left as
    ///   configured, so after the next expiry the slot resumes its original
    ///   period. Until then the count may exceed the reset value.
    pub fn set_value(&mut self, index: usize, active: bool, value: u32) -> Result<(), TimerError> {
        self.check_allocated(index)?;

        let slot = &mut self.slots[index];
        match slot.direction {
            Direction::Up => {
                slot.target = value;
                slot.current = 0;
            }
            Direction::Down => slot.current = value,
        }

        self.write_active(index, active);
        Ok(())
    }

    /// Write the active flag and keep `active_count` in step with it.
    fn write_active(&mut self, index: usize, active: bool) {
        let was_active = self.slots[index].active;
        self.slots[index].active = active;

        match (was_active, active) {
            (false, true) => self.active_count += 1,
            (true, false) => self.active_count -= 1,
            _ => {}
        }
    }

    fn check_allocated(&self, index: usize) -> Result<(), TimerError> {
        if self.is_allocated(index) {
            Ok(())
        } else {
            warn!("rejected invalid timer index {}", index);
            Err(TimerError::InvalidIndex { index })
        }
    }

    // -----------------------------------------------------------------------
    // Tick executor
    // -----------------------------------------------------------------------

    /// Run one tick: advance every active slot and fire expiry callbacks.
    ///
    /// Must be called once per hardware tick and never re-entered.
    /// Callbacks run while the pool is borrowed; when they need to touch
    /// the pool, drive [`begin_tick`](Self::begin_tick) /
    /// [`step`](Self::step) directly instead (see the `timers` module).
    pub fn execute(&mut self) {
        let mut walk = self.begin_tick();
        while let Some(expired) = self.step(&mut walk) {
            expired.fire();
        }
    }

    /// Start a tick walk. The budget is the active count at this moment.
    pub fn begin_tick(&self) -> TickWalk {
        TickWalk {
            position: 0,
            remaining: self.active_count,
        }
    }

    /// Advance the walk up to and including the next expiring slot.
    ///
    /// One-shot slots are already free when their `Expired` is returned,
    /// so the callback may reuse the position. Returns `None` when the
    /// walk is finished.
    pub fn step(&mut self, walk: &mut TickWalk) -> Option<Expired> {
        while walk.remaining > 0 && walk.position < N {
            let index = walk.position;
            walk.position += 1;

            if !self.is_allocated(index) || !self.slots[index].active {
                continue;
            }
            walk.remaining -= 1;

            if !self.slots[index].count() {
                continue;
            }

            let slot = self.slots[index];
            if slot.one_shot {
                self.reclaim(index);
                trace!("one-shot timer {} expired and freed", index);
            }

            return Some(Expired {
                index,
                callback: slot.callback,
            });
        }
        None
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of allocated slots currently counting.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    #[inline]
    pub fn free_mask(&self) -> u32 {
        self.free_mask
    }

    #[inline]
    pub fn is_allocated(&self, index: usize) -> bool {
        index < N && self.free_mask & (1 << index) == 0
    }

    pub fn allocated_count(&self) -> usize {
        (!self.free_mask & Self::SLOT_BITS).count_ones() as usize
    }

    /// The slot at `index`, if it is allocated.
    pub fn slot(&self, index: usize) -> Option<&TimerSlot> {
        if self.is_allocated(index) {
            Some(&self.slots[index])
        } else {
            None
        }
    }
}

impl<const N: usize> Default for TimerPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
