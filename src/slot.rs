//! # Timer Slot
//!
//! Defines one software timer channel. A slot counts at the hardware tick
//! rate, either up toward its target or down toward zero, and reports an
//! expiry when it reaches the terminal value.
//!
//! ## Counting Model
//!
//! ```text
//!   Up:    0 → 1 → … → target ─┐ expiry, wrap to 0
//!          ▲                   │
//!          └───────────────────┘
//!
//!   Down:  target → … → 1 → 0 ─┐ expiry, wrap to target
//!          ▲                   │
//!          └───────────────────┘
//! ```
//!
//! A slot armed at its natural starting point with reload `R` expires every
//! `R` ticks. `R = 0` expires on every tick in both directions.

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Counting direction of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Count from 0 up to `target`, then wrap to 0.
    Up,
    /// Count from `target` (or the last `set_value`) down to 0, then wrap
    /// to `target`.
    Down,
}

// ---------------------------------------------------------------------------
// Callback
// ---------------------------------------------------------------------------

/// What an expiry callback receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerContext {
    /// Pool position of the expired slot.
    pub index: usize,
    /// Opaque value supplied with the callback.
    pub user_data: usize,
}

/// Expiry action bound to a slot.
///
/// A plain function pointer plus an opaque `user_data` word, so one handler
/// can serve several slots and tell them apart without a global lookup.
/// Runs in interrupt context when driven from the tick ISR: keep it short.
#[derive(Debug, Clone, Copy)]
pub struct Callback {
    func: fn(TimerContext),
    user_data: usize,
}

impl Callback {
    pub const fn new(func: fn(TimerContext)) -> Self {
        Self { func, user_data: 0 }
    }

    pub const fn with_user_data(func: fn(TimerContext), user_data: usize) -> Self {
        Self { func, user_data }
    }

    #[inline]
    pub const fn user_data(&self) -> usize {
        self.user_data
    }

    /// Invoke the handler for the slot at `index`.
    #[inline]
    pub fn invoke(&self, index: usize) {
        (self.func)(TimerContext {
            index,
            user_data: self.user_data,
        })
    }
}

// ---------------------------------------------------------------------------
// Slot configuration (supplied to `append`)
// ---------------------------------------------------------------------------

/// Caller-supplied configuration for a new slot.
///
/// `reload` is the up-counter ceiling or the down-counter start value.
/// The pool places the counter at its natural starting point on
/// allocation, so the first expiry comes `reload` ticks after the slot
/// becomes active.
#[derive(Debug, Clone, Copy)]
pub struct TimerConfig {
    /// Free the slot after its first expiry.
    pub one_shot: bool,
    /// Start counting immediately.
    pub active: bool,
    pub direction: Direction,
    pub reload: u32,
    pub callback: Option<Callback>,
}

impl TimerConfig {
    /// Inactive, periodic, down-counting, zero reload, no callback.
    pub const DEFAULT: Self = Self {
        one_shot: false,
        active: false,
        direction: Direction::Down,
        reload: 0,
        callback: None,
    };

    /// Active periodic timer that expires every `ticks` ticks.
    pub const fn periodic(direction: Direction, ticks: u32, callback: Callback) -> Self {
        Self {
            one_shot: false,
            active: true,
            direction,
            reload: ticks,
            callback: Some(callback),
        }
    }

    /// Active down-counter that fires once after `ticks` ticks and frees
    /// its slot.
    pub const fn one_shot(ticks: u32, callback: Callback) -> Self {
        Self {
            one_shot: true,
            active: true,
            direction: Direction::Down,
            reload: ticks,
            callback: Some(callback),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ---------------------------------------------------------------------------
// Timer slot
// ---------------------------------------------------------------------------

/// One timer channel as stored in the pool.
///
/// Fields are only meaningful while the pool marks the slot allocated.
#[derive(Debug, Clone, Copy)]
pub struct TimerSlot {
    pub(crate) one_shot: bool,
    pub(crate) active: bool,
    pub(crate) direction: Direction,
    /// Own position in the pool, stamped on allocation.
    pub(crate) index: usize,
    /// Up-counter ceiling / down-counter reset value.
    pub(crate) target: u32,
    pub(crate) current: u32,
    pub(crate) callback: Option<Callback>,
}

impl TimerSlot {
    /// An unallocated slot. Used to initialize the pool array.
    pub const EMPTY: Self = Self::from_config(0, TimerConfig::DEFAULT);

    /// Build a live slot at `index` with the counter at its starting point.
    pub const fn from_config(index: usize, config: TimerConfig) -> Self {
        let current = match config.direction {
            Direction::Up => 0,
            Direction::Down => config.reload,
        };
        Self {
            one_shot: config.one_shot,
            active: config.active,
            direction: config.direction,
            index,
            target: config.reload,
            current,
            callback: config.callback,
        }
    }

    /// Advance the counter by one tick.
    ///
    /// Returns `true` when the slot expired on this tick; the counter has
    /// already been wrapped for the next cycle.
    pub fn count(&mut self) -> bool {
        match self.direction {
            Direction::Up => {
                if self.current < self.target {
                    self.current += 1;
                }
                if self.current == self.target {
                    self.current = 0;
                    return true;
                }
            }
            Direction::Down => {
                if self.current > 0 {
                    self.current -= 1;
                }
                if self.current == 0 {
                    self.current = self.target;
                    return true;
                }
            }
        }
        false
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn target(&self) -> u32 {
        self.target
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn callback(&self) -> Option<Callback> {
        self.callback
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
