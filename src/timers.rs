//! # Global Timers
//!
//! The process-wide timer pool and its public API.
//!
//! Firmware with a single tick source keeps one pool for its whole
//! lifetime. This module owns it and wraps every mainline operation in a
//! critical section, so application code can call these functions while
//! the tick interrupt is live.
//!
//! ## Wiring
//!
//! ```text
//! main()
//!   ├─► timers::append()      ← Register timers (×N)
//!   ├─► timers::set_value()   ← Rearm / start / stop
//!   └─► enable tick interrupt
//!
//! SysTick (every tick)
//!   └─► timers::execute()
//!         └─► expiry callbacks (may call back into this module)
//! ```

use crate::config::MAX_TIMER_NUMBER;
use crate::error::TimerError;
use crate::pool::TimerPool;
use crate::slot::TimerConfig;
use crate::sync::Shared;

// ---------------------------------------------------------------------------
// Global pool instance
// ---------------------------------------------------------------------------

static POOL: Shared<TimerPool<MAX_TIMER_NUMBER>> = Shared::new(TimerPool::new());

// ---------------------------------------------------------------------------
// Timer API
// ---------------------------------------------------------------------------

/// Register a timer in the lowest free slot.
///
/// # Returns
/// - `Ok(index)`: handle for the other functions in this module
/// - `Err(TimerError::Exhausted)`: all `MAX_TIMER_NUMBER` slots are in use
///
/// # Example
/// ```ignore
/// fn blink(_: TimerContext) { /* toggle LED */ }
///
/// let led = timers::append(TimerConfig::periodic(
///     Direction::Down,
///     config::ticks_from_millis(500),
///     Callback::new(blink),
/// ))?;
/// ```
pub fn append(config: TimerConfig) -> Result<usize, TimerError> {
    POOL.lock(|pool| pool.append(config))
}

/// Stop and free the timer at `index`.
pub fn destruct(index: usize) -> Result<(), TimerError> {
    POOL.lock(|pool| pool.destruct(index))
}

/// Start or stop the timer at `index`.
pub fn set_active(index: usize, active: bool) -> Result<(), TimerError> {
    POOL.lock(|pool| pool.set_active(index, active))
}

/// Rearm the timer at `index`. See [`TimerPool::set_value`] for the
/// direction-dependent semantics.
pub fn set_value(index: usize, active: bool, value: u32) -> Result<(), TimerError> {
    POOL.lock(|pool| pool.set_value(index, active, value))
}

/// Number of allocated timers currently counting.
pub fn active_count() -> usize {
    POOL.lock(|pool| pool.active_count())
}

/// Advance all timers by one tick.
///
/// Call exactly once per tick from the timer interrupt handler; never
/// re-enter. The pool is locked only while counting: each callback runs
/// after the lock is released, so callbacks may use the rest of this API.
pub fn execute() {
    let mut walk = POOL.lock(|pool| pool.begin_tick());
    while let Some(expired) = POOL.lock(|pool| pool.step(&mut walk)) {
        expired.fire();
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::{Callback, Direction, TimerContext};
    use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

    static FIRED: AtomicU32 = AtomicU32::new(0);
    static REARMED_AT: AtomicUsize = AtomicUsize::new(usize::MAX);

    /// Re-registers itself on every expiry, stopping after three runs.
    fn rearm(ctx: TimerContext) {
        if FIRED.fetch_add(1, Ordering::SeqCst) < 2 {
            let index = append(TimerConfig::one_shot(2, Callback::new(rearm))).unwrap();
            REARMED_AT.store(index, Ordering::SeqCst);
            assert_eq!(index, ctx.index);
        }
    }

    // The only test touching the global pool: keep it that way, tests run
    // in parallel.
    #[test]
    fn test_global_pool_lifecycle_with_reentrant_callback() {
        let keeper = append(TimerConfig {
            direction: Direction::Up,
            reload: 100,
            ..TimerConfig::DEFAULT
        })
        .unwrap();
        assert_eq!(active_count(), 0);

        let shot = append(TimerConfig::one_shot(2, Callback::new(rearm))).unwrap();
        assert_eq!(active_count(), 1);

        for _ in 0..6 {
            execute();
        }
        assert_eq!(FIRED.load(Ordering::SeqCst), 3);
        assert_eq!(REARMED_AT.load(Ordering::SeqCst), shot);
        assert_eq!(active_count(), 0);

        set_value(keeper, true, 1).unwrap();
        assert_eq!(active_count(), 1);
        set_active(keeper, false).unwrap();
        assert_eq!(active_count(), 0);

        destruct(keeper).unwrap();
        assert_eq!(
            destruct(keeper),
            Err(TimerError::InvalidIndex { index: keeper })
        );
        assert_eq!(
            set_active(shot, true),
            Err(TimerError::InvalidIndex { index: shot })
        );
    }
}
