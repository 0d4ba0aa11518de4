//! # Tickmux Configuration
//!
//! Compile-time constants governing pool capacity and the tick time base.
//! All limits are fixed at compile time; nothing is allocated dynamically.

/// Number of timer slots in the global pool (`timers` module).
/// Each slot is one bit of the pool's `u32` free mask, so the value
/// is bounded to 32.
pub const MAX_TIMER_NUMBER: usize = 10;

/// Width of the free mask. Hard upper bound for any pool capacity.
pub const MAX_SLOTS_PER_POOL: usize = u32::BITS as usize;

const _: () = assert!(
    MAX_TIMER_NUMBER <= MAX_SLOTS_PER_POOL,
    "Maximum number of timers is restricted to 32."
);

/// Hardware tick frequency in Hz. One tick is the resolution of every
/// timer slot.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (default for STM32F4 at 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Convert a delay in milliseconds to a reload value in ticks.
///
/// Rounds up so a requested delay is never shortened. Saturates at
/// `u32::MAX`.
pub const fn ticks_from_millis(ms: u32) -> u32 {
    let ticks = (ms as u64 * TICK_HZ as u64 + 999) / 1000;
    if ticks > u32::MAX as u64 {
        u32::MAX
    } else {
        ticks as u32
    }
}
