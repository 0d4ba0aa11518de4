//! # Synchronization Primitives
//!
//! Interrupt-safe critical section abstractions. Any timer pool shared
//! between the tick interrupt and mainline code must be accessed within a
//! critical section to prevent torn updates of the free mask, the active
//! count or slot fields.
//!
//! On Cortex-M the `critical-section` implementation is provided by
//! `cortex-m` (`critical-section-single-core`): interrupts are disabled on
//! entry and restored on exit. Host builds supply their own implementation.

use core::cell::RefCell;

pub use critical_section::CriticalSection;
use critical_section::Mutex;

/// Execute a closure within a critical section.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|cs| {
///     // Access shared state safely
/// });
/// ```
///
/// Keep critical sections short: the tick interrupt is held off for the
/// whole closure.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(CriticalSection<'_>) -> R,
{
    critical_section::with(f)
}

/// A value shared between interrupt and mainline context.
///
/// Wraps `Mutex<RefCell<T>>` so every access goes through a critical
/// section and borrows never outlive it.
pub struct Shared<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> Shared<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access to the value.
    ///
    /// # Panics
    /// If called from inside another `lock` on the same value (for
    /// example from a callback running under the lock).
    pub fn lock<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
