//! # Tickmux Example Firmware
//!
//! Drives the global timer pool from SysTick and runs three software timers
//! off that single tick:
//!
//! | Timer | Direction | Mode | Period | Behavior |
//! |-------|-----------|------|--------|----------|
//! | `heartbeat` | Up | Periodic | 500 ms | Counts heartbeats |
//! | `startup_delay` | Down | One-shot | 100 ms | Releases the main loop, then frees its slot |
//! | `watchdog` | Down | Periodic | 250 ms | Fires only if the main loop stops kicking it |
//!
//! The main loop "kicks" the watchdog by rearming it with `set_value`, the
//! same pattern used for debouncing and polling timeouts.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;

use tickmux::config::{self, SYSTEM_CLOCK_HZ, TICK_HZ};
use tickmux::slot::{Callback, Direction, TimerConfig, TimerContext};
use tickmux::timers;

// ---------------------------------------------------------------------------
// Timer callbacks (run in SysTick context)
// ---------------------------------------------------------------------------

static HEARTBEATS: AtomicU32 = AtomicU32::new(0);
static STARTED: AtomicBool = AtomicBool::new(false);
static WATCHDOG_BITES: AtomicU32 = AtomicU32::new(0);

fn heartbeat(_: TimerContext) {
    HEARTBEATS.fetch_add(1, Ordering::Relaxed);
}

fn startup_delay(_: TimerContext) {
    STARTED.store(true, Ordering::Release);
}

fn watchdog(_: TimerContext) {
    WATCHDOG_BITES.fetch_add(1, Ordering::Relaxed);
}

// ---------------------------------------------------------------------------
// SysTick
// ---------------------------------------------------------------------------

/// Configure SysTick to fire at `TICK_HZ` using the processor clock.
fn configure_systick(syst: &mut cortex_m::peripheral::SYST) {
    let reload = SYSTEM_CLOCK_HZ / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

#[exception]
fn SysTick() {
    timers::execute();
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();

    timers::append(TimerConfig::periodic(
        Direction::Up,
        config::ticks_from_millis(500),
        Callback::new(heartbeat),
    ))
    .expect("Failed to create heartbeat timer");

    timers::append(TimerConfig::one_shot(
        config::ticks_from_millis(100),
        Callback::new(startup_delay),
    ))
    .expect("Failed to create startup delay");

    let watchdog_reload = config::ticks_from_millis(250);
    let watchdog_id = timers::append(TimerConfig {
        direction: Direction::Down,
        reload: watchdog_reload,
        callback: Some(Callback::new(watchdog)),
        ..TimerConfig::DEFAULT
    })
    .expect("Failed to create watchdog timer");

    // Start ticking
    configure_systick(&mut cp.SYST);

    while !STARTED.load(Ordering::Acquire) {
        cortex_m::asm::wfi();
    }

    loop {
        // Kick: restart the countdown and keep it running
        timers::set_value(watchdog_id, true, watchdog_reload)
            .expect("watchdog slot is never destructed");
        cortex_m::asm::wfi();
    }
}
