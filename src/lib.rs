//! # Tickmux: Software Timer Multiplexer
//!
//! Turns one hardware periodic tick into up to 32 independent software
//! timer channels for ARM Cortex-M microcontrollers.
//!
//! ## Overview
//!
//! Each channel (slot) counts up or down at the tick rate and runs a
//! callback when it expires. Slots are cheap, non-preemptive and allocated
//! from a fixed pool, which makes them a fit for debouncing, polling
//! intervals and watchdog-style timeouts on targets with a single timer
//! interrupt.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │               Application / Tick ISR                    │
//! ├────────────────────────────────────────────────────────┤
//! │            Global Timer API (timers.rs)                 │
//! │   append() · destruct() · set_active() · set_value()   │
//! │                 execute()  (ISR only)                   │
//! ├──────────────────────────────┬─────────────────────────┤
//! │   Timer Pool (pool.rs)       │  Sync Primitives        │
//! │   ─ allocator (free mask)    │  sync.rs                │
//! │   ─ mutators (active count)  │  ─ critical_section     │
//! │   ─ tick walk / executor     │  ─ Shared<T>            │
//! ├──────────────────────────────┴─────────────────────────┤
//! │              Slot Model (slot.rs)                       │
//! │    TimerSlot · TimerConfig · Direction · Callback       │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Memory Model
//!
//! - **No heap**: all state is statically allocated
//! - **No `alloc`**: pure `core` only
//! - **Fixed-size slot array**: `[TimerSlot; N]`, `N ≤ 32`
//! - **Critical sections**: `critical-section` crate for shared pools

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod pool;
pub mod slot;
pub mod sync;
pub mod timers;

pub use error::TimerError;
pub use pool::TimerPool;
pub use slot::{Callback, Direction, TimerConfig, TimerContext};
