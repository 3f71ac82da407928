//! Nullable infrastructure for deterministic testing.
//!
//! The registry never reads a clock itself — every operation takes `now` from
//! the caller — so tests drive the voting and reveal windows by advancing a
//! [`NullClock`] and passing its time in.

pub mod clock;

pub use clock::NullClock;
