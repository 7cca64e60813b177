//! Periodic timing
//!
//! Counters that turn the fixed-rate control tick into the indicator blink,
//! the guide pulse and the enable gate.

pub mod duty;

pub use duty::{BlinkCounter, DutyCycleCounter};
