//! Per-tick control loop
//!
//! Ties the timing counters and the motor driver together. The loop is
//! driven by an external fixed-rate tick and never terminates.

pub mod controller;
pub mod report;

pub use controller::ControlLoop;
pub use report::{PhaseChange, TickReport};
