//! Motion control
//!
//! Rate-limited ramping of the motor drive levels and the per-motor update
//! rules of the machine.

pub mod driver;
pub mod ramp;

pub use driver::MotorDriver;
pub use ramp::{next_level, DriveDirection, DriveLevel, RampController, RampState};
