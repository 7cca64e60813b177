//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and the
//! hardware-specific output implementations.

pub mod actuator;

pub use actuator::{Actuators, DriveOutput, IndicatorOutput, OutputError};
