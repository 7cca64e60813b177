//! Motor output implementations
//!
//! Both ripper motors are brushed DC motors behind an H-bridge, driven by
//! one PWM channel per direction.

pub mod hbridge;

pub use hbridge::HBridgeMotor;
