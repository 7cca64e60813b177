//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the output traits
//! defined in ripper-core, written against `embedded-hal` so any HAL with
//! PWM and GPIO support can drive the machine:
//!
//! - Motor outputs (two-leg PWM H-bridge)
//! - Indicator outputs (GPIO LED)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod indicator;
pub mod motor;
