//! Board-agnostic control logic for the fabric ripper firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Drive level ramping with the single-direction motor invariant
//! - Periodic counters for the indicator, guide pulse and enable gate
//! - Spool and guide motor updates
//! - The per-tick control loop
//! - Actuator traits implemented by the drivers
//! - Configuration types, parsing and validation

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod motion;
pub mod timing;
pub mod traits;
