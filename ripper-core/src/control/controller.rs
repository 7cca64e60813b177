//! Control loop
//!
//! One tick does, in order:
//!
//! 1. advance the indicator blink counter
//! 2. advance the enable gate and derive `enabled`
//! 3. update the spool motor
//! 4. update the guide motor (which advances the guide pulse)
//!
//! The caller writes the returned [`TickReport`] to the hardware and waits
//! for the next tick.

use super::report::TickReport;
use crate::config::RipperConfig;
use crate::motion::MotorDriver;
use crate::timing::{BlinkCounter, DutyCycleCounter};

/// Top-level per-tick orchestrator
#[derive(Debug, Clone)]
pub struct ControlLoop {
    indicator: BlinkCounter,
    enable_gate: DutyCycleCounter,
    motors: MotorDriver,
    /// Ticks run so far (wraps)
    ticks: u32,
}

impl ControlLoop {
    /// Create the control loop with all counters at zero and both motors idle
    ///
    /// The configuration should have passed
    /// [`RipperConfig::validate`] first.
    pub fn new(config: &RipperConfig) -> Self {
        Self {
            indicator: BlinkCounter::new(config.timing.indicator_half_period),
            enable_gate: DutyCycleCounter::new(config.enable.on_ticks, config.enable.off_ticks),
            motors: MotorDriver::from_config(config),
            ticks: 0,
        }
    }

    /// Run one control tick
    pub fn tick(&mut self) -> TickReport {
        self.ticks = self.ticks.wrapping_add(1);

        let indicator_toggled = self.indicator.tick();

        let enabled = self.enable_gate.tick();

        let spool = self.motors.update_spool(enabled);
        let guide_pulse = self.motors.update_guide(enabled);

        TickReport {
            tick: self.ticks,
            indicator_lit: self.indicator.is_lit(),
            indicator_toggled,
            enabled,
            guide_pulse,
            spool,
            guide: self.motors.guide(),
        }
    }

    /// Current indicator state
    pub fn indicator_lit(&self) -> bool {
        self.indicator.is_lit()
    }

    /// Motor driver state
    pub fn motors(&self) -> &MotorDriver {
        &self.motors
    }
}
