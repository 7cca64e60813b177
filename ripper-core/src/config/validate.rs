//! Startup configuration checks
//!
//! The control loop itself has no error path, so every configuration that
//! would make a counter or ramp misbehave is rejected here, once, before the
//! loop is built.

use heapless::Vec;

use super::types::{CycleId, MotorId, RipperConfig};

/// Upper bound on the number of problems a single configuration can have
pub const MAX_CONFIG_ERRORS: usize = 8;

/// Most problems `validate` can report at once: two timing checks, one per
/// duty cycle, one per motor and the PWM divider. Keep in sync when adding
/// a check.
const MAX_REPORTED: usize = 2 + 2 + 2 + 1;

const _: () = assert!(MAX_REPORTED <= MAX_CONFIG_ERRORS);

/// A single configuration problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick interval is zero
    ZeroTickInterval,
    /// Indicator half-period is zero
    ZeroIndicatorPeriod,
    /// Active phase of a duty cycle is zero
    ZeroOnPeriod(CycleId),
    /// Duty cycle period does not fit in a tick counter
    PeriodOverflow(CycleId),
    /// Motor has a nonzero speed but no acceleration
    ZeroAcceleration(MotorId),
    /// Motor cannot reach its speed within its active phase
    UnreachableSpeed {
        /// Affected motor
        motor: MotorId,
        /// Ticks the ramp needs
        ramp_ticks: u32,
        /// Ticks the motor is allowed to run
        on_ticks: u32,
    },
    /// PWM clock divider is zero
    ZeroPwmDivider,
}

/// All problems found in one configuration
pub type ValidationErrors = Vec<ConfigError, MAX_CONFIG_ERRORS>;

impl RipperConfig {
    /// Check the configuration for values the control loop cannot run with
    ///
    /// Returns every problem found, not just the first.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.timing.tick_ms == 0 {
            let _ = errors.push(ConfigError::ZeroTickInterval);
        }
        if self.timing.indicator_half_period == 0 {
            let _ = errors.push(ConfigError::ZeroIndicatorPeriod);
        }

        for cycle in [CycleId::Enable, CycleId::GuidePulse] {
            let duty = self.cycle(cycle);
            if duty.on_ticks == 0 {
                let _ = errors.push(ConfigError::ZeroOnPeriod(cycle));
            } else if duty.period().is_none() {
                let _ = errors.push(ConfigError::PeriodOverflow(cycle));
            }
        }

        // The spool may run for the whole enable phase, the guide only for
        // one pulse
        let run_windows = [
            (MotorId::Spool, self.enable.on_ticks),
            (MotorId::Guide, self.guide_pulse.on_ticks),
        ];
        for (motor, on_ticks) in run_windows {
            match self.motor(motor).ticks_to_speed() {
                None => {
                    let _ = errors.push(ConfigError::ZeroAcceleration(motor));
                }
                Some(ramp_ticks) if on_ticks > 0 && ramp_ticks > on_ticks => {
                    let _ = errors.push(ConfigError::UnreachableSpeed {
                        motor,
                        ramp_ticks,
                        on_ticks,
                    });
                }
                Some(_) => {}
            }
        }

        if self.pwm.divider == 0 {
            let _ = errors.push(ConfigError::ZeroPwmDivider);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
