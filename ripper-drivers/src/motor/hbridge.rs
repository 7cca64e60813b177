//! H-bridge motor driver with one PWM channel per direction
//!
//! Each motor is driven by two PWM legs: one pushes it forward, the other in
//! reverse. A drive level of 0..=255 maps onto the leg's duty cycle as a
//! fraction of 255, so 0xFF is full duty regardless of the PWM counter top.
//!
//! The leg that goes to zero is always written before the leg that is
//! driven, so a direction change never has both legs on at once, not even
//! between the two writes.
//!
//! ```ignore
//! let mut spool = HBridgeMotor::new(pwm_fwd, pwm_rev);
//! spool.set_drive(RampState { forward: 0x40, reverse: 0 })?;
//! ```

use embedded_hal::pwm::SetDutyCycle;
use ripper_core::motion::{DriveLevel, RampState};
use ripper_core::traits::{DriveOutput, OutputError};

/// Full-scale drive level
const LEVEL_MAX: u16 = DriveLevel::MAX as u16;

/// Two-leg H-bridge motor output
pub struct HBridgeMotor<F, R> {
    forward: F,
    reverse: R,
    /// Last levels written successfully
    levels: RampState,
}

impl<F: SetDutyCycle, R: SetDutyCycle> HBridgeMotor<F, R> {
    /// Create the motor output
    ///
    /// Both legs are left as configured by the caller; call
    /// [`DriveOutput::set_drive`] with [`RampState::IDLE`] to force a stop.
    pub fn new(forward: F, reverse: R) -> Self {
        Self {
            forward,
            reverse,
            levels: RampState::IDLE,
        }
    }

    /// Last levels written
    pub fn levels(&self) -> RampState {
        self.levels
    }

    /// Release both PWM legs
    pub fn release(self) -> (F, R) {
        (self.forward, self.reverse)
    }

    fn write_forward(&mut self, level: DriveLevel) -> Result<(), OutputError> {
        self.forward
            .set_duty_cycle_fraction(level as u16, LEVEL_MAX)
            .map_err(|_| OutputError::Pwm)
    }

    fn write_reverse(&mut self, level: DriveLevel) -> Result<(), OutputError> {
        self.reverse
            .set_duty_cycle_fraction(level as u16, LEVEL_MAX)
            .map_err(|_| OutputError::Pwm)
    }
}

impl<F: SetDutyCycle, R: SetDutyCycle> DriveOutput for HBridgeMotor<F, R> {
    fn set_drive(&mut self, levels: RampState) -> Result<(), OutputError> {
        if levels.forward == 0 {
            self.write_forward(0)?;
            self.write_reverse(levels.reverse)?;
        } else {
            self.write_reverse(0)?;
            self.write_forward(levels.forward)?;
        }

        self.levels = levels;
        Ok(())
    }
}
