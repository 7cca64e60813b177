//! Actuator traits
//!
//! The control loop never touches hardware. Each tick's [`TickReport`] is
//! written through these traits by whatever owns the pins.

use crate::control::TickReport;
use crate::motion::RampState;

/// Errors that can occur when writing an output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// PWM channel rejected the duty cycle
    Pwm,
    /// GPIO pin could not be driven
    Pin,
}

/// Trait for a bidirectional motor output
///
/// Implementations translate the forward and reverse drive levels into
/// hardware duty cycles (two PWM legs of an H-bridge, typically).
pub trait DriveOutput {
    /// Apply the drive levels of one motor
    ///
    /// At most one of `levels.forward` and `levels.reverse` is nonzero.
    fn set_drive(&mut self, levels: RampState) -> Result<(), OutputError>;
}

/// Trait for the operation indicator
pub trait IndicatorOutput {
    /// Turn the indicator on or off
    fn set_lit(&mut self, lit: bool) -> Result<(), OutputError>;
}

/// The machine's outputs
///
/// Bundles both motors and the indicator so one call writes a whole tick.
pub struct Actuators<S, G, L> {
    /// Spool motor output
    pub spool: S,
    /// Guide motor output
    pub guide: G,
    /// Indicator output
    pub indicator: L,
}

impl<S: DriveOutput, G: DriveOutput, L: IndicatorOutput> Actuators<S, G, L> {
    /// Bundle the outputs
    pub fn new(spool: S, guide: G, indicator: L) -> Self {
        Self {
            spool,
            guide,
            indicator,
        }
    }

    /// Write one tick's outputs
    ///
    /// Every output is written even if an earlier one fails; the first
    /// failure is returned.
    pub fn apply(&mut self, report: &TickReport) -> Result<(), OutputError> {
        let spool = self.spool.set_drive(report.spool);
        let guide = self.guide.set_drive(report.guide);
        let indicator = self.indicator.set_lit(report.indicator_lit);

        spool.and(guide).and(indicator)
    }

    /// Put both motors at standstill and turn the indicator off
    pub fn idle(&mut self) -> Result<(), OutputError> {
        let spool = self.spool.set_drive(RampState::IDLE);
        let guide = self.guide.set_drive(RampState::IDLE);
        let indicator = self.indicator.set_lit(false);

        spool.and(guide).and(indicator)
    }
}
