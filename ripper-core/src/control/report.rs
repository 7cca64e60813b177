//! Snapshot of one control tick

use crate::motion::RampState;

/// Outputs computed by one [`ControlLoop::tick`](super::ControlLoop::tick)
///
/// This is everything the actuator layer needs to write, plus the phase
/// signals that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Number of this tick, starting at 1 (wraps)
    pub tick: u32,
    /// Indicator state after this tick
    pub indicator_lit: bool,
    /// Indicator flipped on this tick
    pub indicator_toggled: bool,
    /// Enable gate phase of this tick
    pub enabled: bool,
    /// Guide pulse phase of this tick
    pub guide_pulse: bool,
    /// Spool levels after this tick
    pub spool: RampState,
    /// Guide levels after this tick
    pub guide: RampState,
}

impl TickReport {
    /// Check if either motor is being driven
    pub fn motors_running(&self) -> bool {
        !self.spool.is_idle() || !self.guide.is_idle()
    }

    /// Check if the guide pulse is driving the guide on this tick
    pub fn guide_pulsing(&self) -> bool {
        self.enabled && self.guide_pulse
    }

    /// Phase changes since `previous`
    pub fn phase_change(&self, previous: &TickReport) -> PhaseChange {
        PhaseChange {
            enabled: (self.enabled != previous.enabled).then_some(self.enabled),
            guide_pulse: (self.guide_pulsing() != previous.guide_pulsing())
                .then_some(self.guide_pulsing()),
        }
    }
}

/// Phase changes between two consecutive ticks
///
/// Each field holds the new phase if it changed, `None` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseChange {
    /// Enable gate
    pub enabled: Option<bool>,
    /// Guide pulse, only counted while the machine is enabled
    pub guide_pulse: Option<bool>,
}
