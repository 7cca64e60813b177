//! Spool and guide motor updates
//!
//! The driver owns the commanded drive levels of both motors and is the only
//! place they change. It is updated once per control tick:
//!
//! - the spool runs forward at its configured speed whenever the machine is
//!   enabled
//! - the guide runs forward only when the machine is enabled AND its own
//!   pulse cycle is in the active phase
//!
//! Neither motor is ever driven in reverse.

use super::ramp::{DriveLevel, RampController, RampState};
use crate::config::{DutyConfig, MotorConfig, RipperConfig};
use crate::timing::DutyCycleCounter;

/// One motor: its ramp, its running speed and its current levels
#[derive(Debug, Clone)]
struct Axis {
    ramp: RampController,
    speed: DriveLevel,
    state: RampState,
}

impl Axis {
    fn new(config: &MotorConfig) -> Self {
        Self {
            ramp: RampController::new(config.acceleration),
            speed: config.speed,
            state: RampState::IDLE,
        }
    }

    /// Ramp forward toward full speed or toward a stop
    fn drive(&mut self, run: bool) -> RampState {
        let forward_target = if run { self.speed } else { 0 };
        self.ramp.update_axis(&mut self.state, forward_target, 0);
        self.state
    }
}

/// Owner of both motors' drive levels
#[derive(Debug, Clone)]
pub struct MotorDriver {
    spool: Axis,
    guide: Axis,
    /// Guide pulse cycle, advanced on every guide update
    guide_pulse: DutyCycleCounter,
}

impl MotorDriver {
    /// Create a driver with both motors idle
    pub fn new(spool: &MotorConfig, guide: &MotorConfig, guide_pulse: &DutyConfig) -> Self {
        Self {
            spool: Axis::new(spool),
            guide: Axis::new(guide),
            guide_pulse: DutyCycleCounter::new(guide_pulse.on_ticks, guide_pulse.off_ticks),
        }
    }

    /// Create a driver from the machine configuration
    pub fn from_config(config: &RipperConfig) -> Self {
        Self::new(&config.spool, &config.guide, &config.guide_pulse)
    }

    /// Update the spool motor for one tick
    ///
    /// Returns the new spool levels.
    pub fn update_spool(&mut self, enabled: bool) -> RampState {
        self.spool.drive(enabled)
    }

    /// Update the guide motor for one tick
    ///
    /// Advances the guide pulse cycle and returns its phase for this tick.
    /// The guide only runs while both `enabled` and the pulse are active.
    pub fn update_guide(&mut self, enabled: bool) -> bool {
        let pulse_active = self.guide_pulse.tick();
        self.guide.drive(enabled && pulse_active);
        pulse_active
    }

    /// Current spool levels
    pub fn spool(&self) -> RampState {
        self.spool.state
    }

    /// Current guide levels
    pub fn guide(&self) -> RampState {
        self.guide.state
    }

    /// Guide pulse cycle
    pub fn guide_pulse(&self) -> &DutyCycleCounter {
        &self.guide_pulse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> MotorDriver {
        MotorDriver::from_config(&RipperConfig::DEFAULT)
    }

    #[test]
    fn test_starts_idle() {
        let driver = driver();
        assert!(driver.spool().is_idle());
        assert!(driver.guide().is_idle());
        assert_eq!(driver.guide_pulse().position(), 0);
    }

    #[test]
    fn test_spool_follows_enable() {
        let mut driver = driver();

        // 0x40 at 0x40 per tick: one call reaches full speed
        let state = driver.update_spool(true);
        assert_eq!(state, RampState { forward: 0x40, reverse: 0 });

        let state = driver.update_spool(false);
        assert_eq!(state, RampState::IDLE);
    }

    #[test]
    fn test_spool_ramps_up() {
        let spool = MotorConfig {
            speed: 0x40,
            acceleration: 0x18,
        };
        let guide = MotorConfig {
            speed: 0,
            acceleration: 0,
        };
        let pulse = DutyConfig {
            on_ticks: 1,
            off_ticks: 1,
        };
        let mut driver = MotorDriver::new(&spool, &guide, &pulse);

        assert_eq!(driver.update_spool(true).forward, 0x18);
        assert_eq!(driver.update_spool(true).forward, 0x30);
        assert_eq!(driver.update_spool(true).forward, 0x40);
        assert_eq!(driver.update_spool(true).forward, 0x40);

        // Stopping is immediate
        assert_eq!(driver.update_spool(false).forward, 0);
    }

    #[test]
    fn test_guide_pulse_cycle() {
        let mut driver = driver();

        // Ticks 1..=10: pulse active
        for tick in 1..=10 {
            assert!(driver.update_guide(true), "tick {}", tick);
            assert_eq!(driver.guide().forward, 0x80, "tick {}", tick);
        }

        // Ticks 11..=40: pulse inactive, one ramp-down call stops the guide
        for tick in 11..=40 {
            assert!(!driver.update_guide(true), "tick {}", tick);
            assert_eq!(driver.guide().forward, 0, "tick {}", tick);
        }

        // Tick 41: next pulse
        assert!(driver.update_guide(true));
        assert_eq!(driver.guide().forward, 0x80);
    }

    #[test]
    fn test_guide_needs_enable() {
        let mut driver = driver();

        // Pulse keeps cycling while disabled, but the guide never moves
        for _ in 0..40 {
            driver.update_guide(false);
            assert!(driver.guide().is_idle());
        }
        assert_eq!(driver.guide_pulse().position(), 0);
    }

    #[test]
    fn test_never_reverses() {
        let mut driver = driver();
        for tick in 0..200u32 {
            let enabled = tick % 7 < 4;
            driver.update_spool(enabled);
            driver.update_guide(enabled);
            assert_eq!(driver.spool().reverse, 0);
            assert_eq!(driver.guide().reverse, 0);
        }
    }
}
