//! Configuration type definitions
//!
//! The machine configuration is fixed at build time and never changes while
//! the firmware runs. All durations are counted in control ticks except the
//! tick interval itself.

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Delay between two control ticks (ms)
    pub tick_ms: u32,
    /// Ticks the indicator spends lit, and then unlit
    pub indicator_half_period: u32,
}

/// Two-phase duty cycle, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyConfig {
    /// Length of the active phase
    pub on_ticks: u32,
    /// Length of the inactive phase
    pub off_ticks: u32,
}

impl DutyConfig {
    /// Full period length, or `None` if it does not fit in a `u32`
    pub fn period(&self) -> Option<u32> {
        self.on_ticks.checked_add(self.off_ticks)
    }
}

/// Speed settings of one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorConfig {
    /// Drive level when running (0-255)
    pub speed: u8,
    /// Maximum drive level rise per tick (0-255)
    pub acceleration: u8,
}

impl MotorConfig {
    /// Ticks needed to ramp from standstill to full speed
    ///
    /// Returns `None` if the speed can never be reached (zero acceleration
    /// with a nonzero speed).
    pub fn ticks_to_speed(&self) -> Option<u32> {
        if self.speed == 0 {
            return Some(0);
        }
        if self.acceleration == 0 {
            return None;
        }
        Some(self.speed.div_ceil(self.acceleration) as u32)
    }
}

/// PWM carrier settings for the motor outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmCarrierConfig {
    /// Integer clock divider applied to the PWM counter
    pub divider: u8,
    /// Count up and down instead of wrapping (halves the frequency)
    pub phase_correct: bool,
}

/// Motors of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorId {
    /// Continuously running spool motor
    Spool,
    /// Pulsed guide motor
    Guide,
}

/// Duty cycles of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleId {
    /// Long-period run/rest cycle gating both motors
    Enable,
    /// Short-period pulse of the guide motor
    GuidePulse,
}

/// Complete machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RipperConfig {
    /// Control loop timing
    pub timing: TimingConfig,
    /// Run/rest cycle of the whole machine
    pub enable: DutyConfig,
    /// Pulse cycle of the guide motor
    pub guide_pulse: DutyConfig,
    /// Spool motor speed
    pub spool: MotorConfig,
    /// Guide motor speed
    pub guide: MotorConfig,
    /// Motor PWM carrier
    pub pwm: PwmCarrierConfig,
}

impl RipperConfig {
    /// Reference configuration of the machine
    ///
    /// 100 ms ticks, 2 minutes running then 10 minutes resting, and a guide
    /// pulse of 1 s every 4 s.
    pub const DEFAULT: Self = Self {
        timing: TimingConfig {
            tick_ms: 100,
            indicator_half_period: 20,
        },
        enable: DutyConfig {
            on_ticks: 2 * 600,
            off_ticks: 10 * 600,
        },
        guide_pulse: DutyConfig {
            on_ticks: 10,
            off_ticks: 30,
        },
        spool: MotorConfig {
            speed: 0x40,
            acceleration: 0x40,
        },
        guide: MotorConfig {
            speed: 0x80,
            acceleration: 0x80,
        },
        pwm: PwmCarrierConfig {
            divider: 255,
            phase_correct: true,
        },
    };

    /// Get the settings of one motor
    pub fn motor(&self, id: MotorId) -> &MotorConfig {
        match id {
            MotorId::Spool => &self.spool,
            MotorId::Guide => &self.guide,
        }
    }

    /// Get the settings of one duty cycle
    pub fn cycle(&self, id: CycleId) -> &DutyConfig {
        match id {
            CycleId::Enable => &self.enable,
            CycleId::GuidePulse => &self.guide_pulse,
        }
    }
}

impl Default for RipperConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
