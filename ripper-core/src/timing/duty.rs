//! Tick-driven periodic counters
//!
//! Every counter advances exactly one step per control tick. There is no
//! catch-up: if ticks are delayed, the phases are delayed with them.

/// Two-phase periodic counter
///
/// Reports "active" for the first `on_ticks` ticks of every period and
/// "inactive" for the following `off_ticks` ticks, then starts over.
///
/// ```
/// use ripper_core::timing::DutyCycleCounter;
///
/// let mut pulse = DutyCycleCounter::new(2, 3);
/// let phases: [bool; 5] = core::array::from_fn(|_| pulse.tick());
/// assert_eq!(phases, [true, true, false, false, false]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycleCounter {
    on_ticks: u32,
    off_ticks: u32,
    /// Position of the next tick within the period
    position: u32,
}

impl DutyCycleCounter {
    /// Create a counter starting at the beginning of its active phase
    pub const fn new(on_ticks: u32, off_ticks: u32) -> Self {
        Self {
            on_ticks,
            off_ticks,
            position: 0,
        }
    }

    /// Consume one tick and return its phase
    pub fn tick(&mut self) -> bool {
        let active = self.is_active();

        self.position += 1;
        if self.position >= self.period() {
            self.position = 0;
        }

        active
    }

    /// Phase the next tick will report
    pub fn is_active(&self) -> bool {
        self.position < self.on_ticks
    }

    /// Position of the next tick within the period
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Full period length in ticks
    pub fn period(&self) -> u32 {
        self.on_ticks.saturating_add(self.off_ticks)
    }

    /// Restart from the beginning of the active phase
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

/// Toggling counter for the blinking indicator
///
/// Starts unlit and flips its state every `half_period` ticks, so one full
/// on/off blink takes `2 * half_period` ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkCounter {
    half_period: u32,
    count: u32,
    lit: bool,
}

impl BlinkCounter {
    /// Create an unlit blink counter
    pub const fn new(half_period: u32) -> Self {
        Self {
            half_period,
            count: 0,
            lit: false,
        }
    }

    /// Consume one tick
    ///
    /// Returns `true` if the indicator state flipped on this tick.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.half_period {
            self.count = 0;
            self.lit = !self.lit;
            return true;
        }
        false
    }

    /// Current indicator state
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
