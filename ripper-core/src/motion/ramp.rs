//! Rate-limited drive level ramping
//!
//! Drive levels move toward their target by at most `max_step` per tick
//! when rising. Falling levels are not limited: a lower target is reached
//! in a single update.
//!
//! A motor axis has a forward and a reverse level. Only one of them may be
//! nonzero at a time, which [`RampController::update_axis`] guarantees by
//! only letting a direction move while the opposite one is at zero.

/// Commanded motor strength in one direction (0 = off, 255 = full)
pub type DriveLevel = u8;

/// Which way an axis is currently being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveDirection {
    /// Both levels are zero
    Idle,
    /// Only the forward level is nonzero
    Forward,
    /// Only the reverse level is nonzero
    Reverse,
}

/// Forward and reverse drive levels of one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampState {
    /// Forward drive level
    pub forward: DriveLevel,
    /// Reverse drive level
    pub reverse: DriveLevel,
}

impl RampState {
    /// Motor not driven in either direction
    pub const IDLE: Self = Self {
        forward: 0,
        reverse: 0,
    };

    /// Check if neither direction is driven
    pub fn is_idle(&self) -> bool {
        self.forward == 0 && self.reverse == 0
    }

    /// Get the direction currently being driven
    ///
    /// A state with both levels nonzero violates the axis invariant and is
    /// reported as `Idle`, since no ramp step will move it.
    pub fn direction(&self) -> DriveDirection {
        match (self.forward, self.reverse) {
            (0, 0) => DriveDirection::Idle,
            (_, 0) => DriveDirection::Forward,
            (0, _) => DriveDirection::Reverse,
            _ => DriveDirection::Idle,
        }
    }
}

/// Compute the next drive level when moving from `current` toward `target`
///
/// Rising deltas are clamped to `max_step`. Falling deltas are applied in
/// full, so the target is always reached immediately when it is below the
/// current level.
pub fn next_level(current: DriveLevel, target: DriveLevel, max_step: u8) -> DriveLevel {
    let mut delta = target as i16 - current as i16;
    if delta > max_step as i16 {
        delta = max_step as i16;
    }

    // current + delta lies between current and target, both in 0..=255
    (current as i16 + delta) as DriveLevel
}

/// Ramp controller for one motor axis
///
/// Holds the acceleration bound used for every update of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RampController {
    max_step: u8,
}

impl RampController {
    /// Create a ramp controller with the given maximum rise per tick
    pub const fn new(max_step: u8) -> Self {
        Self { max_step }
    }

    /// Compute the next level for one direction
    pub fn next_level(&self, current: DriveLevel, target: DriveLevel) -> DriveLevel {
        next_level(current, target, self.max_step)
    }

    /// Move an axis one step toward its forward and reverse targets
    ///
    /// Each direction only moves while the opposite level is zero. Both
    /// checks look at the levels from before this call, so a direction
    /// change has to bring the active level down to zero first and only
    /// starts the other direction on the following tick.
    ///
    /// From idle, a nonzero target in both directions would start both.
    /// Callers request one direction at a time.
    pub fn update_axis(
        &self,
        state: &mut RampState,
        forward_target: DriveLevel,
        reverse_target: DriveLevel,
    ) {
        let before = *state;

        if before.reverse == 0 {
            state.forward = self.next_level(before.forward, forward_target);
        }
        if before.forward == 0 {
            state.reverse = self.next_level(before.reverse, reverse_target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rise_is_clamped() {
        assert_eq!(next_level(0, 0x80, 0x20), 0x20);
        assert_eq!(next_level(0x70, 0x80, 0x20), 0x80);
        assert_eq!(next_level(0, 255, 255), 255);
    }

    #[test]
    fn test_fall_is_not_clamped() {
        // Deceleration is applied in a single step regardless of max_step
        assert_eq!(next_level(0x80, 0, 0x10), 0);
        assert_eq!(next_level(255, 3, 1), 3);
    }

    #[test]
    fn test_zero_step_holds_rising_level() {
        assert_eq!(next_level(10, 200, 0), 10);
        assert_eq!(next_level(200, 10, 0), 10);
    }

    #[test]
    fn test_at_target_is_stable() {
        assert_eq!(next_level(0x40, 0x40, 0x40), 0x40);
    }

    #[test]
    fn test_direction() {
        assert_eq!(RampState::IDLE.direction(), DriveDirection::Idle);
        assert!(RampState::IDLE.is_idle());

        let fwd = RampState {
            forward: 3,
            reverse: 0,
        };
        assert_eq!(fwd.direction(), DriveDirection::Forward);
        assert!(!fwd.is_idle());

        let rev = RampState {
            forward: 0,
            reverse: 9,
        };
        assert_eq!(rev.direction(), DriveDirection::Reverse);
    }

    #[test]
    fn test_reversal_passes_through_idle() {
        let ramp = RampController::new(0x40);
        let mut state = RampState::IDLE;

        ramp.update_axis(&mut state, 0x80, 0);
        assert_eq!(state, RampState { forward: 0x40, reverse: 0 });
        ramp.update_axis(&mut state, 0x80, 0);
        assert_eq!(state, RampState { forward: 0x80, reverse: 0 });

        // Requesting reverse while forward is still driven only brings
        // forward down; reverse starts on the next tick.
        ramp.update_axis(&mut state, 0, 0x80);
        assert_eq!(state, RampState::IDLE);
        ramp.update_axis(&mut state, 0, 0x80);
        assert_eq!(state, RampState { forward: 0, reverse: 0x40 });
    }

    #[test]
    fn test_opposite_target_ignored_while_driven() {
        let ramp = RampController::new(0x10);
        let mut state = RampState::IDLE;

        ramp.update_axis(&mut state, 0x10, 0);
        ramp.update_axis(&mut state, 0x10, 0x10);
        assert_eq!(state, RampState { forward: 0x10, reverse: 0 });
    }

    #[test]
    fn test_both_nonzero_is_stuck() {
        let ramp = RampController::new(0x10);
        let mut state = RampState {
            forward: 5,
            reverse: 5,
        };

        ramp.update_axis(&mut state, 0, 0);
        assert_eq!(state, RampState { forward: 5, reverse: 5 });
    }

    proptest! {
        #[test]
        fn prop_rising_step_is_bounded(current in any::<u8>(), target in any::<u8>(), max_step in any::<u8>()) {
            let next = next_level(current, target, max_step);
            if target >= current {
                prop_assert!(next >= current);
                prop_assert!(next <= target);
                prop_assert!(next - current <= max_step);
            } else {
                prop_assert_eq!(next, target);
            }
        }

        #[test]
        fn prop_reaches_target_in_ceil_steps(current in any::<u8>(), target in any::<u8>(), max_step in 1u8..=255) {
            let expected = if target > current {
                (target - current).div_ceil(max_step) as u32
            } else if target < current {
                1
            } else {
                0
            };

            let mut level = current;
            let mut calls = 0u32;
            while level != target {
                level = next_level(level, target, max_step);
                calls += 1;
                prop_assert!(calls <= 255);
            }
            prop_assert_eq!(calls, expected);
        }

        #[test]
        fn prop_single_direction_invariant(
            targets in proptest::collection::vec((any::<u8>(), any::<bool>()), 0..200),
            max_step in any::<u8>(),
        ) {
            let ramp = RampController::new(max_step);
            let mut state = RampState::IDLE;

            // Callers only ever request one direction at a time
            for (level, forward) in targets {
                let (fwd, rev) = if forward { (level, 0) } else { (0, level) };
                ramp.update_axis(&mut state, fwd, rev);
                prop_assert!(state.forward == 0 || state.reverse == 0);
            }
        }
    }
}
