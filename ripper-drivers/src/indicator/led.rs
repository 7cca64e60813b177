//! GPIO indicator LED
//!
//! Drives the operation indicator through an `embedded-hal` output pin,
//! directly or via a transistor. The pin can be active-high (default) or
//! active-low.

use embedded_hal::digital::{OutputPin, PinState};
use ripper_core::traits::{IndicatorOutput, OutputError};

/// Indicator LED on a GPIO pin
pub struct LedIndicator<P> {
    pin: P,
    /// If true, LED lit = pin LOW
    inverted: bool,
    /// Current logical state (true = lit)
    lit: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    /// Create a new indicator and turn it off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin driving the LED
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Result<Self, OutputError> {
        let mut led = Self {
            pin,
            inverted,
            lit: false,
        };
        led.set_lit(false)?;
        Ok(led)
    }

    /// Create an indicator lit by a HIGH pin
    pub fn new_active_high(pin: P) -> Result<Self, OutputError> {
        Self::new(pin, false)
    }

    /// Create an indicator lit by a LOW pin
    pub fn new_active_low(pin: P) -> Result<Self, OutputError> {
        Self::new(pin, true)
    }

    /// Current logical state
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Release the pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> IndicatorOutput for LedIndicator<P> {
    fn set_lit(&mut self, lit: bool) -> Result<(), OutputError> {
        self.pin
            .set_state(PinState::from(lit != self.inverted))
            .map_err(|_| OutputError::Pin)?;
        self.lit = lit;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    /// Pin that always fails
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_active_high_led() {
        let mut led = LedIndicator::new_active_high(MockPin { high: true }).unwrap();

        // Turned off on creation
        assert!(!led.is_lit());
        assert!(!led.pin.high);

        led.set_lit(true).unwrap();
        assert!(led.is_lit());
        assert!(led.pin.high);

        led.set_lit(false).unwrap();
        assert!(!led.pin.high);
    }

    #[test]
    fn test_active_low_led() {
        let mut led = LedIndicator::new_active_low(MockPin { high: false }).unwrap();

        // Off means pin high for active-low
        assert!(!led.is_lit());
        assert!(led.pin.high);

        led.set_lit(true).unwrap();
        assert!(led.is_lit());
        assert!(!led.release().high);
    }

    #[test]
    fn test_pin_failure() {
        assert_eq!(
            LedIndicator::new_active_high(BrokenPin).err(),
            Some(OutputError::Pin)
        );
    }
}
