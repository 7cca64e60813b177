//! Configuration loading
//!
//! The machine configuration is embedded into the firmware at build time
//! (see `machine.toml`) and loaded once at startup. A configuration that
//! fails to parse or validate is logged and replaced by the built-in
//! defaults, so the machine always comes up.

use defmt::*;
use embassy_rp::pwm::Config as PwmConfig;

use ripper_core::config::{parse_config, PwmCarrierConfig, RipperConfig};

/// PWM counter top; drive levels map 1:1 onto compare values
pub const PWM_TOP: u16 = 255;

/// Parse and validate the embedded configuration
///
/// Falls back to [`RipperConfig::DEFAULT`] on any problem.
pub fn load_config(source: &str) -> RipperConfig {
    let config = match parse_config(source) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse embedded config: {} (line {})", e, e.line());
            error!("Using built-in default configuration");
            return RipperConfig::DEFAULT;
        }
    };

    match config.validate() {
        Ok(()) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(errors) => {
            for e in errors.iter() {
                error!("Invalid config: {}", e);
            }
            error!("Using built-in default configuration");
            RipperConfig::DEFAULT
        }
    }
}

/// Log the active configuration
pub fn log_summary(config: &RipperConfig) {
    info!(
        "Timing: tick {}ms, indicator half-period {} ticks",
        config.timing.tick_ms, config.timing.indicator_half_period
    );
    info!(
        "Enable gate: on {} ticks, off {} ticks",
        config.enable.on_ticks, config.enable.off_ticks
    );
    info!(
        "Spool: speed {=u8:#x}, acceleration {=u8:#x}",
        config.spool.speed, config.spool.acceleration
    );
    info!(
        "Guide: speed {=u8:#x}, acceleration {=u8:#x}, pulse on {} / off {} ticks",
        config.guide.speed,
        config.guide.acceleration,
        config.guide_pulse.on_ticks,
        config.guide_pulse.off_ticks
    );
    info!(
        "PWM: divider {}, phase_correct={}",
        config.pwm.divider, config.pwm.phase_correct
    );
}

/// Build the PWM slice configuration for one motor leg
///
/// The slice starts with a zero duty cycle.
pub fn pwm_config(carrier: &PwmCarrierConfig) -> PwmConfig {
    let mut pwm_config = PwmConfig::default();
    pwm_config.top = PWM_TOP;
    pwm_config.divider = carrier.divider.into();
    pwm_config.phase_correct = carrier.phase_correct;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;
    pwm_config
}
