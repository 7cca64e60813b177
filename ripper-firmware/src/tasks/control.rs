//! Control task
//!
//! Owns the control loop and the machine outputs. Runs one control tick per
//! configured interval, writes the result to the hardware and publishes it
//! for the status task.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::Pwm;
use embassy_time::{Duration, Ticker};

use ripper_core::config::RipperConfig;
use ripper_core::control::ControlLoop;
use ripper_core::traits::Actuators;
use ripper_drivers::indicator::LedIndicator;
use ripper_drivers::motor::HBridgeMotor;

use crate::channels::STATUS;

/// One H-bridge motor on two PWM slices
pub type Motor = HBridgeMotor<Pwm<'static>, Pwm<'static>>;

/// All machine outputs on the RP2040
pub type Outputs = Actuators<Motor, Motor, LedIndicator<Output<'static>>>;

/// Control task
///
/// Never returns. Output write failures are logged and the loop keeps
/// ticking; the next tick rewrites every output.
#[embassy_executor::task]
pub async fn control_task(config: RipperConfig, mut outputs: Outputs) {
    info!("Control task started");

    let mut control = ControlLoop::new(&config);

    if let Err(e) = outputs.idle() {
        warn!("Failed to idle outputs: {}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(config.timing.tick_ms as u64));

    loop {
        ticker.next().await;

        let report = control.tick();

        if let Err(e) = outputs.apply(&report) {
            warn!("Output write failed on tick {}: {}", report.tick, e);
        }

        trace!(
            "Tick {}: spool {=u8:#x}/{=u8:#x}, guide {=u8:#x}/{=u8:#x}",
            report.tick,
            report.spool.forward,
            report.spool.reverse,
            report.guide.forward,
            report.guide.reverse
        );

        STATUS.signal(report);
    }
}
