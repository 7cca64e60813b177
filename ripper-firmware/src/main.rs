//! Fabric ripper firmware
//!
//! Main firmware binary for the RP2040-based fabric ripper. The spool motor
//! pulls a strip of fabric through a cutter and winds it up while the guide
//! motor, pulsed, moves it across the spool. The whole machine runs in
//! periods and rests in between; the on-board LED blinks while powered.
//!
//! Pin assignments (Raspberry Pi Pico):
//!
//! | Function        | GPIO | PWM        |
//! |-----------------|------|------------|
//! | Spool forward   | 2    | slice 1 A  |
//! | Spool reverse   | 4    | slice 2 A  |
//! | Guide forward   | 6    | slice 3 A  |
//! | Guide reverse   | 8    | slice 4 A  |
//! | Indicator LED   | 25   |            |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::Pwm;
use {defmt_rtt as _, panic_probe as _};

use ripper_core::traits::Actuators;
use ripper_drivers::indicator::LedIndicator;
use ripper_drivers::motor::HBridgeMotor;

mod channels;
mod config;
mod tasks;

/// Embedded machine configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Fabric ripper firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let machine = config::load_config(EMBEDDED_CONFIG);
    config::log_summary(&machine);

    // One slice per H-bridge leg, channel A only
    let pwm_config = config::pwm_config(&machine.pwm);
    let spool = HBridgeMotor::new(
        Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, pwm_config.clone()),
        Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm_config.clone()),
    );
    let guide = HBridgeMotor::new(
        Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, pwm_config.clone()),
        Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, pwm_config),
    );
    info!("Motor PWM initialized");

    // On-board LED, active high
    let indicator = unwrap!(LedIndicator::new_active_high(Output::new(
        p.PIN_25,
        Level::Low
    )));

    let outputs = Actuators::new(spool, guide, indicator);

    // Spawn tasks
    spawner.spawn(tasks::status_task()).unwrap();
    spawner.spawn(tasks::control_task(machine, outputs)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
