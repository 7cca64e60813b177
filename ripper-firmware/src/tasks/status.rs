//! Status logging task
//!
//! Watches the tick snapshots published by the control task and logs phase
//! changes: the machine starting or resting, and guide pulses.

use defmt::*;

use crate::channels::STATUS;

/// Status task
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut last = STATUS.wait().await;
    info!(
        "Initial state (tick {}): enabled={}, guide pulse={}",
        last.tick,
        last.enabled,
        last.guide_pulsing()
    );

    loop {
        let report = STATUS.wait().await;
        let change = report.phase_change(&last);

        match change.enabled {
            Some(true) => info!("Machine running (tick {})", report.tick),
            Some(false) => info!("Machine resting (tick {})", report.tick),
            None => {}
        }

        match change.guide_pulse {
            Some(true) => debug!("Guide pulse start (tick {})", report.tick),
            Some(false) => debug!("Guide pulse end (tick {})", report.tick),
            None => {}
        }

        if report.indicator_toggled {
            trace!("Indicator lit={}", report.indicator_lit);
        }

        last = report;
    }
}
