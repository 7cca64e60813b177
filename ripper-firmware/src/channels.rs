//! Inter-task communication channels
//!
//! Defines the static signals used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use ripper_core::control::TickReport;

/// Latest tick snapshot (updated by the control task, read by the status task)
///
/// A signal only holds the newest value, so a slow reader sees the latest
/// tick rather than a backlog.
pub static STATUS: Signal<CriticalSectionRawMutex, TickReport> = Signal::new();
