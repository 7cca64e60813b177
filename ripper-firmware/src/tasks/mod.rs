//! Embassy async tasks
//!
//! Each task runs independently and communicates via signals.

pub mod control;
pub mod status;

pub use control::{control_task, Outputs};
pub use status::status_task;
