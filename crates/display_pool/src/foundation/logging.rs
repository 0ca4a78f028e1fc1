//! Logging utilities
//!
//! The crate only emits through the `log` facade; hosts that configure their
//! own backend can skip this module entirely.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring an already-installed logger
pub fn try_init() {
    let _ = env_logger::try_init();
}
