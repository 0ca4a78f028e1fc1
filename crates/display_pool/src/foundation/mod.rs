//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Tick-driven time management
//! - Logging utilities

pub mod logging;
pub mod time;
