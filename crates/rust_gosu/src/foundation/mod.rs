//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the library:
//! - String encoding conversions
//! - Flag-enum bitmask wrapper
//! - Millisecond clock used by the window loop
//! - Logging utilities

pub mod utility;
pub mod flags;
pub mod time;
pub mod logging;
