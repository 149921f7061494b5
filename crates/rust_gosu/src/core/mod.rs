//! # Core Module
//!
//! Shared configuration types used by the window and graphics subsystems.

pub mod config;

// Re-export commonly used config types
pub use config::WindowConfig;
pub use crate::config::{Config, ConfigError};
