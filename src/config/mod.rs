//! Configuration module for the rollover ledger
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::RolloverPaths;
pub use settings::Settings;
