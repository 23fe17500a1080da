//! Configuration module for FAM
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - Policy settings persistence

pub mod paths;
pub mod settings;

pub use paths::FamPaths;
pub use settings::Settings;
