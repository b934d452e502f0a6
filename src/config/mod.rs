//! Configuration management for asp-tier-sizer
//!
//! This module provides:
//! - .asp-tier-sizer.toml config file support (threshold, tier table, mongosh)
//! - Loading with validation and saving through the filesystem seam
//! - Resolution of effective settings with command-line overrides

pub mod file;
pub mod loader;
pub mod resolver;

pub use file::{ConfigFile, MongoshSettings, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use resolver::{Overrides, Settings, SettingsResolver};
