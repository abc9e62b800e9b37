//! Core application functionality
//!
//! This module contains the application plumbing:
//! - CLI parsing and resolution against settings
//! - The user settings file
//! - Process entry helpers and the command runner

pub mod cli;
pub mod config_file;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
