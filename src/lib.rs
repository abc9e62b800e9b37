//! fontsmith
pub mod commands;
pub mod core;
pub mod data;
pub mod engine;
pub mod logging;
pub mod report;
