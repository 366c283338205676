//! Utility Modules
//!
//! Common utilities used across the engine.

pub mod error;
pub mod paths;
