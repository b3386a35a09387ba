//! Utility functions module
//!
//! Process-level helpers for the driver binary.

pub mod input;
pub mod signals;

// Re-export main functions
pub use input::spawn_line_reader;
pub use signals::shutdown_signal;
