//! Presentation boundary
//!
//! This module contains the intents a renderer forwards to the core, their
//! handlers, and the view structures it renders.

pub mod confirm;
pub mod handlers;
pub mod intents;
pub mod responses;

// Re-export main types
pub use confirm::{Answer, Confirmation};
pub use handlers::handle_intent;
pub use intents::{parse_command, Command, Intent, ParseError};
pub use responses::{AppView, EditorView, Outcome, OutcomeStatus, RunView};
