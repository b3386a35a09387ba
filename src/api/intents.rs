//! Intents emitted by the presentation layer, and the driver's text commands

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Field;

/// A user intent forwarded to the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Intent {
    /// Open the add modal
    Add,
    /// Open the edit modal for a record
    Edit { id: u64 },
    /// Remove a record, subject to confirmation
    Delete { id: u64 },
    SetName { value: String },
    SetSeconds { value: String },
    /// A field lost focus
    Touch { field: Field },
    Save,
    CloseModal,
    OpenRun { id: u64 },
    Start,
    Stop,
    CloseRun,
}

impl Intent {
    /// Short label used for last-action tracking
    pub fn action_name(&self) -> &'static str {
        match self {
            Intent::Add => "add",
            Intent::Edit { .. } => "edit",
            Intent::Delete { .. } => "delete",
            Intent::SetName { .. } => "set-name",
            Intent::SetSeconds { .. } => "set-seconds",
            Intent::Touch { .. } => "touch",
            Intent::Save => "save",
            Intent::CloseModal => "close-modal",
            Intent::OpenRun { .. } => "open-run",
            Intent::Start => "start",
            Intent::Stop => "stop",
            Intent::CloseRun => "close-run",
        }
    }
}

/// One line typed into the terminal driver
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Intent(Intent),
    /// Answer to a pending delete confirmation
    Answer(bool),
    /// Print the current view
    View,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("'{0}' needs an exercise id")]
    MissingId(String),

    #[error("Invalid exercise id '{0}'")]
    InvalidId(String),

    #[error("Unknown field '{0}', expected name or seconds")]
    UnknownField(String),

    #[error("Invalid JSON intent: {0}")]
    Json(String),
}

/// Help text listing the driver commands
pub const COMMAND_HELP: &str = "\
Commands:
  view | list          print the current state
  add                  open the add modal
  edit <id>            open the edit modal
  name <text>          set the draft name
  seconds <text>       set the draft seconds
  blur name|seconds    mark a field as touched
  save                 save the draft
  cancel               close the modal without saving
  delete <id>          delete an exercise (asks for yes/no)
  run <id>             open the run modal
  start | stop | close control the run
  {\"type\": ...}        any intent as JSON
  quit                 exit";

/// Parse one driver line.
///
/// Lines starting with `{` are read as a JSON intent.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Command::Intent)
            .map_err(|e| ParseError::Json(e.to_string()));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "view" | "list" => Command::View,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "yes" | "y" => Command::Answer(true),
        "no" | "n" => Command::Answer(false),
        "add" => Command::Intent(Intent::Add),
        "edit" => Command::Intent(Intent::Edit { id: parse_id(word, rest)? }),
        "delete" | "rm" => Command::Intent(Intent::Delete { id: parse_id(word, rest)? }),
        "run" => Command::Intent(Intent::OpenRun { id: parse_id(word, rest)? }),
        "name" => Command::Intent(Intent::SetName { value: rest.to_string() }),
        "seconds" | "secs" => Command::Intent(Intent::SetSeconds { value: rest.to_string() }),
        "blur" => Command::Intent(Intent::Touch { field: parse_field(rest)? }),
        "save" => Command::Intent(Intent::Save),
        "cancel" => Command::Intent(Intent::CloseModal),
        "start" => Command::Intent(Intent::Start),
        "stop" => Command::Intent(Intent::Stop),
        "close" => Command::Intent(Intent::CloseRun),
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_id(word: &str, rest: &str) -> Result<u64, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingId(word.to_string()));
    }
    rest.parse()
        .map_err(|_| ParseError::InvalidId(rest.to_string()))
}

fn parse_field(rest: &str) -> Result<Field, ParseError> {
    match rest.to_lowercase().as_str() {
        "name" => Ok(Field::Name),
        "seconds" | "secs" => Ok(Field::Seconds),
        other => Err(ParseError::UnknownField(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("add").unwrap(), Command::Intent(Intent::Add));
        assert_eq!(parse_command("  START ").unwrap(), Command::Intent(Intent::Start));
        assert_eq!(parse_command("list").unwrap(), Command::View);
        assert_eq!(parse_command("y").unwrap(), Command::Answer(true));
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(
            parse_command("edit 3").unwrap(),
            Command::Intent(Intent::Edit { id: 3 })
        );
        assert_eq!(parse_command("run"), Err(ParseError::MissingId("run".into())));
        assert_eq!(
            parse_command("delete x1"),
            Err(ParseError::InvalidId("x1".into()))
        );
        assert_eq!(parse_command("delete -1"), Err(ParseError::InvalidId("-1".into())));
    }

    #[test]
    fn test_parse_field_values_keep_inner_spaces() {
        assert_eq!(
            parse_command("name  Jumping jacks ").unwrap(),
            Command::Intent(Intent::SetName {
                value: "Jumping jacks".into()
            })
        );
        assert_eq!(
            parse_command("seconds").unwrap(),
            Command::Intent(Intent::SetSeconds { value: String::new() })
        );
        assert_eq!(
            parse_command("blur seconds").unwrap(),
            Command::Intent(Intent::Touch { field: Field::Seconds })
        );
        assert!(matches!(parse_command("blur foo"), Err(ParseError::UnknownField(_))));
    }

    #[test]
    fn test_parse_json_intent() {
        assert_eq!(
            parse_command(r#"{"type": "open-run", "id": 2}"#).unwrap(),
            Command::Intent(Intent::OpenRun { id: 2 })
        );
        assert_eq!(
            parse_command(r#"{"type": "touch", "field": "name"}"#).unwrap(),
            Command::Intent(Intent::Touch { field: Field::Name })
        );
        assert!(matches!(parse_command(r#"{"type": "fly"}"#), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(parse_command(""), Err(ParseError::Empty));
        assert_eq!(parse_command("jump"), Err(ParseError::Unknown("jump".into())));
    }
}
