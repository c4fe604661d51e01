use edtrellis_core::{CategoricalField, FilterField, Msg, TextField};
use thiserror::Error;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Back,
    Forward,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("unknown filter {0:?}; expected search, location, category or type")]
    UnknownFilter(String),
}

pub const HELP: &str = "\
commands:
  type-search <text>     edit the search box (not applied until submit)
  type-location <text>   edit the location box (not applied until submit)
  submit                 apply the search and location boxes
  category <value|->     pick a category, `-` for any
  type <value|->         pick a job type, `-` for any
  clear <filter>         remove one filter (search, location, category, type)
  clear-all              remove every filter
  back | forward         move through history
  dismiss                hide the error banner
  refresh-session        re-read the logged-in user
  sign-out               forget the logged-in user
  quit";

/// Text after the command keeps its inner spacing; only the single
/// separating space is removed.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (name, rest) = match line.trim_start().split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (line.trim(), ""),
    };

    let command = match name {
        "type-search" => draft(TextField::Search, rest),
        "type-location" => draft(TextField::Location, rest),
        "submit" => Command::Dispatch(Msg::DraftSubmitted),
        "category" => select(CategoricalField::Category, rest),
        "type" => select(CategoricalField::JobType, rest),
        "clear" => {
            let key = rest.trim();
            let field = FilterField::from_query_key(key)
                .ok_or_else(|| CommandError::UnknownFilter(key.to_string()))?;
            Command::Dispatch(Msg::FilterCleared(field))
        }
        "clear-all" => Command::Dispatch(Msg::AllCleared),
        "dismiss" => Command::Dispatch(Msg::ErrorDismissed),
        "refresh-session" => Command::Dispatch(Msg::SessionRefreshRequested),
        "sign-out" => Command::Dispatch(Msg::SignedOut),
        "back" => Command::Back,
        "forward" => Command::Forward,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn draft(field: TextField, text: &str) -> Command {
    Command::Dispatch(Msg::DraftEdited {
        field,
        value: text.to_string(),
    })
}

fn select(field: CategoricalField, value: &str) -> Command {
    let value = match value.trim() {
        "-" => "",
        other => other,
    };
    Command::Dispatch(Msg::CategoricalSelected {
        field,
        value: value.to_string(),
    })
}
