use std::fmt;
use thiserror::Error;

/// Static help page listing every menu choice
pub const HELP_TEXT: &str = "
    1 - INSERT NEW RECORD
    2 - DELETE RECORD
    3 - MODIFY EXISTING RECORD
    4 - DISPLAY ALL TODO TASKS
    5 - CLEAR TABLE
    6 - SHOW HELP PAGE
    7 - EXIT
";

/// A menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert,
    Delete,
    Update,
    List,
    Clear,
    Help,
    Exit,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Insert,
        Command::Delete,
        Command::Update,
        Command::List,
        Command::Clear,
        Command::Help,
        Command::Exit,
    ];

    pub fn number(&self) -> i64 {
        match self {
            Command::Insert => 1,
            Command::Delete => 2,
            Command::Update => 3,
            Command::List => 4,
            Command::Clear => 5,
            Command::Help => 6,
            Command::Exit => 7,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Insert => "insert",
            Command::Delete => "delete",
            Command::Update => "update",
            Command::List => "list",
            Command::Clear => "clear",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised for menu numbers outside 1..=7
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Choice must be within the range 1 to 7 inclusive")]
pub struct ChoiceOutOfRange(pub i64);

impl TryFrom<i64> for Command {
    type Error = ChoiceOutOfRange;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        Command::ALL
            .into_iter()
            .find(|c| c.number() == choice)
            .ok_or(ChoiceOutOfRange(choice))
    }
}
