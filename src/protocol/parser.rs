//! Command parser for the text front end.
//!
//! Turns one line of input into a `Command` the main loop can dispatch on.

use thiserror::Error;

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty line")]
    Empty,

    #[error("unknown command: '{0}'")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
}

/// A parsed front-end command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game, optionally with seeded dice.
    NewGame { seed: Option<u64> },

    /// Start from a board notation string.
    Position { notation: String },

    /// Click the territory at a grid cell.
    Select { row: usize, col: usize },

    /// Click a territory by id.
    Pick { id: usize },

    /// Trigger the primary action.
    End,

    /// Print the board.
    Show,

    /// Print phase, player and round.
    Status,

    /// Print the results of a finished game.
    Results,

    /// List the commands.
    Help,

    /// Leave the loop.
    Quit,
}

/// One-line summaries printed by `help`.
pub const HELP_LINES: &[&str] = &[
    "new [seed]          start a new game",
    "position <board>    start from board notation",
    "select <row> <col>  click a grid cell",
    "pick <id>           click a territory by id",
    "end                 primary action (end attack / end turn)",
    "show                print the board",
    "status              print phase, player and round",
    "results             print the results of a finished game",
    "quit                exit",
];

/// Parses a single line of input.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Err(CommandError::Empty);
    };

    match head {
        "new" | "newgame" => parse_new(&tokens),
        "position" => parse_position(&tokens),
        "select" => parse_select(&tokens),
        "pick" => parse_pick(&tokens),
        "end" => Ok(Command::End),
        "show" => Ok(Command::Show),
        "status" => Ok(Command::Status),
        "results" => Ok(Command::Results),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn number<T: std::str::FromStr>(token: &str) -> Result<T, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

/// Parses `new [seed]`.
fn parse_new(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens {
        [_] => Ok(Command::NewGame { seed: None }),
        [_, seed] => Ok(Command::NewGame {
            seed: Some(number(seed)?),
        }),
        _ => Err(CommandError::Usage("new [seed]")),
    }
}

/// Parses `position <notation>`. The notation is a single token.
fn parse_position(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens {
        [_, notation] => Ok(Command::Position {
            notation: notation.to_string(),
        }),
        _ => Err(CommandError::Usage("position <board>")),
    }
}

/// Parses `select <row> <col>`.
fn parse_select(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens {
        [_, row, col] => Ok(Command::Select {
            row: number(row)?,
            col: number(col)?,
        }),
        _ => Err(CommandError::Usage("select <row> <col>")),
    }
}

/// Parses `pick <id>`.
fn parse_pick(tokens: &[&str]) -> Result<Command, CommandError> {
    match tokens {
        [_, id] => Ok(Command::Pick { id: number(id)? }),
        _ => Err(CommandError::Usage("pick <id>")),
    }
}
