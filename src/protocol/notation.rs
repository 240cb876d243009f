//! Board notation.
//!
//! A compact single-token encoding of a grid position, in the spirit of
//! chess FEN:
//!
//! ```text
//! <rows>x<cols>/<cell>,<cell>,...
//! ```
//!
//! Cells are listed row-major. Each cell is a color code followed by the dice
//! count, e.g. `R3`; colorless territories use `-` (`-1`). Colors map back to
//! players through the configuration slot that holds them.

use std::sync::Arc;

use crate::board::{Board, FactionColor, GridTopology, Territory, MAX_DICE, MIN_DICE};
use crate::config::Configuration;

/// Errors that can occur while parsing board notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected '<rows>x<cols>/<cells>', got '{0}'")]
    MissingSections(String),

    #[error("invalid dimensions: '{0}'")]
    InvalidDimensions(String),

    #[error("expected {expected} cells, got {found}")]
    WrongCellCount { expected: usize, found: usize },

    #[error("invalid cell: '{0}'")]
    InvalidCell(String),

    #[error("invalid color code: '{0}'")]
    InvalidColor(char),

    #[error("no player slot uses color {}", .0.name())]
    NoPlayerForColor(FactionColor),

    #[error("dice count out of range in cell '{0}'")]
    InvalidDice(String),

    #[error("board has no grid layout")]
    NotAGrid,
}

/// Encodes a grid board.
pub fn encode_board(board: &Board) -> Result<String, NotationError> {
    let (rows, cols) = board.grid_dims().ok_or(NotationError::NotAGrid)?;
    let cells: Vec<String> = board
        .territories()
        .iter()
        .map(|t| format!("{}{}", t.color().code(), t.dice()))
        .collect();
    Ok(format!("{rows}x{cols}/{}", cells.join(",")))
}

/// Parses `<rows>x<cols>`.
fn parse_dims(s: &str) -> Result<(usize, usize), NotationError> {
    let invalid = || NotationError::InvalidDimensions(s.to_string());
    let (rows, cols) = s.split_once('x').ok_or_else(invalid)?;
    let rows: usize = rows.parse().map_err(|_| invalid())?;
    let cols: usize = cols.parse().map_err(|_| invalid())?;
    if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
        return Err(invalid());
    }
    Ok((rows, cols))
}

/// Parses one cell like `R3` or `-1`.
fn parse_cell(s: &str, config: &Configuration) -> Result<Territory, NotationError> {
    let mut chars = s.chars();
    let code = chars
        .next()
        .ok_or_else(|| NotationError::InvalidCell(s.to_string()))?;
    let color = FactionColor::from_code(code).ok_or(NotationError::InvalidColor(code))?;
    let dice: u8 = chars
        .as_str()
        .parse()
        .map_err(|_| NotationError::InvalidCell(s.to_string()))?;
    if !(MIN_DICE..=MAX_DICE).contains(&dice) {
        return Err(NotationError::InvalidDice(s.to_string()));
    }

    if color == FactionColor::Colorless {
        return Ok(Territory::colorless(dice));
    }
    let owner = config
        .player_with_color(color)
        .ok_or(NotationError::NoPlayerForColor(color))?;
    Ok(Territory::owned(owner, color, dice))
}

/// Parses a notation string into a grid board.
pub fn parse_board(s: &str, config: &Configuration) -> Result<Board, NotationError> {
    let s = s.trim();
    let (dims, cells) = s
        .split_once('/')
        .ok_or_else(|| NotationError::MissingSections(s.to_string()))?;
    let (rows, cols) = parse_dims(dims)?;

    let territories = cells
        .split(',')
        .filter(|c| !c.is_empty())
        .map(|c| parse_cell(c, config))
        .collect::<Result<Vec<_>, _>>()?;

    let expected = rows * cols;
    if territories.len() != expected {
        return Err(NotationError::WrongCellCount {
            expected,
            found: territories.len(),
        });
    }

    Board::with_territories(Arc::new(GridTopology::new(rows, cols)), territories).ok_or(
        NotationError::WrongCellCount {
            expected,
            found: expected,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlayerId;

    const POSITION: &str = "2x3/R3,B1,-2,G8,R1,B4";

    #[test]
    fn parse_small_position() {
        let board = parse_board(POSITION, &Configuration::default()).unwrap();
        assert_eq!(board.grid_dims(), Some((2, 3)));
        let t = board.territory(0).unwrap();
        assert_eq!(t.owner(), Some(PlayerId(0)));
        assert_eq!(t.dice(), 3);
        assert_eq!(board.territory(2).unwrap().owner(), None);
        assert_eq!(board.territory(2).unwrap().dice(), 2);
        assert_eq!(board.territory(3).unwrap().owner(), Some(PlayerId(2)));
        assert_eq!(board.territory(3).unwrap().dice(), 8);
    }

    #[test]
    fn encode_reproduces_position() {
        let board = parse_board(POSITION, &Configuration::default()).unwrap();
        assert_eq!(encode_board(&board).unwrap(), POSITION);
    }

    #[test]
    fn malformed_notation_is_rejected() {
        let cfg = Configuration::default();
        assert_eq!(
            parse_board("R3,B1", &cfg).err(),
            Some(NotationError::MissingSections("R3,B1".to_string()))
        );
        assert_eq!(
            parse_board("2by3/R1", &cfg).err(),
            Some(NotationError::InvalidDimensions("2by3".to_string()))
        );
        assert_eq!(
            parse_board("0x3/", &cfg).err(),
            Some(NotationError::InvalidDimensions("0x3".to_string()))
        );
        assert_eq!(
            parse_board("4294967296x4294967296/R1", &cfg).err(),
            Some(NotationError::InvalidDimensions(
                "4294967296x4294967296".to_string()
            ))
        );
        assert_eq!(
            parse_board("1x2/R1", &cfg).err(),
            Some(NotationError::WrongCellCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_board("1x2/R1,X1", &cfg).err(),
            Some(NotationError::InvalidColor('X'))
        );
        assert_eq!(
            parse_board("1x2/R1,B", &cfg).err(),
            Some(NotationError::InvalidCell("B".to_string()))
        );
        assert_eq!(
            parse_board("1x2/R9,B1", &cfg).err(),
            Some(NotationError::InvalidDice("R9".to_string()))
        );
        assert_eq!(
            parse_board("1x2/R0,B1", &cfg).err(),
            Some(NotationError::InvalidDice("R0".to_string()))
        );
    }
}
