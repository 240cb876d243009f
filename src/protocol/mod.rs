//! Text front-end protocol.
//!
//! Line commands for the interactive binary, the compact board notation used
//! to load and print positions, and the text rendering of the grid.

pub mod notation;
pub mod parser;
pub mod render;

pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command, CommandError, HELP_LINES};
pub use render::{action_line, cell_text, render_grid, result_lines, status_line};
