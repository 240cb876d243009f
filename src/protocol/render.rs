//! Text rendering of the grid board and game status.
//!
//! Each cell shows the owner's color code and the dice count. The selected
//! territory is wrapped in `[..]`, selectable ones in `(..)`.

use crate::game::Game;
use crate::resolve::PrimaryAction;
use crate::results::Results;
use crate::selection::SelectionFlags;

/// Formats one cell.
pub fn cell_text(code: char, dice: u8, flags: SelectionFlags) -> String {
    match (flags.selected, flags.selectable) {
        (true, _) => format!("[{code}{dice}]"),
        (false, true) => format!("({code}{dice})"),
        (false, false) => format!(" {code}{dice} "),
    }
}

/// One string per grid row, top to bottom.
pub fn render_grid(game: &Game) -> Vec<String> {
    let board = game.board();
    let (_, cols) = board.grid_dims().unwrap_or((1, board.len().max(1)));
    board
        .territories()
        .chunks(cols)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, t)| {
                    let flags = game.selection_flags(row * cols + col);
                    cell_text(t.color().code(), t.dice(), flags)
                })
                .collect::<Vec<_>>()
                .join("")
        })
        .collect()
}

/// `phase <label> player <name> round <n>`.
pub fn status_line(game: &Game) -> String {
    format!(
        "phase {} player {} round {}",
        game.phase(),
        game.current_player_name(),
        game.round_num()
    )
}

/// Describes the primary action on offer.
pub fn action_line(game: &Game) -> String {
    match game.primary_action() {
        PrimaryAction::PlaceDice { remaining } => format!("action place {remaining}"),
        PrimaryAction::EndAttack => "action end-attack".to_string(),
        PrimaryAction::EndTurn => "action end-turn".to_string(),
        PrimaryAction::None => "action none".to_string(),
    }
}

/// `result ...` lines: the winner, then the closed players last-out first.
pub fn result_lines(results: &Results) -> Vec<String> {
    let mut lines = Vec::with_capacity(results.closed_players.len() + 1);
    match &results.winner {
        Some(winner) => lines.push(format!(
            "result winner {} round {}",
            winner.name, results.round_num
        )),
        None => lines.push(format!("result draw round {}", results.round_num)),
    }
    for (place, player) in results.closed_players.iter().rev().enumerate() {
        lines.push(format!("result place {} {}", place + 2, player.name));
    }
    lines
}
