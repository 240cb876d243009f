//! Elimination and end-of-game detection.

use tracing::info;

use crate::board::{Board, Player, PlayerId, PlayerStatus};

/// Closes every active player who owns no territory, appending them to
/// `closed` in slot order. Returns the newly closed players.
pub fn close_eliminated(
    players: &mut [Player],
    board: &Board,
    closed: &mut Vec<PlayerId>,
) -> Vec<PlayerId> {
    let mut newly = Vec::new();
    for (i, player) in players.iter_mut().enumerate() {
        let id = PlayerId(i as u8);
        if player.is_active() && board.count_owned(id) == 0 {
            player.status = PlayerStatus::Closed;
            closed.push(id);
            newly.push(id);
            info!(player = %player.name, slot = i, "player eliminated");
        }
    }
    newly
}

/// Number of players still in the game.
pub fn active_count(players: &[Player]) -> usize {
    players.iter().filter(|p| p.is_active()).count()
}

/// Returns true once at most one player remains.
pub fn is_game_over(players: &[Player]) -> bool {
    active_count(players) <= 1
}

/// The last player standing, if exactly one remains.
pub fn sole_survivor(players: &[Player]) -> Option<PlayerId> {
    let mut active = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_active())
        .map(|(i, _)| PlayerId(i as u8));
    match (active.next(), active.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}
