//! Greedy one-ply strategy.
//!
//! Attacks wherever the dice advantage is good enough, and props up the
//! territories facing the biggest enemy stacks when placing dice by hand.

use crate::board::{Board, PlayerId, TerritoryId};
use crate::game::Game;
use crate::selection::{attack_sources, attack_targets, SelectionMode};

use super::Strategy;

/// Takes the best-looking attack until none is left, then ends the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyAi {
    /// Minimum `attacker - defender` dice difference worth attacking with.
    pub threshold: i32,
}

impl Default for GreedyAi {
    fn default() -> Self {
        GreedyAi { threshold: 1 }
    }
}

impl GreedyAi {
    pub fn new(threshold: i32) -> Self {
        GreedyAi { threshold }
    }

    fn acceptable(&self, attacker_dice: u8, defender_dice: u8) -> Option<i32> {
        let advantage = i32::from(attacker_dice) - i32::from(defender_dice);
        (advantage >= self.threshold).then_some(advantage)
    }

    /// Best target for `source`, ties to the lowest id.
    fn best_target(&self, board: &Board, source: TerritoryId) -> Option<(TerritoryId, i32)> {
        let attacker = board.territory(source)?.dice();
        let mut best: Option<(TerritoryId, i32)> = None;
        for target in attack_targets(board, source) {
            let Some(defender) = board.territory(target) else {
                continue;
            };
            if let Some(adv) = self.acceptable(attacker, defender.dice()) {
                if best.map_or(true, |(_, b)| adv > b) {
                    best = Some((target, adv));
                }
            }
        }
        best
    }

    /// Best attacking pair over all of `player`'s sources.
    fn best_attack(&self, board: &Board, player: PlayerId) -> Option<(TerritoryId, TerritoryId)> {
        let mut best: Option<(TerritoryId, TerritoryId, i32)> = None;
        for source in attack_sources(board, player) {
            if let Some((target, adv)) = self.best_target(board, source) {
                if best.map_or(true, |(_, _, b)| adv > b) {
                    best = Some((source, target, adv));
                }
            }
        }
        best.map(|(source, target, _)| (source, target))
    }
}

/// How badly `id` is outgunned by its strongest enemy neighbor.
fn frontier_pressure(board: &Board, id: TerritoryId) -> i32 {
    let Some(territory) = board.territory(id) else {
        return i32::MIN;
    };
    let enemy = board
        .territories_adjacent_to(id)
        .iter()
        .filter_map(|&n| board.territory(n))
        .filter(|t| t.owner() != territory.owner())
        .map(|t| i32::from(t.dice()))
        .max()
        .unwrap_or(0);
    enemy - i32::from(territory.dice())
}

fn best_placement(game: &Game) -> Option<TerritoryId> {
    let board = game.board();
    let mut best: Option<(TerritoryId, i32)> = None;
    for id in game.selection().selectable_ids() {
        let score = frontier_pressure(board, id);
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((id, score));
        }
    }
    best.map(|(id, _)| id)
}

impl Strategy for GreedyAi {
    fn name(&self) -> &str {
        "greedy"
    }

    fn desired_selection(&mut self, game: &Game) -> bool {
        if game.is_over() {
            return false;
        }
        let board = game.board();
        match game.selection().mode() {
            SelectionMode::Attack => match game.selection().selected() {
                Some(_) => true,
                None => self.best_attack(board, game.current_player_id()).is_some(),
            },
            SelectionMode::Reinforce => game.selection().selectable_ids().next().is_some(),
            SelectionMode::Locked => false,
        }
    }

    fn make_selection(&mut self, game: &Game) -> Option<TerritoryId> {
        let board = game.board();
        match game.selection().mode() {
            SelectionMode::Attack => match game.selection().selected() {
                // Follow through, or click the source again to back out
                Some(source) => Some(
                    self.best_target(board, source)
                        .map_or(source, |(target, _)| target),
                ),
                None => self
                    .best_attack(board, game.current_player_id())
                    .map(|(source, _)| source),
            },
            SelectionMode::Reinforce => best_placement(game),
            SelectionMode::Locked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FactionColor, GridTopology, Player, PlayerStatus, Territory};
    use crate::config::{BoardSize, Configuration};
    use crate::dice::LoadedDice;
    use crate::game::AiStep;
    use std::sync::Arc;

    fn cfg(random: bool) -> Configuration {
        let statuses = [
            PlayerStatus::Ai,
            PlayerStatus::Ai,
            PlayerStatus::Closed,
            PlayerStatus::Closed,
            PlayerStatus::Closed,
            PlayerStatus::Closed,
        ];
        let players = statuses
            .iter()
            .zip(crate::board::PLAYER_COLORS)
            .enumerate()
            .map(|(i, (&s, c))| Player::new(format!("cpu{i}"), s, c))
            .collect();
        Configuration::new(players, false, random, BoardSize::Small).unwrap()
    }

    fn red(d: u8) -> Territory {
        Territory::owned(PlayerId(0), FactionColor::Red, d)
    }

    fn blue(d: u8) -> Territory {
        Territory::owned(PlayerId(1), FactionColor::Blue, d)
    }

    fn game(rows: usize, cols: usize, cells: Vec<Territory>, random: bool) -> Game {
        let board =
            Board::with_territories(Arc::new(GridTopology::new(rows, cols)), cells).unwrap();
        Game::from_board(cfg(random), board, Box::new(LoadedDice::new(vec![1]))).unwrap()
    }

    #[test]
    fn picks_largest_advantage() {
        // B1 R5 B4
        // R3 B1 B1
        let g = game(
            2,
            3,
            vec![blue(1), red(5), blue(4), red(3), blue(1), blue(1)],
            true,
        );
        let ai = GreedyAi::default();
        assert_eq!(ai.best_attack(g.board(), PlayerId(0)), Some((1, 0)));
    }

    #[test]
    fn respects_threshold() {
        let ai = GreedyAi::default();
        assert_eq!(ai.acceptable(3, 3), None);
        assert_eq!(ai.acceptable(4, 3), Some(1));
        assert_eq!(ai.acceptable(8, 8), None);
        assert_eq!(GreedyAi::new(3).acceptable(5, 3), None);
        assert_eq!(GreedyAi::new(3).acceptable(8, 5), Some(3));
    }

    #[test]
    fn full_stack_does_not_attack_an_equal_one() {
        let g = game(1, 2, vec![red(8), blue(8)], true);
        let mut ai = GreedyAi::new(3);
        assert!(!ai.desired_selection(&g));
        assert_eq!(ai.make_selection(&g), None);
    }

    #[test]
    fn selects_then_attacks() {
        let mut g = game(1, 3, vec![red(4), blue(1), blue(6)], true);
        let mut ai = GreedyAi::default();
        assert!(ai.desired_selection(&g));
        assert_eq!(ai.make_selection(&g), Some(0));
        g.request_selection(0).unwrap();
        assert!(ai.desired_selection(&g));
        assert_eq!(ai.make_selection(&g), Some(1));
    }

    #[test]
    fn no_attack_without_advantage() {
        let g = game(1, 2, vec![red(3), blue(3)], true);
        let mut ai = GreedyAi::default();
        assert!(!ai.desired_selection(&g));
        assert_eq!(ai.make_selection(&g), None);
    }

    #[test]
    fn manual_placement_backs_the_weakest_front() {
        // R1 R3 B6
        // R2 B1 B1
        let mut g = game(
            2,
            3,
            vec![red(1), red(3), blue(6), red(2), blue(1), blue(1)],
            false,
        );
        let mut ai = GreedyAi::new(10);
        assert_eq!(g.ai_step(&mut ai), Ok(AiStep::PrimaryAction));
        assert_eq!(g.selection().mode(), SelectionMode::Reinforce);
        assert!(ai.desired_selection(&g));
        // Territory 1 faces a 6 with 3 dice: pressure 3
        assert_eq!(ai.make_selection(&g), Some(1));
    }
}
