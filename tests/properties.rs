//! Property-based tests for board, combat and whole-game invariants.
//!
//! Run with: cargo test --release --test properties

use std::sync::Arc;

use proptest::prelude::*;

use dicewars::ai::GreedyAi;
use dicewars::board::{
    is_connected, is_symmetric, BalancedInitializer, Board, FactionColor, GridTopology,
    Initializer, PlayerId, PlayerStatus, Seat, Territory, MAX_DICE, MIN_DICE, PLAYER_COLORS,
};
use dicewars::config::{BoardSize, Configuration};
use dicewars::dice::{LoadedDice, RandomDice};
use dicewars::resolve::{resolve_combat, CombatWinner};
use dicewars::{AiStep, Game, SelectionResult};

fn seats(n: usize) -> Vec<Seat> {
    (0..n)
        .map(|i| Seat {
            player: PlayerId(i as u8),
            color: PLAYER_COLORS[i],
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every grid is symmetric and connected.
    #[test]
    fn prop_grid_symmetric_and_connected(rows in 1usize..12, cols in 1usize..12) {
        let grid = GridTopology::new(rows, cols);
        prop_assert!(is_symmetric(&grid));
        prop_assert!(is_connected(&grid));
    }

    /// The attacker always ends on one die; a win moves the rest of the stack.
    #[test]
    fn prop_combat_conserves_attacker_stack(
        attacker in 2u8..=MAX_DICE,
        defender in 1u8..=MAX_DICE,
        faces in prop::collection::vec(1u8..=6, 1..20),
    ) {
        let cells = vec![
            Territory::owned(PlayerId(0), FactionColor::Red, attacker),
            Territory::owned(PlayerId(1), FactionColor::Blue, defender),
        ];
        let mut board = Board::with_territories(Arc::new(GridTopology::new(1, 2)), cells).unwrap();
        let mut dice = LoadedDice::new(faces);
        let outcome = resolve_combat(&mut board, 0, 1, &mut dice).unwrap();

        let a = board.territory(0).unwrap();
        let d = board.territory(1).unwrap();
        prop_assert_eq!(a.dice(), 1);
        match outcome.winner {
            CombatWinner::Attacker => {
                prop_assert!(outcome.attacker_total() > outcome.defender_total());
                prop_assert_eq!(d.owner(), Some(PlayerId(0)));
                prop_assert_eq!(a.dice() + d.dice(), attacker);
            }
            CombatWinner::Defender => {
                prop_assert!(outcome.attacker_total() <= outcome.defender_total());
                prop_assert_eq!(d.owner(), Some(PlayerId(1)));
                prop_assert_eq!(d.dice(), defender);
            }
        }
        prop_assert_eq!(outcome.attacker_rolls.len(), usize::from(attacker));
        prop_assert_eq!(outcome.defender_rolls.len(), usize::from(defender));
    }

    /// The balanced deal gives every player the same dice and keeps stacks in range.
    #[test]
    fn prop_balanced_deal(players in 2usize..=6, seed in any::<u64>(), colorless in any::<bool>()) {
        let (rows, cols) = BoardSize::Medium.dims();
        let mut board = Board::grid(rows, cols);
        let mut dice = RandomDice::seeded(seed);
        BalancedInitializer::default().populate(&mut board, &seats(players), colorless, &mut dice);

        let totals: Vec<u32> = (0..players).map(|p| board.total_dice(PlayerId(p as u8))).collect();
        prop_assert!(totals.iter().all(|&t| t == totals[0]), "totals differ: {:?}", totals);
        for t in board.territories() {
            prop_assert!((MIN_DICE..=MAX_DICE).contains(&t.dice()));
        }
        if !colorless {
            prop_assert!(board.territories().iter().all(|t| t.owner().is_some()));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Whole AI games keep every invariant at every step.
    #[test]
    fn prop_ai_game_invariants(players in 2usize..=6, seed in any::<u64>(), manual in any::<bool>()) {
        let mut config = Configuration::all_ai(players, BoardSize::Small).unwrap();
        config.set_random_reinforce(!manual);
        let mut game = Game::with_dice(config, Box::new(RandomDice::seeded(seed)));
        game.start().unwrap();
        let mut ai = GreedyAi::default();

        let mut closed_before: Vec<PlayerId> = Vec::new();
        let mut round = game.round_num();
        let mut steps = 0;
        while !game.is_over() && game.round_num() <= 40 && steps < 20_000 {
            let step = game.ai_step(&mut ai).unwrap();
            prop_assert!(step != AiStep::Stalled);
            steps += 1;

            // Closed players never come back and keep their order
            let closed = game.closed_players().to_vec();
            prop_assert!(closed.starts_with(&closed_before));
            closed_before = closed;
            for id in &closed_before {
                prop_assert_eq!(game.player(*id).unwrap().status, PlayerStatus::Closed);
                prop_assert_eq!(game.board().count_owned(*id), 0);
            }
            let active = game.players().iter().filter(|p| p.is_active()).count();
            prop_assert_eq!(active + closed_before.len(), players);

            prop_assert!(game.round_num() >= round);
            round = game.round_num();

            for t in game.board().territories() {
                prop_assert!((MIN_DICE..=MAX_DICE).contains(&t.dice()));
            }
            prop_assert_eq!(game.results().is_some(), game.is_over());
        }
    }

    /// Clicking something that is not selectable changes nothing, however often.
    #[test]
    fn prop_illegal_clicks_are_noops(seed in any::<u64>(), clicks in prop::collection::vec(0usize..40, 1..20)) {
        let config = Configuration::default();
        let mut game = Game::with_dice(config, Box::new(RandomDice::seeded(seed)));
        game.start().unwrap();

        let board = game.board().territories().to_vec();
        let selection = game.selection().clone();
        for id in clicks {
            if game.selection().is_selectable(id) {
                continue;
            }
            prop_assert_eq!(game.request_selection(id), Ok(SelectionResult::Ignored));
            prop_assert_eq!(game.board().territories(), &board[..]);
            prop_assert_eq!(game.selection(), &selection);
        }
    }
}
