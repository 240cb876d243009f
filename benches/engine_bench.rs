use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use dicewars::ai::GreedyAi;
use dicewars::board::{BalancedInitializer, Board, Initializer, PlayerId, Seat, PLAYER_COLORS};
use dicewars::config::{BoardSize, Configuration};
use dicewars::dice::RandomDice;
use dicewars::protocol::notation::{encode_board, parse_board};
use dicewars::resolve::resolve_combat;
use dicewars::selection::{attack_sources, attack_targets};
use dicewars::Game;

/// A mid-game 6x8 position with four players and a few full stacks.
const MIDGAME: &str = "6x8/R3,R8,B2,B1,G4,G4,Y1,Y2,R1,R5,B6,B1,G1,G8,Y3,Y1,R2,R2,B3,B3,G2,G1,Y5,Y8,R4,R1,B1,B8,G1,G2,Y1,Y1,R7,R1,B2,B2,G3,G1,Y2,Y4,R1,R1,B1,B4,G6,G1,Y1,Y2";

fn dealt_board(seed: u64) -> Board {
    let (rows, cols) = BoardSize::Medium.dims();
    let mut board = Board::grid(rows, cols);
    let seats: Vec<Seat> = (0..4)
        .map(|i| Seat {
            player: PlayerId(i as u8),
            color: PLAYER_COLORS[i],
        })
        .collect();
    let mut dice = RandomDice::seeded(seed);
    BalancedInitializer::default().populate(&mut board, &seats, false, &mut dice);
    board
}

fn bench_deal(c: &mut Criterion) {
    c.bench_function("balanced_deal_medium_4p", |b| {
        b.iter(|| dealt_board(black_box(17)))
    });
}

fn bench_largest_cluster(c: &mut Criterion) {
    let board = parse_board(MIDGAME, &Configuration::default()).unwrap();
    c.bench_function("largest_cluster_midgame", |b| {
        b.iter(|| {
            (0..4)
                .map(|p| board.largest_cluster(black_box(PlayerId(p))))
                .sum::<usize>()
        })
    });
}

fn bench_attack_options(c: &mut Criterion) {
    let board = parse_board(MIDGAME, &Configuration::default()).unwrap();
    c.bench_function("attack_options_midgame", |b| {
        b.iter(|| {
            attack_sources(&board, black_box(PlayerId(0)))
                .into_iter()
                .map(|s| attack_targets(&board, s).len())
                .sum::<usize>()
        })
    });
}

fn bench_combat(c: &mut Criterion) {
    let board = parse_board(MIDGAME, &Configuration::default()).unwrap();
    let mut dice = RandomDice::seeded(3);
    let mut scratch = board.clone();
    // R8 at 1 against B2 at 2
    c.bench_function("resolve_combat_8v2", |b| {
        b.iter(|| {
            scratch.clone_from(&board);
            resolve_combat(&mut scratch, black_box(1), black_box(2), &mut dice)
        })
    });
}

fn bench_notation(c: &mut Criterion) {
    let config = Configuration::default();
    let board = parse_board(MIDGAME, &config).unwrap();
    c.bench_function("notation_encode", |b| b.iter(|| encode_board(black_box(&board))));
    c.bench_function("notation_parse", |b| {
        b.iter(|| parse_board(black_box(MIDGAME), &config))
    });
}

fn bench_full_ai_game(c: &mut Criterion) {
    let config = Configuration::all_ai(4, BoardSize::Medium).unwrap();
    let mut group = c.benchmark_group("full_game");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("greedy_4p_medium", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut game = Game::with_dice(config.clone(), Box::new(RandomDice::seeded(seed)));
            game.start().unwrap();
            let mut ai = GreedyAi::default();
            game.play_ai_turns_until(&mut ai, 200).unwrap();
            game.round_num()
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_deal,
    bench_largest_cluster,
    bench_attack_options,
    bench_combat,
    bench_notation,
    bench_full_ai_game,
);
criterion_main!(benches);
