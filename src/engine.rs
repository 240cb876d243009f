//! Front-end session state.
//!
//! Holds the configuration, the current game and the AI that plays the
//! non-human seats, and turns each text command into output lines. After
//! every command the AI players move until a human has to act.

use std::io::{self, Write};

use crate::ai::{GreedyAi, Strategy};
use crate::board::TerritoryId;
use crate::config::Configuration;
use crate::dice::{DiceRoller, RandomDice};
use crate::game::{AiStep, EngineError, Game, GameEvent, SelectionResult};
use crate::protocol::notation::{encode_board, parse_board};
use crate::protocol::parser::HELP_LINES;
use crate::protocol::render::{action_line, render_grid, result_lines, status_line};
use crate::resolve::CombatOutcome;

/// Rounds the AI may play without a human in between before the session
/// gives up on the game.
const AI_ROUND_LIMIT: u32 = 1000;

/// Holds the mutable state of the front end between commands.
pub struct Engine {
    config: Configuration,
    game: Option<Game>,
    ai: Box<dyn Strategy>,
}

impl Engine {
    /// Creates a session with no game in progress.
    pub fn new(config: Configuration) -> Self {
        Engine {
            config,
            game: None,
            ai: Box::new(GreedyAi::default()),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn dice(seed: Option<u64>) -> Box<dyn DiceRoller> {
        match seed {
            Some(seed) => Box::new(RandomDice::seeded(seed)),
            None => Box::new(RandomDice::from_entropy()),
        }
    }

    /// Handles `new [seed]`: deals a fresh board and starts playing.
    pub fn new_game<W: Write>(&mut self, seed: Option<u64>, out: &mut W) -> io::Result<()> {
        let mut game = Game::with_dice(self.config.clone(), Self::dice(seed));
        if let Err(e) = game.start() {
            return error_line(out, &e);
        }
        self.game = Some(game);
        self.advance(out)
    }

    /// Handles `position <notation>`: starts from a given board.
    pub fn set_position<W: Write>(&mut self, notation: &str, out: &mut W) -> io::Result<()> {
        let board = match parse_board(notation, &self.config) {
            Ok(board) => board,
            Err(e) => return error_line(out, &e),
        };
        match Game::from_board(self.config.clone(), board, Self::dice(None)) {
            Ok(game) => {
                self.game = Some(game);
                self.advance(out)
            }
            Err(e) => error_line(out, &e),
        }
    }

    /// Handles `select <row> <col>`.
    pub fn handle_select<W: Write>(&mut self, row: usize, col: usize, out: &mut W) -> io::Result<()> {
        let id = self
            .game
            .as_ref()
            .and_then(|g| g.board().grid_dims())
            .filter(|&(rows, cols)| row < rows && col < cols)
            .map(|(_, cols)| crate::board::coordinates_to_index(row, col, cols));
        match id {
            Some(id) => self.handle_pick(id, out),
            None if self.game.is_none() => error_line(out, &EngineError::NotStarted),
            None => writeln!(out, "ignored {row} {col}"),
        }
    }

    /// Handles `pick <id>`.
    pub fn handle_pick<W: Write>(&mut self, id: TerritoryId, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return error_line(out, &EngineError::NotStarted);
        };
        if !game.my_turn() && !game.is_over() {
            return writeln!(out, "error not your turn");
        }
        match game.request_selection(id) {
            Ok(result) => {
                write_selection(out, &result)?;
                self.advance(out)
            }
            Err(e) => error_line(out, &e),
        }
    }

    /// Handles `end`: the primary action.
    pub fn handle_end<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return error_line(out, &EngineError::NotStarted);
        };
        if !game.my_turn() && !game.is_over() {
            return writeln!(out, "error not your turn");
        }
        match game.do_primary_action() {
            Ok(true) => self.advance(out),
            Ok(false) => writeln!(
                out,
                "error {} dice left to place",
                game.reinforcements_remaining()
            ),
            Err(e) => error_line(out, &e),
        }
    }

    /// Handles `show`.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return error_line(out, &EngineError::NotStarted);
        };
        if let Ok(notation) = encode_board(game.board()) {
            writeln!(out, "board {notation}")?;
        }
        for row in render_grid(game) {
            writeln!(out, "{row}")?;
        }
        Ok(())
    }

    /// Handles `status`.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = &self.game else {
            return error_line(out, &EngineError::NotStarted);
        };
        writeln!(out, "{}", status_line(game))?;
        writeln!(out, "{}", action_line(game))
    }

    /// Handles `results`.
    pub fn handle_results<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.game.as_ref().and_then(Game::results) {
            Some(results) => {
                for line in result_lines(results) {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            }
            None => writeln!(out, "error game is not over"),
        }
    }

    pub fn handle_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in HELP_LINES {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Lets the AI seats play, then reports events and the new position.
    fn advance<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };
        loop {
            if game.round_num() > AI_ROUND_LIMIT {
                writeln!(out, "error round limit reached")?;
                break;
            }
            match game.ai_step(self.ai.as_mut()) {
                Ok(AiStep::Selection(SelectionResult::Attacked(outcome))) => {
                    let name = game.current_player_name().to_string();
                    write!(out, "ai {name} ")?;
                    write_attack(out, &outcome)?;
                }
                Ok(AiStep::Selection(_)) | Ok(AiStep::PrimaryAction) => {}
                Ok(AiStep::Idle) => break,
                Ok(AiStep::Stalled) => {
                    writeln!(out, "error ai stalled")?;
                    break;
                }
                Err(e) => {
                    error_line(out, &e)?;
                    break;
                }
            }
        }

        for event in game.drain_events() {
            match event {
                GameEvent::PlayerClosed(id) => {
                    if let Some(player) = game.player(id) {
                        writeln!(out, "closed {}", player.name)?;
                    }
                }
                GameEvent::GameEnded => writeln!(out, "gameover")?,
                GameEvent::PhaseChanged { .. } => {}
            }
        }

        if game.is_over() {
            self.handle_results(out)?;
        } else {
            self.handle_show(out)?;
            self.handle_status(out)?;
        }
        out.flush()
    }
}

fn error_line<W: Write>(out: &mut W, err: &dyn std::error::Error) -> io::Result<()> {
    writeln!(out, "error {err}")?;
    out.flush()
}

fn write_attack<W: Write>(out: &mut W, outcome: &CombatOutcome) -> io::Result<()> {
    writeln!(
        out,
        "attack {} {} {} {} {}",
        outcome.attacker,
        outcome.defender,
        outcome.attacker_total(),
        outcome.defender_total(),
        if outcome.attacker_won() { "won" } else { "lost" }
    )
}

fn write_selection<W: Write>(out: &mut W, result: &SelectionResult) -> io::Result<()> {
    match result {
        SelectionResult::Ignored => writeln!(out, "ignored"),
        SelectionResult::Selected(id) => writeln!(out, "selected {id}"),
        SelectionResult::Cancelled(id) => writeln!(out, "cancelled {id}"),
        SelectionResult::Attacked(outcome) => write_attack(out, outcome),
        SelectionResult::Reinforced(id) => writeln!(out, "reinforced {id}"),
    }
}
