//! Game orchestration.
//!
//! `Game` owns the board and drives the attack/reinforce state machine. Hosts
//! talk to it through two commands, `request_selection` and
//! `do_primary_action`, read everything else through queries, and collect
//! notifications with `drain_events`. AI players go through exactly the same
//! two commands via `ai_step`.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::Strategy;
use crate::board::{
    BalancedInitializer, Board, FactionColor, Initializer, Player, PlayerId, Seat, Territory,
    TerritoryId,
};
use crate::config::Configuration;
use crate::dice::{DiceRoller, RandomDice};
use crate::resolve::{
    close_eliminated, distribute_random, first_active_player, is_game_over, next_active_player,
    place_die, placeable_pool, reinforcement_pool, resolve_combat, sole_survivor, CombatError,
    CombatOutcome, Phase, PrimaryAction,
};
use crate::results::Results;
use crate::selection::{Selection, SelectionFlags, SelectionMode, SelectionRequest};

/// Misuse of the engine, or a broken rule invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("game has not been started")]
    NotStarted,

    #[error("game has already been started")]
    AlreadyStarted,

    #[error("game is over")]
    GameOver,

    #[error("board has {found} territories, configuration expects {expected}")]
    BoardMismatch { expected: usize, found: usize },

    #[error("territory {territory} is owned by {player}, which is not an active player")]
    UnknownPlayer {
        territory: TerritoryId,
        player: PlayerId,
    },

    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// Notification queued for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A phase began, possibly for a new player.
    PhaseChanged {
        player: PlayerId,
        phase: Phase,
        round: u32,
    },
    /// A player lost their last territory.
    PlayerClosed(PlayerId),
    /// The game reached its terminal state. Queued exactly once.
    GameEnded,
}

/// What a selection request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    Ignored,
    Selected(TerritoryId),
    Cancelled(TerritoryId),
    Attacked(CombatOutcome),
    Reinforced(TerritoryId),
}

/// One discrete AI move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiStep {
    /// A selection was fed through `request_selection`.
    Selection(SelectionResult),
    /// The primary action advanced the state machine.
    PrimaryAction,
    /// It is a human's turn, or the game is over.
    Idle,
    /// The strategy neither made a legal selection nor could advance.
    Stalled,
}

/// Holds the mutable state of one game.
pub struct Game {
    config: Configuration,
    players: Vec<Player>,
    board: Board,
    selection: Selection,
    phase: Phase,
    current: usize,
    round_num: u32,
    closed_players: Vec<PlayerId>,
    reinforcements: u32,
    started: bool,
    dice: Box<dyn DiceRoller>,
    events: Vec<GameEvent>,
    results: Option<Results>,
}

impl Game {
    /// Creates a game with entropy-seeded dice. Call `start` to deal the board.
    pub fn new(config: Configuration) -> Self {
        Game::with_dice(config, Box::new(RandomDice::from_entropy()))
    }

    /// Creates a game with an explicit dice source.
    pub fn with_dice(config: Configuration, dice: Box<dyn DiceRoller>) -> Self {
        let board = config.build_board();
        let players = config.players().to_vec();
        Game {
            selection: Selection::new(board.len()),
            config,
            players,
            board,
            phase: Phase::Attack,
            current: 0,
            round_num: 1,
            closed_players: Vec::new(),
            reinforcements: 0,
            started: false,
            dice,
            events: Vec::new(),
            results: None,
        }
    }

    /// Creates and starts a game from a prepared board.
    ///
    /// Every owned territory must belong to an active slot of `config`.
    pub fn from_board(
        config: Configuration,
        board: Board,
        dice: Box<dyn DiceRoller>,
    ) -> Result<Self, EngineError> {
        for (id, t) in board.territories().iter().enumerate() {
            if let Some(owner) = t.owner() {
                let active = config
                    .players()
                    .get(owner.index())
                    .is_some_and(Player::is_active);
                if !active {
                    return Err(EngineError::UnknownPlayer {
                        territory: id,
                        player: owner,
                    });
                }
            }
        }
        let mut game = Game::with_dice(config, dice);
        game.selection = Selection::new(board.len());
        game.board = board;
        game.begin();
        Ok(game)
    }

    /// Deals the board with the default initializer and starts the first turn.
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.start_with(&BalancedInitializer::default())
    }

    /// Deals the board with `initializer` and starts the first turn.
    pub fn start_with(&mut self, initializer: &dyn Initializer) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        let mut board = self.config.build_board();
        let expected = board.len();
        let seats: Vec<Seat> = self
            .config
            .active_players()
            .into_iter()
            .map(|player| Seat {
                player,
                color: self.players[player.index()].color,
            })
            .collect();
        initializer.populate(
            &mut board,
            &seats,
            self.config.is_colorless_territory(),
            self.dice.as_mut(),
        );
        if board.len() != expected {
            return Err(EngineError::BoardMismatch {
                expected,
                found: board.len(),
            });
        }
        self.board = board;
        self.begin();
        Ok(())
    }

    fn begin(&mut self) {
        self.started = true;
        self.round_num = 1;
        info!(
            players = self.active_player_count(),
            territories = self.board.len(),
            "game started"
        );

        self.check_eliminations();
        if self.phase == Phase::GameEnd {
            return;
        }
        match first_active_player(&self.players) {
            Some(first) => {
                self.current = first;
                self.enter_attack();
            }
            None => self.finish(),
        }
    }

    /// Handles a click on territory `id`.
    ///
    /// Clicks on anything that is not currently selectable are ignored.
    /// Errors only signal engine misuse or a broken combat invariant.
    pub fn request_selection(&mut self, id: TerritoryId) -> Result<SelectionResult, EngineError> {
        self.ensure_running()?;
        let player = self.current_player_id();

        match self.selection.classify(id) {
            SelectionRequest::Ignored => Ok(SelectionResult::Ignored),
            SelectionRequest::Select(source) => {
                self.selection.select_attacker(&self.board, source);
                Ok(SelectionResult::Selected(source))
            }
            SelectionRequest::Cancel(source) => {
                self.selection.offer_attack_sources(&self.board, player);
                Ok(SelectionResult::Cancelled(source))
            }
            SelectionRequest::Attack { attacker, defender } => {
                let outcome =
                    resolve_combat(&mut self.board, attacker, defender, self.dice.as_mut())?;
                self.check_eliminations();
                if self.phase != Phase::GameEnd {
                    self.selection.offer_attack_sources(&self.board, player);
                }
                Ok(SelectionResult::Attacked(outcome))
            }
            SelectionRequest::Reinforce(target) => {
                if !place_die(&mut self.board, player, target) {
                    return Ok(SelectionResult::Ignored);
                }
                self.reinforcements = self.reinforcements.saturating_sub(1);
                if self.reinforcements == 0 {
                    self.selection.lock(self.board.len());
                } else {
                    self.selection.offer_reinforcements(&self.board, player);
                }
                Ok(SelectionResult::Reinforced(target))
            }
        }
    }

    /// Moves the state machine forward one step if that is legal.
    ///
    /// Returns false when manual reinforcement still has dice to place.
    pub fn do_primary_action(&mut self) -> Result<bool, EngineError> {
        self.ensure_running()?;
        let player = self.current_player_id();

        match self.phase {
            Phase::Attack => {
                self.selection.lock(self.board.len());
                self.reinforcements = placeable_pool(&self.board, player);
                self.phase = Phase::Reinforce;
                if !self.config.is_random_reinforce() && self.reinforcements > 0 {
                    self.selection.offer_reinforcements(&self.board, player);
                }
                self.announce_phase();
                Ok(true)
            }
            Phase::Reinforce => {
                if self.config.is_random_reinforce() {
                    let earned = reinforcement_pool(&self.board, player);
                    let dist =
                        distribute_random(&mut self.board, player, earned, self.dice.as_mut());
                    debug!(%player, placed = dist.placed, dropped = dist.dropped, "reinforced");
                    self.reinforcements = 0;
                } else if self.reinforcements > 0 {
                    return Ok(false);
                }
                self.end_turn();
                Ok(true)
            }
            Phase::GameEnd => Err(EngineError::GameOver),
        }
    }

    fn end_turn(&mut self) {
        self.check_eliminations();
        if self.phase == Phase::GameEnd {
            return;
        }
        let Some(rotation) = next_active_player(&self.players, self.current) else {
            self.finish();
            return;
        };
        if rotation.wrapped {
            self.round_num += 1;
            debug!(round = self.round_num, "new round");
        }
        self.current = rotation.next;
        self.enter_attack();
    }

    fn enter_attack(&mut self) {
        self.phase = Phase::Attack;
        self.reinforcements = 0;
        let player = self.current_player_id();
        self.selection.offer_attack_sources(&self.board, player);
        self.announce_phase();
    }

    fn announce_phase(&mut self) {
        let player = self.current_player_id();
        debug!(%player, phase = %self.phase, round = self.round_num, "phase change");
        self.events.push(GameEvent::PhaseChanged {
            player,
            phase: self.phase,
            round: self.round_num,
        });
    }

    fn check_eliminations(&mut self) {
        let newly = close_eliminated(&mut self.players, &self.board, &mut self.closed_players);
        self.events
            .extend(newly.into_iter().map(GameEvent::PlayerClosed));
        if is_game_over(&self.players) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if self.results.is_some() {
            return;
        }
        self.phase = Phase::GameEnd;
        self.reinforcements = 0;
        self.selection.lock(self.board.len());

        let winner = sole_survivor(&self.players).map(|id| self.players[id.index()].clone());
        let closed_players = self
            .closed_players
            .iter()
            .map(|id| self.players[id.index()].clone())
            .collect();
        info!(
            round = self.round_num,
            winner = winner.as_ref().map(|p| p.name.as_str()).unwrap_or("none"),
            "game over"
        );
        self.results = Some(Results {
            closed_players,
            winner,
            round_num: self.round_num,
            configuration: self.config.clone(),
        });
        self.events.push(GameEvent::GameEnded);
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        if self.phase == Phase::GameEnd {
            return Err(EngineError::GameOver);
        }
        Ok(())
    }

    /// Performs one AI move for the current (non-human) player.
    pub fn ai_step(&mut self, ai: &mut dyn Strategy) -> Result<AiStep, EngineError> {
        if !self.started || self.is_over() || self.my_turn() {
            return Ok(AiStep::Idle);
        }
        if ai.desired_selection(self) {
            if let Some(target) = ai.make_selection(self) {
                let result = self.request_selection(target)?;
                if result != SelectionResult::Ignored {
                    return Ok(AiStep::Selection(result));
                }
                warn!(target, strategy = ai.name(), "strategy picked an unselectable territory");
            }
        }
        if self.do_primary_action()? {
            Ok(AiStep::PrimaryAction)
        } else {
            Ok(AiStep::Stalled)
        }
    }

    /// Lets AI players move until a human must act or the game ends.
    /// Returns the number of steps taken.
    pub fn play_ai_turns(&mut self, ai: &mut dyn Strategy) -> Result<usize, EngineError> {
        self.play_ai_turns_until(ai, u32::MAX)
    }

    /// Like `play_ai_turns`, but also stops once round `max_round` is passed.
    pub fn play_ai_turns_until(
        &mut self,
        ai: &mut dyn Strategy,
        max_round: u32,
    ) -> Result<usize, EngineError> {
        let mut steps = 0;
        while self.round_num <= max_round {
            match self.ai_step(ai)? {
                AiStep::Idle | AiStep::Stalled => break,
                AiStep::Selection(_) | AiStep::PrimaryAction => steps += 1,
            }
        }
        Ok(steps)
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn territory(&self, id: TerritoryId) -> Option<&Territory> {
        self.board.territory(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameEnd
    }

    pub fn round_num(&self) -> u32 {
        self.round_num
    }

    pub fn current_player_id(&self) -> PlayerId {
        PlayerId(self.current as u8)
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn current_player_name(&self) -> &str {
        &self.current_player().name
    }

    pub fn current_player_color(&self) -> FactionColor {
        self.current_player().color
    }

    /// True iff the game is waiting on a human.
    pub fn my_turn(&self) -> bool {
        self.started && !self.is_over() && self.current_player().needs_input()
    }

    /// Eliminated players in elimination order.
    pub fn closed_players(&self) -> &[PlayerId] {
        &self.closed_players
    }

    /// Dice still to be placed this reinforcement phase.
    pub fn reinforcements_remaining(&self) -> u32 {
        self.reinforcements
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_flags(&self, id: TerritoryId) -> SelectionFlags {
        self.selection.flags(id)
    }

    /// The primary action on offer right now.
    pub fn primary_action(&self) -> PrimaryAction {
        match self.phase {
            _ if !self.started => PrimaryAction::None,
            Phase::Attack => PrimaryAction::EndAttack,
            Phase::Reinforce if self.selection.mode() == SelectionMode::Reinforce => {
                PrimaryAction::PlaceDice {
                    remaining: self.reinforcements,
                }
            }
            Phase::Reinforce => PrimaryAction::EndTurn,
            Phase::GameEnd => PrimaryAction::None,
        }
    }

    pub fn primary_action_available(&self) -> bool {
        self.primary_action().is_available()
    }

    /// Results, once the game is over.
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    /// Takes all pending notifications, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
