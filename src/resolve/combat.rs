//! Combat resolution.
//!
//! The attacker rolls one die per die on its stack, the defender likewise,
//! and the higher sum wins. Ties go to the defender. Whatever the result, the
//! attacking stack is left with a single die; on a win the rest of it moves
//! into the conquered territory.

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, PlayerId, TerritoryId};
use crate::dice::{self, DiceRoller};

/// Illegal attacker/defender pairs. These indicate a caller bug: the
/// selection layer never offers such a pair.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CombatError {
    #[error("territory {0} does not exist")]
    UnknownTerritory(TerritoryId),

    #[error("territory {attacker} is not adjacent to {defender}")]
    NotAdjacent {
        attacker: TerritoryId,
        defender: TerritoryId,
    },

    #[error("territories {attacker} and {defender} have the same owner")]
    SameOwner {
        attacker: TerritoryId,
        defender: TerritoryId,
    },

    #[error("colorless territory {0} cannot attack")]
    ColorlessAttacker(TerritoryId),

    #[error("territory {id} has {dice} dice, at least 2 are needed to attack")]
    TooFewDice { id: TerritoryId, dice: u8 },
}

/// Which side took the fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatWinner {
    Attacker,
    Defender,
}

/// Full record of one attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatOutcome {
    pub attacker: TerritoryId,
    pub defender: TerritoryId,
    pub winner: CombatWinner,
    pub attacker_rolls: Vec<u8>,
    pub defender_rolls: Vec<u8>,
    /// Owner of the defending territory before the attack.
    pub defender_owner: Option<PlayerId>,
}

impl CombatOutcome {
    pub fn attacker_total(&self) -> u32 {
        dice::total(&self.attacker_rolls)
    }

    pub fn defender_total(&self) -> u32 {
        dice::total(&self.defender_rolls)
    }

    pub fn attacker_won(&self) -> bool {
        self.winner == CombatWinner::Attacker
    }
}

/// Checks that `attacker` may attack `defender`.
pub fn validate_attack(
    board: &Board,
    attacker: TerritoryId,
    defender: TerritoryId,
) -> Result<(), CombatError> {
    let att = board
        .territory(attacker)
        .ok_or(CombatError::UnknownTerritory(attacker))?;
    let def = board
        .territory(defender)
        .ok_or(CombatError::UnknownTerritory(defender))?;

    let Some(owner) = att.owner() else {
        return Err(CombatError::ColorlessAttacker(attacker));
    };
    if def.is_owned_by(owner) {
        return Err(CombatError::SameOwner { attacker, defender });
    }
    if !board.is_adjacent(attacker, defender) {
        return Err(CombatError::NotAdjacent { attacker, defender });
    }
    if att.dice() < 2 {
        return Err(CombatError::TooFewDice {
            id: attacker,
            dice: att.dice(),
        });
    }
    Ok(())
}

/// Decides a fight from the two sums. Ties favor the defender.
pub fn decide(attacker_total: u32, defender_total: u32) -> CombatWinner {
    if attacker_total > defender_total {
        CombatWinner::Attacker
    } else {
        CombatWinner::Defender
    }
}

/// Rolls and applies one attack.
pub fn resolve_combat(
    board: &mut Board,
    attacker: TerritoryId,
    defender: TerritoryId,
    dice: &mut dyn DiceRoller,
) -> Result<CombatOutcome, CombatError> {
    validate_attack(board, attacker, defender)?;

    let (att_dice, def_dice, defender_owner) = match (board.territory(attacker), board.territory(defender)) {
        (Some(a), Some(d)) => (a.dice(), d.dice(), d.owner()),
        _ => return Err(CombatError::UnknownTerritory(attacker)),
    };

    let attacker_rolls = dice.roll(att_dice);
    let defender_rolls = dice.roll(def_dice);
    let winner = decide(dice::total(&attacker_rolls), dice::total(&defender_rolls));

    apply_outcome(board, attacker, defender, winner);

    let outcome = CombatOutcome {
        attacker,
        defender,
        winner,
        attacker_rolls,
        defender_rolls,
        defender_owner,
    };
    debug!(
        attacker,
        defender,
        attack = outcome.attacker_total(),
        defense = outcome.defender_total(),
        won = outcome.attacker_won(),
        "combat resolved"
    );
    Ok(outcome)
}

/// Applies a decided fight to the board. Callers validate the pair first.
pub fn apply_outcome(
    board: &mut Board,
    attacker: TerritoryId,
    defender: TerritoryId,
    winner: CombatWinner,
) {
    let Some(att) = board.territory(attacker).copied() else {
        return;
    };

    if winner == CombatWinner::Attacker {
        if let (Some(owner), Some(def)) = (att.owner(), board.territory_mut(defender)) {
            def.capture(owner, att.color(), att.dice() - 1);
        }
    }
    if let Some(a) = board.territory_mut(attacker) {
        a.set_dice(1);
    }
}
