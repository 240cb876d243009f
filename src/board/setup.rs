//! Initial territory and dice distribution.
//!
//! The distribution policy sits behind the `Initializer` trait so games can
//! be started from any policy. `BalancedInitializer` deals territories
//! round-robin in a shuffled order and gives every player the same dice
//! budget.

use super::player::PlayerId;
use super::state::Board;
use super::territory::{FactionColor, Territory, MAX_DICE};
use crate::dice::DiceRoller;

/// A seat taking part in the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub player: PlayerId,
    pub color: FactionColor,
}

/// Policy that fills a blank board with owners and dice.
pub trait Initializer {
    /// Populates `board` for the given seats. When `colorless` is set the
    /// policy may leave some territories unowned.
    fn populate(&self, board: &mut Board, seats: &[Seat], colorless: bool, dice: &mut dyn DiceRoller);
}

/// Equal shares, shuffled positions, equal dice totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancedInitializer {
    /// Average dice per owned territory in the smallest share.
    pub dice_per_territory: u8,
    /// With colorless territories enabled, one territory in this many stays unowned.
    pub colorless_every: usize,
    /// Highest starting stack on a colorless territory.
    pub colorless_max_dice: u8,
}

impl Default for BalancedInitializer {
    fn default() -> Self {
        BalancedInitializer {
            dice_per_territory: 2,
            colorless_every: 7,
            colorless_max_dice: 3,
        }
    }
}

impl Initializer for BalancedInitializer {
    fn populate(&self, board: &mut Board, seats: &[Seat], colorless: bool, dice: &mut dyn DiceRoller) {
        let count = board.len();
        if count == 0 {
            return;
        }

        let order = shuffled_ids(count, dice);

        let owned_total = if seats.is_empty() {
            0
        } else if colorless {
            let reserved = count / self.colorless_every.max(1);
            let share = (count - reserved) / seats.len();
            share * seats.len()
        } else {
            count
        };

        for (slot, &id) in order.iter().enumerate() {
            let Some(territory) = board.territory_mut(id) else {
                continue;
            };
            if slot < owned_total {
                let seat = seats[slot % seats.len()];
                *territory = Territory::owned(seat.player, seat.color, 1);
            } else {
                let max = self.colorless_max_dice.clamp(1, MAX_DICE);
                let stack = 1 + dice.choose(usize::from(max)) as u8;
                *territory = Territory::colorless(stack);
            }
        }

        let Some(smallest_share) = seats.iter().map(|s| board.count_owned(s.player)).min() else {
            return;
        };
        let budget = smallest_share * usize::from(self.dice_per_territory.max(1));

        for seat in seats {
            let owned = board.count_owned(seat.player);
            let extra = budget.saturating_sub(owned);
            spread_dice(board, seat.player, extra, dice);
        }
    }
}

/// Fisher-Yates shuffle of `0..count` driven by the dice roller.
fn shuffled_ids(count: usize, dice: &mut dyn DiceRoller) -> Vec<usize> {
    let mut ids: Vec<usize> = (0..count).collect();
    for i in (1..count).rev() {
        let j = dice.choose(i + 1);
        ids.swap(i, j);
    }
    ids
}

/// Adds up to `amount` dice to random non-full territories of `player`.
/// Returns how many were placed.
pub(crate) fn spread_dice(
    board: &mut Board,
    player: PlayerId,
    amount: usize,
    dice: &mut dyn DiceRoller,
) -> usize {
    let mut placed = 0;
    while placed < amount {
        let open: Vec<usize> = board
            .owned_by(player)
            .filter(|&id| board.territory(id).is_some_and(|t| !t.is_full()))
            .collect();
        if open.is_empty() {
            break;
        }
        let pick = open[dice.choose(open.len())];
        if let Some(t) = board.territory_mut(pick) {
            t.add_die();
        }
        placed += 1;
    }
    placed
}
