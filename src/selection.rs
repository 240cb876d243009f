//! Selection layer.
//!
//! Tracks the transient `selected` / `selectable` flags that sit on top of
//! every territory, and classifies an incoming selection request against the
//! current phase. The game owns a `Selection` and recomputes it whenever the
//! active selection or phase changes; renderers only read the flags.

use crate::board::{Board, PlayerId, TerritoryId};

/// Flags a renderer reads for one territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    pub selected: bool,
    pub selectable: bool,
}

/// What a selection request means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequest {
    /// Not a legal target; nothing happens.
    Ignored,
    /// Pick an attacking territory.
    Select(TerritoryId),
    /// Click the selected territory again to back out.
    Cancel(TerritoryId),
    /// Attack `defender` from the selected territory.
    Attack {
        attacker: TerritoryId,
        defender: TerritoryId,
    },
    /// Add a reinforcement die.
    Reinforce(TerritoryId),
}

/// Which targets the current phase offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Attack phase: sources first, then targets.
    Attack,
    /// Manual reinforcement with dice left to place.
    Reinforce,
    /// Nothing can be clicked.
    Locked,
}

/// Selection state for a whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selected: Option<TerritoryId>,
    selectable: Vec<bool>,
    mode: SelectionMode,
}

impl Selection {
    /// Creates a locked selection for `len` territories.
    pub fn new(len: usize) -> Self {
        Selection {
            selected: None,
            selectable: vec![false; len],
            mode: SelectionMode::Locked,
        }
    }

    pub fn selected(&self) -> Option<TerritoryId> {
        self.selected
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_selected(&self, id: TerritoryId) -> bool {
        self.selected == Some(id)
    }

    pub fn is_selectable(&self, id: TerritoryId) -> bool {
        self.selectable.get(id).copied().unwrap_or(false)
    }

    pub fn flags(&self, id: TerritoryId) -> SelectionFlags {
        SelectionFlags {
            selected: self.is_selected(id),
            selectable: self.is_selectable(id),
        }
    }

    /// Ids currently marked selectable, ascending.
    pub fn selectable_ids(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.selectable
            .iter()
            .enumerate()
            .filter(|(_, &s)| s)
            .map(|(id, _)| id)
    }

    /// Interprets a click on `target`.
    pub fn classify(&self, target: TerritoryId) -> SelectionRequest {
        if self.selected == Some(target) {
            return SelectionRequest::Cancel(target);
        }
        if !self.is_selectable(target) {
            return SelectionRequest::Ignored;
        }
        match (self.mode, self.selected) {
            (SelectionMode::Attack, None) => SelectionRequest::Select(target),
            (SelectionMode::Attack, Some(attacker)) => SelectionRequest::Attack {
                attacker,
                defender: target,
            },
            (SelectionMode::Reinforce, _) => SelectionRequest::Reinforce(target),
            (SelectionMode::Locked, _) => SelectionRequest::Ignored,
        }
    }

    /// Clears the selection and offers `player`'s attack sources.
    pub(crate) fn offer_attack_sources(&mut self, board: &Board, player: PlayerId) {
        self.reset(board.len(), SelectionMode::Attack);
        for id in attack_sources(board, player) {
            self.selectable[id] = true;
        }
    }

    /// Marks `source` selected and offers its attack targets.
    pub(crate) fn select_attacker(&mut self, board: &Board, source: TerritoryId) {
        self.reset(board.len(), SelectionMode::Attack);
        self.selected = Some(source);
        for id in attack_targets(board, source) {
            self.selectable[id] = true;
        }
    }

    /// Offers every non-full territory of `player` for manual placement.
    pub(crate) fn offer_reinforcements(&mut self, board: &Board, player: PlayerId) {
        self.reset(board.len(), SelectionMode::Reinforce);
        for id in board.owned_by(player) {
            if board.territory(id).is_some_and(|t| !t.is_full()) {
                self.selectable[id] = true;
            }
        }
    }

    /// Clears everything; nothing is clickable.
    pub(crate) fn lock(&mut self, len: usize) {
        self.reset(len, SelectionMode::Locked);
    }

    fn reset(&mut self, len: usize, mode: SelectionMode) {
        self.selected = None;
        self.selectable.clear();
        self.selectable.resize(len, false);
        self.mode = mode;
    }
}

/// Territories `player` can attack from: owned, with at least two dice.
pub fn attack_sources(board: &Board, player: PlayerId) -> Vec<TerritoryId> {
    board
        .owned_by(player)
        .filter(|&id| board.territory(id).is_some_and(|t| t.dice() >= 2))
        .collect()
}

/// Enemy (or colorless) territories adjacent to `source`.
pub fn attack_targets(board: &Board, source: TerritoryId) -> Vec<TerritoryId> {
    let Some(owner) = board.territory(source).and_then(|t| t.owner()) else {
        return Vec::new();
    };
    board
        .territories_adjacent_to(source)
        .iter()
        .copied()
        .filter(|&id| board.territory(id).is_some_and(|t| !t.is_owned_by(owner)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{FactionColor, GridTopology, Territory};
    use std::sync::Arc;

    // 2x2:
    // R3 B1
    // R1 -2
    fn board() -> Board {
        Board::with_territories(
            Arc::new(GridTopology::new(2, 2)),
            vec![
                Territory::owned(PlayerId(0), FactionColor::Red, 3),
                Territory::owned(PlayerId(1), FactionColor::Blue, 1),
                Territory::owned(PlayerId(0), FactionColor::Red, 1),
                Territory::colorless(2),
            ],
        )
        .unwrap()
    }

    #[test]
    fn sources_need_two_dice() {
        let b = board();
        assert_eq!(attack_sources(&b, PlayerId(0)), vec![0]);
        assert!(attack_sources(&b, PlayerId(1)).is_empty());
    }

    #[test]
    fn targets_are_adjacent_non_own() {
        let b = board();
        assert_eq!(attack_targets(&b, 0), vec![1]);
        // From 2: neighbors 0 (own) and 3 (colorless)
        assert_eq!(attack_targets(&b, 2), vec![3]);
        // Colorless territories never attack
        assert!(attack_targets(&b, 3).is_empty());
    }

    #[test]
    fn classify_walks_the_attack_flow() {
        let b = board();
        let mut sel = Selection::new(b.len());
        assert_eq!(sel.classify(0), SelectionRequest::Ignored);

        sel.offer_attack_sources(&b, PlayerId(0));
        assert_eq!(sel.classify(2), SelectionRequest::Ignored);
        assert_eq!(sel.classify(0), SelectionRequest::Select(0));

        sel.select_attacker(&b, 0);
        assert!(sel.flags(0).selected);
        assert!(!sel.flags(0).selectable);
        assert_eq!(sel.selectable_ids().collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            sel.classify(1),
            SelectionRequest::Attack {
                attacker: 0,
                defender: 1
            }
        );
        assert_eq!(sel.classify(0), SelectionRequest::Cancel(0));
        assert_eq!(sel.classify(3), SelectionRequest::Ignored);
    }

    #[test]
    fn at_most_one_selected() {
        let b = board();
        let mut sel = Selection::new(b.len());
        sel.select_attacker(&b, 0);
        sel.select_attacker(&b, 2);
        let selected = (0..b.len()).filter(|&id| sel.is_selected(id)).count();
        assert_eq!(selected, 1);
        assert_eq!(sel.selected(), Some(2));
    }

    #[test]
    fn reinforcement_targets_skip_full_stacks() {
        let mut b = board();
        b.territory_mut(0).unwrap().set_dice(crate::board::MAX_DICE);
        let mut sel = Selection::new(b.len());
        sel.offer_reinforcements(&b, PlayerId(0));
        assert_eq!(sel.mode(), SelectionMode::Reinforce);
        assert_eq!(sel.selectable_ids().collect::<Vec<_>>(), vec![2]);
        assert_eq!(sel.classify(2), SelectionRequest::Reinforce(2));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let b = board();
        let mut sel = Selection::new(b.len());
        sel.offer_attack_sources(&b, PlayerId(0));
        assert_eq!(sel.classify(42), SelectionRequest::Ignored);
        sel.lock(b.len());
        assert_eq!(sel.classify(0), SelectionRequest::Ignored);
    }
}
