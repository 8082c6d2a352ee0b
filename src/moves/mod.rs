//! Moves and their flat integer encoding.
//!
//! A `Move` is an action plus an optional slot index. `MoveEncoding` maps
//! every move to a distinct id in `0..size()`, laid out as
//!
//! ```text
//! 0            Upgrade
//! 1            Refresh
//! 2            Freeze
//! 3 ..         Buy   (one id per recruit slot)
//! 3+R ..       Sell  (one id per board slot)
//! 3+R+B ..     Play  (one id per hand slot)
//! 3+R+B+H      EndTurn
//! ```
//!
//! so a policy network can use a fixed-size output with a legality mask.
//!
//! ```
//! use tavern_sim::moves::{Action, Move, MoveEncoding};
//!
//! let encoding = MoveEncoding::default();
//! assert_eq!(encoding.size(), 27);
//!
//! let id = encoding.to_id(&Move::indexed(Action::Sell, 2)).unwrap();
//! assert_eq!(id, 11);
//! assert_eq!(encoding.from_id(id).unwrap(), Move::indexed(Action::Sell, 2));
//! assert!(encoding.from_id(27).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::TavernConfig;
use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Upgrade,
    Refresh,
    Freeze,
    Buy,
    Sell,
    Play,
    EndTurn,
}

impl Action {
    /// Whether moves with this action name a slot.
    #[must_use]
    pub const fn is_indexed(self) -> bool {
        matches!(self, Action::Buy | Action::Sell | Action::Play)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub action: Action,
    pub index: Option<usize>,
}

impl Move {
    /// A move without a slot (upgrade, refresh, freeze, end turn).
    #[must_use]
    pub const fn simple(action: Action) -> Self {
        Self { action, index: None }
    }

    /// A move on a slot (buy, sell, play).
    #[must_use]
    pub const fn indexed(action: Action, index: usize) -> Self {
        Self {
            action,
            index: Some(index),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{:?}({})", self.action, index),
            None => write!(f, "{:?}", self.action),
        }
    }
}

/// Bijection between moves and integer ids for fixed slot capacities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEncoding {
    pub recruit_slots: usize,
    pub board_slots: usize,
    pub hand_slots: usize,
}

impl Default for MoveEncoding {
    fn default() -> Self {
        Self::from_config(&TavernConfig::default())
    }
}

impl MoveEncoding {
    #[must_use]
    pub const fn new(recruit_slots: usize, board_slots: usize, hand_slots: usize) -> Self {
        Self {
            recruit_slots,
            board_slots,
            hand_slots,
        }
    }

    #[must_use]
    pub fn from_config(config: &TavernConfig) -> Self {
        Self::new(config.max_recruit_size, config.max_board_size, config.max_hand_size)
    }

    /// First id of an action's block.
    #[must_use]
    pub const fn base(&self, action: Action) -> usize {
        match action {
            Action::Upgrade => 0,
            Action::Refresh => 1,
            Action::Freeze => 2,
            Action::Buy => 3,
            Action::Sell => 3 + self.recruit_slots,
            Action::Play => 3 + self.recruit_slots + self.board_slots,
            Action::EndTurn => 3 + self.recruit_slots + self.board_slots + self.hand_slots,
        }
    }

    /// Number of slots addressed by an indexed action, 0 otherwise.
    #[must_use]
    pub const fn slots(&self, action: Action) -> usize {
        match action {
            Action::Buy => self.recruit_slots,
            Action::Sell => self.board_slots,
            Action::Play => self.hand_slots,
            _ => 0,
        }
    }

    /// Total number of ids.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.base(Action::EndTurn) + 1
    }

    /// Largest valid id.
    #[must_use]
    pub const fn max_id(&self) -> usize {
        self.base(Action::EndTurn)
    }

    /// Encode a move.
    ///
    /// Errors if an indexed action is missing its index or the index is out
    /// of range, or if a non-indexed action carries an index.
    pub fn to_id(&self, mv: &Move) -> Result<usize> {
        let base = self.base(mv.action);
        match (mv.action.is_indexed(), mv.index) {
            (true, Some(index)) if index < self.slots(mv.action) => Ok(base + index),
            (true, Some(index)) => Err(GameError::InvalidMove(format!(
                "{:?} index {} out of range 0..{}",
                mv.action,
                index,
                self.slots(mv.action)
            ))),
            (true, None) => Err(GameError::InvalidMove(format!(
                "{:?} requires a slot index",
                mv.action
            ))),
            (false, None) => Ok(base),
            (false, Some(_)) => Err(GameError::InvalidMove(format!(
                "{:?} does not take a slot index",
                mv.action
            ))),
        }
    }

    /// Decode an id. Errors if `id` is past `EndTurn`.
    pub fn from_id(&self, id: usize) -> Result<Move> {
        let max = self.max_id();
        if id > max {
            return Err(GameError::InvalidMoveId { id, max });
        }

        let mv = if id < self.base(Action::Buy) {
            Move::simple([Action::Upgrade, Action::Refresh, Action::Freeze][id])
        } else if id < self.base(Action::Sell) {
            Move::indexed(Action::Buy, id - self.base(Action::Buy))
        } else if id < self.base(Action::Play) {
            Move::indexed(Action::Sell, id - self.base(Action::Sell))
        } else if id < self.base(Action::EndTurn) {
            Move::indexed(Action::Play, id - self.base(Action::Play))
        } else {
            Move::simple(Action::EndTurn)
        };
        Ok(mv)
    }

    /// Boolean mask over all ids, true for each of `moves`.
    ///
    /// Moves that do not encode under this layout are ignored.
    #[must_use]
    pub fn legal_mask(&self, moves: &[Move]) -> Vec<bool> {
        let mut mask = vec![false; self.size()];
        for id in moves.iter().filter_map(|mv| self.to_id(mv).ok()) {
            mask[id] = true;
        }
        mask
    }
}
