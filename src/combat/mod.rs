//! Interface to the external combat engine.
//!
//! The simulator only runs the recruit phase. Battles are resolved by an
//! engine behind the `CombatSimulator` trait, which receives two board
//! snapshots and a trial count and returns averaged `Battle` statistics.
//!
//! ## Key Types
//!
//! - `Battle`: outcome statistics, invertible to the enemy's point of view
//! - `BoardSnapshot` / `MinionSnapshot`: what the engine sees of a board
//! - `TextProtocolEngine`: adapter for engines speaking the text protocol
//!
//! Any `FnMut(&BoardSnapshot, &BoardSnapshot, u32) -> Result<Battle>` is a
//! simulator, which keeps test doubles short.

pub mod battle;
pub mod protocol;
pub mod snapshot;

pub use battle::Battle;
pub use protocol::{battle_to_commands, board_to_commands, TextProtocolEngine};
pub use snapshot::{BoardSnapshot, MinionSnapshot};

use crate::error::Result;

/// Resolves battles between two boards.
pub trait CombatSimulator {
    /// Simulate `trials` battles and return the averaged statistics from
    /// `friendly`'s point of view.
    fn simulate(
        &mut self,
        friendly: &BoardSnapshot,
        enemy: &BoardSnapshot,
        trials: u32,
    ) -> Result<Battle>;
}

impl<F> CombatSimulator for F
where
    F: FnMut(&BoardSnapshot, &BoardSnapshot, u32) -> Result<Battle>,
{
    fn simulate(
        &mut self,
        friendly: &BoardSnapshot,
        enemy: &BoardSnapshot,
        trials: u32,
    ) -> Result<Battle> {
        self(friendly, enemy, trials)
    }
}
