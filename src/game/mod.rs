//! Game orchestration.
//!
//! `BattlegroundsGame` owns every player's tavern and the shared pool,
//! enforces that only one player acts at a time, and resolves rounds by
//! pairing surviving heroes for combat.

pub mod orchestrator;
pub mod report;

pub use orchestrator::{BattlegroundsGame, TurnGuard};
pub use report::{GameResult, RoundBattle, RoundReport};
