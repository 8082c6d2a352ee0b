//! # tavern-sim
//!
//! Recruit-phase simulator for an auto-battler, built for RL and search
//! training loops.
//!
//! ## Design Principles
//!
//! 1. **Recruit phase only**: Combat is delegated to an external engine
//!    behind `CombatSimulator`. The simulator owns the economy, the shared
//!    pool and the round structure.
//!
//! 2. **N-Player First**: Per-player state lives in `PlayerMap`; the
//!    orchestrator pairs however many heroes are alive.
//!
//! 3. **Reproducible**: All randomness (pool draws, board sampling, round
//!    pairing) flows from forked `GameRng` streams seeded by `GameConfig`.
//!
//! ## Architecture
//!
//! - **Shared Pool**: One `MinionPool` per game, shared by every board.
//!   Copies are drawn without replacement and returned on sell/refresh.
//!
//! - **Card Hooks**: Card effects are closures registered per card name and
//!   lifecycle event, with mutable access to the board they fire on.
//!
//! - **Flat Moves**: Every tavern action maps to an id in `0..size()` so a
//!   policy can use a fixed output layer with a legality mask.
//!
//! ## Modules
//!
//! - `core`: Player ids, entity ids, RNG, countdown clock, configuration
//! - `cards`: Minion definitions, instances, registry, catalog, starter set
//! - `pool`: Shared minion pool
//! - `tavern`: Per-player board state machine and card hooks
//! - `moves`: Moves and their integer encoding
//! - `combat`: Battle statistics, snapshots and the engine text protocol
//! - `game`: Turn locking and elimination rounds

pub mod cards;
pub mod combat;
pub mod core;
pub mod error;
pub mod game;
pub mod moves;
pub mod pool;
pub mod tavern;

// Re-export commonly used types
pub use crate::core::{
    CountdownClock, EntityId, GameConfig, GameRng, GameRngState, GoldSchedule, PlayerId,
    PlayerMap, TavernConfig,
};

pub use crate::cards::{
    load_catalog, starter_hooks, starter_registry, Abilities, Buff, CardId, CardRegistry,
    Minion, MinionDefinition, MinionFilter, MinionRace,
};

pub use crate::pool::{MinionPool, SharedPool};

pub use crate::tavern::{HookContext, HookRegistry, MinionEvent, SlotRef, TavernBoard};

pub use crate::moves::{Action, Move, MoveEncoding};

pub use crate::combat::{Battle, BoardSnapshot, CombatSimulator, MinionSnapshot, TextProtocolEngine};

pub use crate::game::{BattlegroundsGame, GameResult, RoundReport, TurnGuard};

pub use crate::error::{GameError, Result};
