//! Core building blocks: players, minion identity, RNG, clocks, configuration.
//!
//! Nothing in here knows about taverns or minions beyond their ids. The
//! tavern, pool and orchestrator are configured through `TavernConfig` and
//! `GameConfig` rather than by editing constants.

pub mod clock;
pub mod config;
pub mod entity;
pub mod player;
pub mod rng;

pub use clock::CountdownClock;
pub use config::{GameConfig, GoldSchedule, TavernConfig};
pub use entity::{EntityAllocator, EntityId};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
