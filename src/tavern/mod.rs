//! Per-player tavern state.
//!
//! ## Key Types
//!
//! - `TavernBoard`: gold, tier, hero health and the hand/board/recruit slots
//! - `HookRegistry`: card effects keyed by card name and `MinionEvent`
//! - `CostOverride`: temporary refresh cost or upgrade discount

pub mod board;
pub mod cost;
pub mod hooks;

pub use board::TavernBoard;
pub use cost::CostOverride;
pub use hooks::{HookContext, HookHandler, HookRegistry, MinionEvent, SlotRef};
