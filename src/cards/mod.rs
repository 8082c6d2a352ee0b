//! Card system: definitions, instances, registry and catalog ingestion.
//!
//! ## Key Types
//!
//! - `MinionDefinition`: static card data (tier, race, base stats, keywords)
//! - `Minion`: one physical copy of a card, with its own identity and buffs
//! - `CardRegistry`: definition lookup by id or by name and golden flag
//! - `MinionFilter`: attribute filter used by pool and board queries
//!
//! Golden and regular copies of a card share a name and are told apart by
//! `is_golden`. Tokens are created by effects and never enter the pool.

pub mod ability;
pub mod catalog;
pub mod definition;
pub mod filter;
pub mod minion;
pub mod registry;
pub mod starter;

pub use ability::{Abilities, Buff};
pub use catalog::{load_catalog, load_catalog_from_reader, registry_from_records, CardRecord};
pub use definition::{CardId, MinionDefinition, MinionRace};
pub use filter::MinionFilter;
pub use minion::Minion;
pub use registry::CardRegistry;
pub use starter::{starter_hooks, starter_registry};
