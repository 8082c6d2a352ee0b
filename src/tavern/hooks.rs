//! Per-card lifecycle hooks.
//!
//! Card behaviour is not modelled by the tavern itself. Instead, handlers
//! are registered against a card name and a `MinionEvent`; the board looks
//! them up whenever that event happens to a minion with that name and calls
//! them with mutable access to the board.
//!
//! ## Events
//!
//! | Event | Fired on | Slot |
//! |---|---|---|
//! | `Bought` | the bought minion | its hand slot |
//! | `Sold` | the sold minion | `Detached` |
//! | `Played` | the played minion | its board slot |
//! | `Summoned` | the summoned minion | its board slot |
//! | `AnyPlayed` | every other hand/board minion | its own slot |
//! | `AnySummoned` | every other hand/board minion | its own slot |
//! | `NewTurn` / `EndTurn` | every hand/board minion | its own slot |
//!
//! ```
//! use tavern_sim::cards::Buff;
//! use tavern_sim::tavern::{HookRegistry, MinionEvent, SlotRef};
//!
//! let mut hooks = HookRegistry::new();
//! hooks.on("Micro Machine", MinionEvent::NewTurn, |board, ctx| {
//!     if let Some(minion) = board.minion_at_mut(ctx.slot) {
//!         minion.add_buff(Buff::new(1, 0));
//!     }
//! });
//! assert!(hooks.has_handlers("Micro Machine", MinionEvent::NewTurn));
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

use super::board::TavernBoard;
use crate::cards::Minion;

/// Lifecycle events a card can react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionEvent {
    Bought,
    Sold,
    Played,
    Summoned,
    AnyPlayed,
    AnySummoned,
    NewTurn,
    EndTurn,
}

/// Where the hooked minion sits when its handler runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRef {
    Hand(usize),
    Board(usize),
    /// No longer on the board or in hand (e.g. just sold).
    Detached,
}

/// Arguments passed to a hook handler.
#[derive(Clone, Debug)]
pub struct HookContext {
    pub event: MinionEvent,
    /// The hooked minion as it was when the event fired.
    pub minion: Minion,
    pub slot: SlotRef,
    /// For `AnyPlayed` / `AnySummoned`: the minion that was played or summoned.
    pub trigger: Option<Minion>,
}

pub type HookHandler = Rc<dyn Fn(&mut TavernBoard, &HookContext)>;

/// Registry mapping (card name, event) to handlers.
///
/// Golden and regular copies share handlers; a handler reads
/// `ctx.minion.is_golden` to scale its effect.
#[derive(Clone, Default)]
pub struct HookRegistry {
    handlers: FxHashMap<(String, MinionEvent), Vec<HookHandler>>,
}

impl HookRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers for the same key run in registration order.
    pub fn on<F>(&mut self, card: impl Into<String>, event: MinionEvent, handler: F) -> &mut Self
    where
        F: Fn(&mut TavernBoard, &HookContext) + 'static,
    {
        self.register(card, event, Rc::new(handler))
    }

    pub fn register(
        &mut self,
        card: impl Into<String>,
        event: MinionEvent,
        handler: HookHandler,
    ) -> &mut Self {
        self.handlers
            .entry((card.into(), event))
            .or_default()
            .push(handler);
        self
    }

    /// Handlers for a card and event, cloned so the caller can run them
    /// while mutating the board.
    #[must_use]
    pub fn handlers(&self, card: &str, event: MinionEvent) -> Vec<HookHandler> {
        self.handlers
            .get(&(card.to_string(), event))
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_handlers(&self, card: &str, event: MinionEvent) -> bool {
        self.handlers.contains_key(&(card.to_string(), event))
    }

    /// Number of (card, event) keys with at least one handler.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Merge another registry's handlers into this one.
    pub fn extend(&mut self, other: HookRegistry) {
        for (key, handlers) in other.handlers {
            self.handlers.entry(key).or_default().extend(handlers);
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.handlers.keys().collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));
        f.debug_struct("HookRegistry").field("keys", &keys).finish()
    }
}
