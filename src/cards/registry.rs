//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every minion definition known to a game and
//! indexes them by `CardId` and by `(name, is_golden)`.

use rustc_hash::FxHashMap;

use super::definition::{CardId, MinionDefinition};

/// Registry of minion definitions.
///
/// ## Example
///
/// ```
/// use tavern_sim::cards::{CardRegistry, MinionDefinition};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.next_id();
/// registry.register(MinionDefinition::new(id, "Alleycat", 1, 1, 1));
///
/// let found = registry.lookup("Alleycat", false).unwrap();
/// assert_eq!(found.id, id);
/// assert!(registry.lookup("Alleycat", true).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, MinionDefinition>,
    by_name: FxHashMap<(String, bool), CardId>,
    next_id: u32,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next unused `CardId`.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a minion definition.
    ///
    /// Panics if a card with the same ID, or the same name and golden flag,
    /// already exists.
    pub fn register(&mut self, card: MinionDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        let key = (card.name.clone(), card.is_golden);
        if self.by_name.contains_key(&key) {
            panic!("Card '{}' already registered", card.display_name());
        }
        self.next_id = self.next_id.max(card.id.raw() + 1);
        self.by_name.insert(key, card.id);
        self.cards.insert(card.id, card);
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&MinionDefinition> {
        self.cards.get(&id)
    }

    /// Find a definition by base name and golden flag.
    #[must_use]
    pub fn lookup(&self, name: &str, is_golden: bool) -> Option<&MinionDefinition> {
        self.by_name
            .get(&(name.to_string(), is_golden))
            .and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn contains_name(&self, name: &str, is_golden: bool) -> bool {
        self.by_name.contains_key(&(name.to_string(), is_golden))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in `CardId` order.
    pub fn iter(&self) -> impl Iterator<Item = &MinionDefinition> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_by_key(|c| c.id);
        cards.into_iter()
    }

    /// Definitions matching a predicate, in `CardId` order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &MinionDefinition>
    where
        F: Fn(&MinionDefinition) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }

    /// Definitions that may be offered as recruits: not golden, not tokens.
    pub fn pool_minions(&self) -> impl Iterator<Item = &MinionDefinition> {
        self.find(|c| !c.is_golden && !c.is_token)
    }
}
