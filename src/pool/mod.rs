//! Shared minion pool.
//!
//! One `MinionPool` is shared by every tavern in a game. Recruits are drawn
//! from it without replacement and go back to it when refreshed away or
//! sold, so the total number of copies in circulation is conserved.
//!
//! The pool also holds the card catalog, which is how effects create
//! minions that are never drawable (tokens, golden copies).
//!
//! ```
//! use std::rc::Rc;
//! use tavern_sim::cards::starter_registry;
//! use tavern_sim::core::GameRng;
//! use tavern_sim::pool::MinionPool;
//!
//! let catalog = Rc::new(starter_registry());
//! let mut pool = MinionPool::from_catalog(catalog, &[2, 2, 2, 2, 2, 2], GameRng::new(7));
//! let before = pool.len();
//!
//! let drawn = pool.get_random(3, 1);
//! assert_eq!(drawn.len(), 3);
//! assert!(drawn.iter().all(|m| m.tier == 1));
//!
//! pool.insert(drawn);
//! assert_eq!(pool.len(), before);
//! ```

use im::Vector;
use std::cell::RefCell;
use std::rc::Rc;

use crate::cards::{CardRegistry, Minion, MinionDefinition, MinionFilter};
use crate::core::{EntityAllocator, EntityId, GameRng};

/// A pool handle shared between the boards of one game.
pub type SharedPool = Rc<RefCell<MinionPool>>;

#[derive(Clone, Debug)]
pub struct MinionPool {
    available: Vector<Minion>,
    catalog: Rc<CardRegistry>,
    rng: GameRng,
    entities: EntityAllocator,
}

impl MinionPool {
    /// Create an empty pool over a catalog.
    #[must_use]
    pub fn new(catalog: Rc<CardRegistry>, rng: GameRng) -> Self {
        Self {
            available: Vector::new(),
            catalog,
            rng,
            entities: EntityAllocator::new(),
        }
    }

    /// Create a pool holding `copies_per_tier[tier - 1]` copies of every
    /// drawable card in the catalog. Golden cards and tokens are skipped.
    #[must_use]
    pub fn from_catalog(catalog: Rc<CardRegistry>, copies_per_tier: &[usize], rng: GameRng) -> Self {
        let mut pool = Self::new(Rc::clone(&catalog), rng);
        for definition in catalog.pool_minions() {
            let copies = usize::from(definition.tier)
                .checked_sub(1)
                .and_then(|i| copies_per_tier.get(i))
                .copied()
                .unwrap_or(0);
            for _ in 0..copies {
                let minion = pool.spawn(definition);
                pool.available.push_back(minion);
            }
        }
        log::debug!(
            "Pool built with {} copies of {} cards",
            pool.available.len(),
            catalog.pool_minions().count()
        );
        pool
    }

    /// Wrap the pool for sharing between boards.
    #[must_use]
    pub fn into_shared(self) -> SharedPool {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub fn catalog(&self) -> &CardRegistry {
        &self.catalog
    }

    /// Number of copies currently available.
    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Available copies matching `filter`.
    #[must_use]
    pub fn count(&self, filter: &MinionFilter) -> usize {
        self.available.iter().filter(|m| filter.matches(m)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Minion> {
        self.available.iter()
    }

    /// Allocate an entity id for a minion created outside the pool.
    pub fn alloc_entity(&mut self) -> EntityId {
        self.entities.alloc()
    }

    /// Create an unbuffed copy of `definition` with a fresh identity.
    pub fn spawn(&mut self, definition: &MinionDefinition) -> Minion {
        definition.instantiate(self.entities.alloc())
    }

    /// Create an unbuffed copy of `minion` with a fresh identity.
    pub fn copy_of(&mut self, minion: &Minion) -> Minion {
        minion.fresh_copy(self.entities.alloc())
    }

    /// Return minions to the pool. Buffs are stripped; tokens are discarded.
    ///
    /// Returns the number of minions that became available again.
    pub fn insert(&mut self, minions: impl IntoIterator<Item = Minion>) -> usize {
        let mut inserted = 0;
        for minion in minions {
            if self.insert_one(minion) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Return a single minion to the pool. Returns false for tokens.
    pub fn insert_one(&mut self, mut minion: Minion) -> bool {
        if minion.is_token {
            log::trace!("Discarding token {} instead of returning it to the pool", minion.name);
            return false;
        }
        minion.clear_buffs();
        self.available.push_back(minion);
        true
    }

    /// Draw up to `n` distinct copies with `tier <= max_tier`, uniformly at
    /// random and without replacement. Fewer are returned only when fewer are
    /// eligible.
    pub fn get_random(&mut self, n: usize, max_tier: u8) -> Vec<Minion> {
        let eligible: Vec<usize> = self
            .available
            .iter()
            .enumerate()
            .filter(|(_, m)| m.tier <= max_tier)
            .map(|(i, _)| i)
            .collect();

        let positions: Vec<usize> = self
            .rng
            .sample_indices(eligible.len(), n)
            .into_iter()
            .map(|i| eligible[i])
            .collect();
        let drawn: Vec<Minion> = positions.iter().map(|&p| self.available[p].clone()).collect();

        let mut descending = positions;
        descending.sort_unstable_by(|a, b| b.cmp(a));
        for position in descending {
            self.available.remove(position);
        }
        drawn
    }

    /// First available copy matching `filter`. Does not remove it.
    #[must_use]
    pub fn find(&self, filter: &MinionFilter) -> Option<&Minion> {
        self.available.iter().find(|m| filter.matches(m))
    }

    /// Create a new copy of the first catalog card matching `filter`.
    ///
    /// The copy does not come out of the pool, so this is how tokens and
    /// golden minions enter play.
    pub fn create(&mut self, filter: &MinionFilter) -> Option<Minion> {
        let catalog = Rc::clone(&self.catalog);
        let definition = catalog.find(|d| filter.matches_definition(d)).next()?;
        Some(self.spawn(definition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{starter_registry, Buff};

    fn pool() -> MinionPool {
        MinionPool::from_catalog(Rc::new(starter_registry()), &[3, 3, 3, 3, 3, 3], GameRng::new(42))
    }

    #[test]
    fn test_from_catalog_skips_golden_and_tokens() {
        let pool = pool();
        assert!(pool.len() > 0);
        assert!(pool.iter().all(|m| !m.is_golden && !m.is_token));
        assert_eq!(pool.count(&MinionFilter::named("Alleycat")), 3);
        assert_eq!(pool.count(&MinionFilter::named("Tabbycat")), 0);
    }

    #[test]
    fn test_get_random_respects_tier_and_conserves() {
        let mut pool = pool();
        let before = pool.len();
        let drawn = pool.get_random(5, 2);

        assert_eq!(drawn.len(), 5);
        assert!(drawn.iter().all(|m| m.tier <= 2));
        assert_eq!(pool.len(), before - 5);

        let mut ids: Vec<_> = drawn.iter().map(|m| m.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
        assert!(pool.iter().all(|m| !ids.contains(&m.id)));

        assert_eq!(pool.insert(drawn), 5);
        assert_eq!(pool.len(), before);
    }

    #[test]
    fn test_get_random_exhausts_eligible() {
        let mut pool = pool();
        let tier_one = pool.count(&MinionFilter::any().with_max_tier(1));

        let drawn = pool.get_random(1000, 1);
        assert_eq!(drawn.len(), tier_one);
        assert!(pool.get_random(3, 1).is_empty());
        assert!(pool.get_random(0, 6).is_empty());
    }

    #[test]
    fn test_insert_strips_buffs_and_drops_tokens() {
        let mut pool = pool();
        let before = pool.len();

        let mut cat = pool.create(&MinionFilter::named("Alleycat")).unwrap();
        cat.add_buff(Buff::new(2, 2));
        let token = pool.create(&MinionFilter::named("Tabbycat")).unwrap();

        assert_eq!(pool.insert(vec![cat.clone(), token]), 1);
        assert_eq!(pool.len(), before + 1);

        let returned = pool.iter().find(|m| m.id == cat.id).unwrap();
        assert!(returned.buffs().is_empty());
    }

    #[test]
    fn test_find_does_not_remove() {
        let pool = pool();
        let before = pool.len();
        let found = pool.find(&MinionFilter::named("Cave Hydra")).unwrap();
        assert_eq!(found.name, "Cave Hydra");
        assert_eq!(pool.len(), before);
        assert!(pool.find(&MinionFilter::named("Eamon Ma")).is_none());
    }

    #[test]
    fn test_create_golden_and_fresh_ids() {
        let mut pool = pool();
        let a = pool.create(&MinionFilter::named("Alleycat").golden(true)).unwrap();
        let b = pool.create(&MinionFilter::named("Alleycat").golden(true)).unwrap();
        assert!(a.is_golden);
        assert_ne!(a.id, b.id);
        assert!(pool.iter().all(|m| m.id != a.id && m.id != b.id));
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = pool();
        let mut b = pool();
        let names = |ms: Vec<Minion>| ms.into_iter().map(|m| m.name).collect::<Vec<_>>();
        assert_eq!(names(a.get_random(6, 6)), names(b.get_random(6, 6)));
    }
}
