//! Minion instances.
//!
//! A `Minion` is one physical copy of a card. It lives in exactly one
//! container at a time (pool, recruit slot, hand slot, board slot) and keeps
//! its `EntityId` and buffs while it moves. `fresh_copy` is the clone
//! operation used when a transfer asks for a copy: new identity, no buffs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use super::ability::{Abilities, Buff};
use super::definition::{CardId, MinionDefinition, MinionRace};
use crate::core::EntityId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minion {
    pub id: EntityId,
    pub card_id: CardId,
    pub name: String,
    pub tier: u8,
    pub race: Option<MinionRace>,
    pub base_attack: i32,
    pub base_health: i32,
    pub is_golden: bool,
    pub is_token: bool,
    pub base_abilities: Abilities,
    buffs: SmallVec<[Buff; 2]>,
}

impl Minion {
    /// Create an unbuffed minion from its definition.
    #[must_use]
    pub fn new(id: EntityId, definition: &MinionDefinition) -> Self {
        Self {
            id,
            card_id: definition.id,
            name: definition.name.clone(),
            tier: definition.tier,
            race: definition.race,
            base_attack: definition.attack,
            base_health: definition.health,
            is_golden: definition.is_golden,
            is_token: definition.is_token,
            base_abilities: definition.abilities,
            buffs: SmallVec::new(),
        }
    }

    /// Attack including buffs.
    #[must_use]
    pub fn current_attack(&self) -> i32 {
        self.base_attack + self.buffs.iter().map(|b| b.attack).sum::<i32>()
    }

    /// Health including buffs.
    #[must_use]
    pub fn current_health(&self) -> i32 {
        self.base_health + self.buffs.iter().map(|b| b.health).sum::<i32>()
    }

    /// Base keywords plus every keyword granted by a buff.
    #[must_use]
    pub fn current_abilities(&self) -> Abilities {
        self.buffs
            .iter()
            .fold(self.base_abilities, |acc, b| acc | b.abilities)
    }

    #[must_use]
    pub fn has_ability(&self, ability: Abilities) -> bool {
        self.current_abilities().contains(ability)
    }

    #[must_use]
    pub fn has_race(&self, race: MinionRace) -> bool {
        self.race.map_or(false, |r| r.counts_as(race))
    }

    pub fn add_buff(&mut self, buff: Buff) {
        self.buffs.push(buff);
    }

    #[must_use]
    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn clear_buffs(&mut self) {
        self.buffs.clear();
    }

    /// Unbuffed copy of the same card with a new identity.
    #[must_use]
    pub fn fresh_copy(&self, id: EntityId) -> Self {
        Self {
            id,
            buffs: SmallVec::new(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Minion {
    /// Combat engine descriptor: `<attack>/<health>[ golden] <name>[, <ability>, ...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current_attack(), self.current_health())?;
        if self.is_golden {
            write!(f, " golden")?;
        }
        write!(f, " {}", self.name)?;
        for ability in self.current_abilities().names() {
            write!(f, ", {}", ability)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seer() -> MinionDefinition {
        MinionDefinition::new(CardId::new(7), "Coldlight Seer", 2, 4, 6)
            .with_race(MinionRace::Murloc)
            .golden()
    }

    #[test]
    fn test_buffs_stack() {
        let mut minion = seer().instantiate(EntityId(1));
        minion.add_buff(Buff::new(1, 0).with_abilities(Abilities::TAUNT));
        minion.add_buff(Buff::new(0, 2).with_abilities(Abilities::DIVINE_SHIELD));
        minion.add_buff(Buff::new(2, 2));

        assert_eq!(minion.current_attack(), 7);
        assert_eq!(minion.current_health(), 10);
        assert!(minion.has_ability(Abilities::TAUNT | Abilities::DIVINE_SHIELD));
        assert_eq!(minion.buffs().len(), 3);
    }

    #[test]
    fn test_descriptor() {
        let mut minion = seer().instantiate(EntityId(1));
        assert_eq!(minion.to_string(), "4/6 golden Coldlight Seer");

        minion.add_buff(Buff::new(1, 0).with_abilities(Abilities::TAUNT | Abilities::DIVINE_SHIELD));
        assert_eq!(minion.to_string(), "5/6 golden Coldlight Seer, taunt, divine shield");
    }

    #[test]
    fn test_fresh_copy_drops_buffs() {
        let mut minion = seer().instantiate(EntityId(1));
        minion.add_buff(Buff::new(3, 3));

        let copy = minion.fresh_copy(EntityId(2));
        assert_eq!(copy.id, EntityId(2));
        assert_eq!(copy.card_id, minion.card_id);
        assert!(copy.buffs().is_empty());
        assert_eq!(copy.current_attack(), 4);
        assert_ne!(copy, minion);
    }

    #[test]
    fn test_race_queries() {
        let minion = seer().instantiate(EntityId(1));
        assert!(minion.has_race(MinionRace::Murloc));
        assert!(!minion.has_race(MinionRace::Beast));
    }
}
