//! Board snapshots handed to a combat engine.
//!
//! A snapshot carries only what combat needs: tier, hero health and the
//! occupied board slots in order, with buffs already folded into the stats.
//! `to_bytes`/`from_bytes` use bincode for engines running out of process.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::{Abilities, Minion};
use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionSnapshot {
    pub name: String,
    pub attack: i32,
    pub health: i32,
    pub is_golden: bool,
    pub taunt: bool,
    pub divine_shield: bool,
    pub poisonous: bool,
    pub windfury: bool,
    pub reborn: bool,
}

impl MinionSnapshot {
    #[must_use]
    pub fn abilities(&self) -> Abilities {
        [
            (self.taunt, Abilities::TAUNT),
            (self.divine_shield, Abilities::DIVINE_SHIELD),
            (self.poisonous, Abilities::POISONOUS),
            (self.windfury, Abilities::WINDFURY),
            (self.reborn, Abilities::REBORN),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(Abilities::NONE, |acc, (_, a)| acc | a)
    }
}

impl From<&Minion> for MinionSnapshot {
    fn from(minion: &Minion) -> Self {
        let abilities = minion.current_abilities();
        Self {
            name: minion.name.clone(),
            attack: minion.current_attack(),
            health: minion.current_health(),
            is_golden: minion.is_golden,
            taunt: abilities.contains(Abilities::TAUNT),
            divine_shield: abilities.contains(Abilities::DIVINE_SHIELD),
            poisonous: abilities.contains(Abilities::POISONOUS),
            windfury: abilities.contains(Abilities::WINDFURY),
            reborn: abilities.contains(Abilities::REBORN),
        }
    }
}

impl fmt::Display for MinionSnapshot {
    /// Same descriptor format as `Minion`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.attack, self.health)?;
        if self.is_golden {
            write!(f, " golden")?;
        }
        write!(f, " {}", self.name)?;
        for ability in self.abilities().names() {
            write!(f, ", {}", ability)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub tavern_tier: u8,
    pub hero_health: i32,
    pub minions: Vec<MinionSnapshot>,
}

impl BoardSnapshot {
    /// Snapshot the occupied slots of a board, left to right.
    #[must_use]
    pub fn new<'a>(
        tavern_tier: u8,
        hero_health: i32,
        board: impl IntoIterator<Item = &'a Option<Minion>>,
    ) -> Self {
        Self {
            tavern_tier,
            hero_health,
            minions: board
                .into_iter()
                .flatten()
                .map(MinionSnapshot::from)
                .collect(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }
}
