//! Minion definitions: static card data.
//!
//! `MinionDefinition` holds the immutable properties of a card, e.g.
//! "Alleycat" is a tier 1, 1/1 Beast. Golden versions are separate
//! definitions with the same name and `is_golden` set.
//!
//! Instance data (entity id, buffs) lives on `Minion`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ability::Abilities;
use super::minion::Minion;
use crate::core::EntityId;

/// Unique identifier for a minion definition.
///
/// This identifies the card (e.g. "Golden Alleycat"), not a copy of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Minion tribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionRace {
    Beast,
    Demon,
    Dragon,
    Elemental,
    Mechanical,
    Murloc,
    Naga,
    Pirate,
    Quilboar,
    /// Counts as every tribe.
    All,
}

impl MinionRace {
    /// Whether a minion of this tribe counts as `other`.
    #[must_use]
    pub fn counts_as(self, other: MinionRace) -> bool {
        self == other || self == MinionRace::All
    }
}

impl FromStr for MinionRace {
    type Err = String;

    /// Parse a catalog race tag such as `"MURLOC"` or `"Mech"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BEAST" => Ok(Self::Beast),
            "DEMON" => Ok(Self::Demon),
            "DRAGON" => Ok(Self::Dragon),
            "ELEMENTAL" => Ok(Self::Elemental),
            "MECH" | "MECHANICAL" => Ok(Self::Mechanical),
            "MURLOC" => Ok(Self::Murloc),
            "NAGA" => Ok(Self::Naga),
            "PIRATE" => Ok(Self::Pirate),
            "QUILBOAR" => Ok(Self::Quilboar),
            "ALL" => Ok(Self::All),
            other => Err(format!("unknown race '{}'", other)),
        }
    }
}

/// Static minion definition.
///
/// ## Example
///
/// ```
/// use tavern_sim::cards::{Abilities, CardId, MinionDefinition, MinionRace};
/// use tavern_sim::core::EntityId;
///
/// let protector = MinionDefinition::new(CardId::new(1), "Righteous Protector", 1, 1, 1)
///     .with_abilities(Abilities::TAUNT | Abilities::DIVINE_SHIELD);
///
/// let minion = protector.instantiate(EntityId(0));
/// assert_eq!(minion.to_string(), "1/1 Righteous Protector, taunt, divine shield");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionDefinition {
    pub id: CardId,
    /// Base name, without any golden prefix.
    pub name: String,
    pub tier: u8,
    pub race: Option<MinionRace>,
    pub attack: i32,
    pub health: i32,
    pub is_golden: bool,
    /// Tokens are only ever summoned, never drawn from the pool.
    pub is_token: bool,
    pub abilities: Abilities,
    pub text: Option<String>,
    pub card_class: Option<String>,
    pub rarity: Option<String>,
    pub cost: Option<u32>,
}

impl MinionDefinition {
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, tier: u8, attack: i32, health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            tier,
            race: None,
            attack,
            health,
            is_golden: false,
            is_token: false,
            abilities: Abilities::NONE,
            text: None,
            card_class: None,
            rarity: None,
            cost: None,
        }
    }

    #[must_use]
    pub fn with_race(mut self, race: MinionRace) -> Self {
        self.race = Some(race);
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn golden(mut self) -> Self {
        self.is_golden = true;
        self
    }

    #[must_use]
    pub fn token(mut self) -> Self {
        self.is_token = true;
        self
    }

    /// Name as shown in a catalog: golden cards carry a `"Golden "` prefix.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_golden {
            format!("Golden {}", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Create an unbuffed copy of this card with the given identity.
    #[must_use]
    pub fn instantiate(&self, id: EntityId) -> Minion {
        Minion::new(id, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_race_parsing() {
        assert_eq!("MURLOC".parse::<MinionRace>(), Ok(MinionRace::Murloc));
        assert_eq!("Mech".parse::<MinionRace>(), Ok(MinionRace::Mechanical));
        assert!("GNOME".parse::<MinionRace>().is_err());
        assert!(MinionRace::All.counts_as(MinionRace::Beast));
        assert!(!MinionRace::Demon.counts_as(MinionRace::Beast));
    }

    #[test]
    fn test_definition_builder() {
        let cat = MinionDefinition::new(CardId::new(3), "Alleycat", 1, 2, 2)
            .with_race(MinionRace::Beast)
            .golden();

        assert_eq!(cat.display_name(), "Golden Alleycat");
        assert_eq!(cat.race, Some(MinionRace::Beast));
        assert!(!cat.is_token);

        let minion = cat.instantiate(EntityId(9));
        assert_eq!(minion.id, EntityId(9));
        assert_eq!(minion.card_id, CardId::new(3));
        assert!(minion.is_golden);
    }

    #[test]
    fn test_definition_serialization() {
        let def = MinionDefinition::new(CardId::new(1), "Micro Machine", 1, 1, 2)
            .with_race(MinionRace::Mechanical)
            .with_text("At the start of each turn, gain +1 Attack.");

        let json = serde_json::to_string(&def).unwrap();
        let back: MinionDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
