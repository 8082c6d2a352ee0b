//! Keyword abilities and buffs.
//!
//! `Abilities` is a small bitset over the five keywords the combat engine
//! understands. A `Buff` is a stat and keyword delta stacked on a minion
//! instance; buffs are lost when the minion goes back to the pool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Set of keyword abilities.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abilities(u8);

impl Abilities {
    pub const NONE: Self = Self(0);
    pub const TAUNT: Self = Self(1);
    pub const DIVINE_SHIELD: Self = Self(1 << 1);
    pub const POISONOUS: Self = Self(1 << 2);
    pub const WINDFURY: Self = Self(1 << 3);
    pub const REBORN: Self = Self(1 << 4);

    /// Every keyword with its display name, in rendering order.
    const NAMED: [(Self, &'static str); 5] = [
        (Self::TAUNT, "taunt"),
        (Self::DIVINE_SHIELD, "divine shield"),
        (Self::POISONOUS, "poisonous"),
        (Self::WINDFURY, "windfury"),
        (Self::REBORN, "reborn"),
    ];

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether every keyword in `other` is present.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Parse a keyword name.
    ///
    /// Accepts display names (`"divine shield"`) and catalog mechanic tags
    /// (`"DIVINE_SHIELD"`). Unknown names yield `None`.
    ///
    /// ```
    /// use tavern_sim::cards::Abilities;
    ///
    /// assert_eq!(Abilities::from_name("DIVINE_SHIELD"), Some(Abilities::DIVINE_SHIELD));
    /// assert_eq!(Abilities::from_name("Taunt"), Some(Abilities::TAUNT));
    /// assert_eq!(Abilities::from_name("BATTLECRY"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('_', " ").to_lowercase();
        Self::NAMED
            .iter()
            .find(|(_, n)| *n == normalized)
            .map(|(flag, _)| *flag)
    }

    /// Names of the keywords present, in rendering order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMED
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for Abilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Abilities {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for Abilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.names().collect();
        write!(f, "{}", names.join(", "))
    }
}

impl fmt::Debug for Abilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Abilities({})", self)
    }
}

/// Stat and keyword bonus applied to a single minion instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Buff {
    pub attack: i32,
    pub health: i32,
    pub abilities: Abilities,
}

impl Buff {
    #[must_use]
    pub const fn new(attack: i32, health: i32) -> Self {
        Self {
            attack,
            health,
            abilities: Abilities::NONE,
        }
    }

    #[must_use]
    pub const fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }
}
