//! Attribute filters over minions.
//!
//! Every field left as `None` matches anything. Used for pool lookups and
//! board queries such as "all golden Murlocs".

use serde::{Deserialize, Serialize};

use super::ability::Abilities;
use super::definition::{MinionDefinition, MinionRace};
use super::minion::Minion;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionFilter {
    pub name: Option<String>,
    pub is_golden: Option<bool>,
    pub tier: Option<u8>,
    pub max_tier: Option<u8>,
    pub race: Option<MinionRace>,
    /// Every keyword listed must be present.
    pub abilities: Option<Abilities>,
}

impl MinionFilter {
    /// A filter that matches every minion.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Match a non-golden minion by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            is_golden: Some(false),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn golden(mut self, is_golden: bool) -> Self {
        self.is_golden = Some(is_golden);
        self
    }

    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = Some(tier);
        self
    }

    #[must_use]
    pub fn with_max_tier(mut self, max_tier: u8) -> Self {
        self.max_tier = Some(max_tier);
        self
    }

    #[must_use]
    pub fn with_race(mut self, race: MinionRace) -> Self {
        self.race = Some(race);
        self
    }

    #[must_use]
    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = Some(abilities);
        self
    }

    #[must_use]
    pub fn matches(&self, minion: &Minion) -> bool {
        self.matches_fields(
            &minion.name,
            minion.is_golden,
            minion.tier,
            minion.race,
            minion.current_abilities(),
        )
    }

    #[must_use]
    pub fn matches_definition(&self, definition: &MinionDefinition) -> bool {
        self.matches_fields(
            &definition.name,
            definition.is_golden,
            definition.tier,
            definition.race,
            definition.abilities,
        )
    }

    fn matches_fields(
        &self,
        name: &str,
        is_golden: bool,
        tier: u8,
        race: Option<MinionRace>,
        abilities: Abilities,
    ) -> bool {
        self.name.as_deref().map_or(true, |n| n == name)
            && self.is_golden.map_or(true, |g| g == is_golden)
            && self.tier.map_or(true, |t| t == tier)
            && self.max_tier.map_or(true, |t| tier <= t)
            && self
                .race
                .map_or(true, |r| race.map_or(false, |own| own.counts_as(r)))
            && self.abilities.map_or(true, |a| abilities.contains(a))
    }
}
