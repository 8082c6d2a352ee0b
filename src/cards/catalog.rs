//! Card catalog ingestion.
//!
//! Reads a JSON array of card records in the HearthstoneJSON shape and
//! builds a `CardRegistry`. Records without a `name` or a tavern `tier`
//! are skipped. Golden cards are recognised either by `is_golden` or by a
//! `"Golden "` name prefix, and are stored under their base name.

use serde::{Deserialize, Serialize};
use std::io::Read;

use super::ability::Abilities;
use super::definition::{CardId, MinionDefinition, MinionRace};
use super::registry::CardRegistry;
use crate::error::{GameError, Result};

const GOLDEN_PREFIX: &str = "Golden ";

/// One raw card record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRecord {
    pub name: Option<String>,
    pub text: Option<String>,
    pub race: Option<String>,
    #[serde(rename = "cardClass")]
    pub card_class: Option<String>,
    pub rarity: Option<String>,
    #[serde(alias = "techLevel")]
    pub tier: Option<u8>,
    pub attack: Option<i32>,
    pub health: Option<i32>,
    pub cost: Option<u32>,
    pub is_golden: bool,
    pub is_token: bool,
    #[serde(rename = "isBattlegroundsPoolMinion")]
    pub pool_minion: Option<bool>,
    pub mechanics: Vec<String>,
}

impl CardRecord {
    /// Convert to a definition, or `None` if the record is not a tavern minion.
    #[must_use]
    pub fn into_definition(self, id: CardId) -> Option<MinionDefinition> {
        let raw_name = self.name?;
        let tier = self.tier?;

        let (name, prefixed) = match raw_name.strip_prefix(GOLDEN_PREFIX) {
            Some(base) => (base.to_string(), true),
            None => (raw_name, false),
        };

        let race = self.race.as_deref().and_then(|r| match r.parse::<MinionRace>() {
            Ok(race) => Some(race),
            Err(e) => {
                log::debug!("Card '{}': {}", name, e);
                None
            }
        });

        let abilities = self
            .mechanics
            .iter()
            .filter_map(|m| Abilities::from_name(m))
            .fold(Abilities::NONE, |acc, a| acc | a);

        Some(MinionDefinition {
            id,
            name,
            tier,
            race,
            attack: self.attack.unwrap_or(0),
            health: self.health.unwrap_or(0),
            is_golden: self.is_golden || prefixed,
            is_token: self.is_token || self.pool_minion == Some(false),
            abilities,
            text: self.text,
            card_class: self.card_class,
            rarity: self.rarity,
            cost: self.cost,
        })
    }
}

/// Build a registry from parsed records.
///
/// Later duplicates of the same name and golden flag are ignored.
#[must_use]
pub fn registry_from_records(records: Vec<CardRecord>) -> CardRegistry {
    let mut registry = CardRegistry::new();
    let mut skipped = 0usize;

    for record in records {
        let label = record.name.clone().unwrap_or_else(|| "<unnamed>".into());
        let id = CardId::new(registry.len() as u32);
        let Some(def) = record.into_definition(id) else {
            log::debug!("Skipping catalog record '{}': missing name or tier", label);
            skipped += 1;
            continue;
        };
        if registry.contains_name(&def.name, def.is_golden) {
            log::debug!("Skipping duplicate catalog record '{}'", def.display_name());
            skipped += 1;
            continue;
        }
        registry.register(def);
    }

    log::debug!(
        "Loaded {} catalog cards ({} records skipped)",
        registry.len(),
        skipped
    );
    registry
}

/// Parse a JSON catalog string.
pub fn load_catalog(json: &str) -> Result<CardRegistry> {
    let records: Vec<CardRecord> =
        serde_json::from_str(json).map_err(|e| GameError::Catalog(e.to_string()))?;
    Ok(registry_from_records(records))
}

/// Parse a JSON catalog from any reader, e.g. an open file.
pub fn load_catalog_from_reader(reader: impl Read) -> Result<CardRegistry> {
    let records: Vec<CardRecord> =
        serde_json::from_reader(reader).map_err(|e| GameError::Catalog(e.to_string()))?;
    Ok(registry_from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"name": "Alleycat", "text": "<b>Battlecry:</b> Summon a 1/1 Cat.", "race": "BEAST",
         "cardClass": "NEUTRAL", "rarity": "COMMON", "tier": 1, "attack": 1, "health": 1, "cost": 1},
        {"name": "Golden Alleycat", "race": "BEAST", "tier": 1, "attack": 2, "health": 2},
        {"name": "Tabbycat", "race": "BEAST", "techLevel": 1, "attack": 1, "health": 1,
         "isBattlegroundsPoolMinion": false},
        {"text": "A nameless card", "tier": 2},
        {"name": "The Coin", "cost": 0},
        {"name": "Righteous Protector", "tier": 1, "attack": 1, "health": 1,
         "mechanics": ["TAUNT", "DIVINE_SHIELD", "BATTLECRY"]},
        {"name": "Alleycat", "tier": 3, "attack": 9, "health": 9}
    ]"#;

    #[test]
    fn test_load_catalog() {
        let registry = load_catalog(CATALOG).unwrap();
        assert_eq!(registry.len(), 4);
        // No tier, so not a tavern minion.
        assert!(registry.lookup("The Coin", false).is_none());

        let cat = registry.lookup("Alleycat", false).unwrap();
        assert_eq!(cat.tier, 1);
        assert_eq!(cat.race, Some(MinionRace::Beast));
        assert_eq!(cat.card_class.as_deref(), Some("NEUTRAL"));
        assert_eq!(cat.cost, Some(1));
    }

    #[test]
    fn test_golden_prefix() {
        let registry = load_catalog(CATALOG).unwrap();
        let golden = registry.lookup("Alleycat", true).unwrap();
        assert!(golden.is_golden);
        assert_eq!(golden.attack, 2);
        assert_eq!(golden.display_name(), "Golden Alleycat");
    }

    #[test]
    fn test_tokens_and_mechanics() {
        let registry = load_catalog(CATALOG).unwrap();
        assert!(registry.lookup("Tabbycat", false).unwrap().is_token);

        let protector = registry.lookup("Righteous Protector", false).unwrap();
        assert_eq!(protector.abilities, Abilities::TAUNT | Abilities::DIVINE_SHIELD);
    }

    #[test]
    fn test_malformed_catalog() {
        let err = load_catalog("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Catalog(_)));
    }

    #[test]
    fn test_reader() {
        let registry = load_catalog_from_reader(CATALOG.as_bytes()).unwrap();
        assert_eq!(registry.len(), 4);
    }
}
