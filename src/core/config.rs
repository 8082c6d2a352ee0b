//! Game configuration types.
//!
//! - `TavernConfig`: every economy constant a tavern board consults
//!   (slot capacities, gold schedule, prices, tier tables)
//! - `GoldSchedule`: how much gold a turn starts with
//! - `GameConfig`: seat count, seed, pool composition and combat settings
//!
//! Both configs deserialize from partial JSON; missing fields take the
//! default ruleset.
//!
//! ```
//! use tavern_sim::core::TavernConfig;
//!
//! let config = TavernConfig::from_json(r#"{ "max_freeze_times": 1 }"#).unwrap();
//! assert_eq!(config.max_freeze_times, Some(1));
//! assert_eq!(config.max_gold, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Gold granted at the start of a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldSchedule {
    /// `starting_gold + (turn - 1) * gold_per_turn`: 3 gold on turn 1, 4 on turn 2.
    #[default]
    WithStartingGold,
    /// `turn * gold_per_turn`: 1 gold on turn 1, 3 on turn 3.
    TurnIndexed,
}

/// Economy rules for a single tavern board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TavernConfig {
    /// Hand slots.
    pub max_hand_size: usize,
    /// Board slots.
    pub max_board_size: usize,
    /// Recruit slots.
    pub max_recruit_size: usize,
    /// Recruits offered before any upgrade.
    pub initial_num_recruits: usize,
    /// Extra recruits gained when upgrading FROM tier `i` (index 0 is padding).
    pub recruit_progression: Vec<usize>,
    /// Cost of upgrading FROM tier `i` (index 0 is padding).
    pub upgrade_costs: Vec<u32>,
    pub starting_tier: u8,
    pub max_tier: u8,
    pub refresh_cost: u32,
    pub max_gold: u32,
    pub gold_per_turn: u32,
    pub starting_gold: u32,
    pub gold_schedule: GoldSchedule,
    pub buy_price: u32,
    pub sell_price: u32,
    pub starting_hero_health: i32,
    /// Freeze toggles allowed per turn. `None` for unlimited.
    pub max_freeze_times: Option<u32>,
}

impl Default for TavernConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 10,
            max_board_size: 7,
            max_recruit_size: 6,
            initial_num_recruits: 3,
            recruit_progression: vec![0, 1, 0, 1, 0, 1],
            upgrade_costs: vec![0, 5, 7, 8, 9, 10],
            starting_tier: 1,
            max_tier: 6,
            refresh_cost: 1,
            max_gold: 10,
            gold_per_turn: 1,
            starting_gold: 3,
            gold_schedule: GoldSchedule::WithStartingGold,
            buy_price: 3,
            sell_price: 1,
            starting_hero_health: 40,
            max_freeze_times: None,
        }
    }
}

impl TavernConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the tables agree with the tier range and slot capacities.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(GameError::InvalidConfig(msg));

        if self.max_tier == 0 {
            return invalid("max_tier must be at least 1".into());
        }
        if self.starting_tier == 0 || self.starting_tier > self.max_tier {
            return invalid(format!(
                "starting_tier {} outside 1..={}",
                self.starting_tier, self.max_tier
            ));
        }
        let tiers = usize::from(self.max_tier);
        if self.upgrade_costs.len() < tiers {
            return invalid(format!(
                "upgrade_costs needs {} entries, found {}",
                tiers,
                self.upgrade_costs.len()
            ));
        }
        if self.recruit_progression.len() < tiers {
            return invalid(format!(
                "recruit_progression needs {} entries, found {}",
                tiers,
                self.recruit_progression.len()
            ));
        }
        if self.initial_num_recruits > self.max_recruit_size {
            return invalid(format!(
                "initial_num_recruits {} exceeds max_recruit_size {}",
                self.initial_num_recruits, self.max_recruit_size
            ));
        }
        if self.max_hand_size == 0 || self.max_board_size == 0 || self.max_recruit_size == 0 {
            return invalid("slot capacities must be positive".into());
        }
        Ok(())
    }

    /// Gold a board starts `turn` with, capped at `max_gold`.
    #[must_use]
    pub fn gold_for_turn(&self, turn: u32) -> u32 {
        let gold = match self.gold_schedule {
            GoldSchedule::WithStartingGold => turn
                .saturating_sub(1)
                .saturating_mul(self.gold_per_turn)
                .saturating_add(self.starting_gold),
            GoldSchedule::TurnIndexed => turn.saturating_mul(self.gold_per_turn),
        };
        gold.min(self.max_gold)
    }

    /// Base cost of upgrading from `tier`, or `None` at the top tier.
    #[must_use]
    pub fn upgrade_cost_from(&self, tier: u8) -> Option<u32> {
        if tier >= self.max_tier {
            return None;
        }
        self.upgrade_costs.get(usize::from(tier)).copied()
    }

    /// Extra recruits gained by upgrading from `tier`.
    #[must_use]
    pub fn recruits_gained_from(&self, tier: u8) -> usize {
        self.recruit_progression
            .get(usize::from(tier))
            .copied()
            .unwrap_or(0)
    }

    #[must_use]
    pub fn with_gold_schedule(mut self, schedule: GoldSchedule) -> Self {
        self.gold_schedule = schedule;
        self
    }

    #[must_use]
    pub fn with_max_freeze_times(mut self, times: u32) -> Self {
        self.max_freeze_times = Some(times);
        self
    }

    #[must_use]
    pub fn with_starting_hero_health(mut self, health: i32) -> Self {
        self.starting_hero_health = health;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats. Must be even and positive.
    pub player_count: usize,

    /// Seed for pairing and per-board randomness.
    pub seed: u64,

    /// Number of trials requested from the combat engine per battle.
    pub combat_trials: u32,

    /// Copies of each minion placed in the pool, indexed by `tier - 1`.
    pub pool_copies_per_tier: Vec<usize>,

    /// Rules shared by every board.
    pub tavern: TavernConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 8,
            seed: 42,
            combat_trials: 1,
            pool_copies_per_tier: vec![16, 15, 13, 11, 9, 7],
            tavern: TavernConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with the default ruleset for `player_count` seats.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_combat_trials(mut self, trials: u32) -> Self {
        self.combat_trials = trials;
        self
    }

    #[must_use]
    pub fn with_tavern(mut self, tavern: TavernConfig) -> Self {
        self.tavern = tavern;
        self
    }

    /// Copies of a tier's minions placed in the pool.
    #[must_use]
    pub fn copies_for_tier(&self, tier: u8) -> usize {
        usize::from(tier)
            .checked_sub(1)
            .and_then(|i| self.pool_copies_per_tier.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Reject odd or zero seat counts and invalid tavern rules.
    pub fn validate(&self) -> Result<()> {
        if self.player_count == 0 || self.player_count % 2 != 0 || self.player_count > 254 {
            return Err(GameError::InvalidPlayerCount(self.player_count));
        }
        self.tavern.validate()
    }

    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tavern_config_is_valid() {
        let config = TavernConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.upgrade_cost_from(1), Some(5));
        assert_eq!(config.upgrade_cost_from(5), Some(10));
        assert_eq!(config.upgrade_cost_from(6), None);
        assert_eq!(config.recruits_gained_from(1), 1);
        assert_eq!(config.recruits_gained_from(2), 0);
    }

    #[test]
    fn test_gold_with_starting_gold() {
        let config = TavernConfig::default();
        assert_eq!(config.gold_for_turn(1), 3);
        assert_eq!(config.gold_for_turn(2), 4);
        assert_eq!(config.gold_for_turn(8), 10);
        assert_eq!(config.gold_for_turn(30), 10);
    }

    #[test]
    fn test_gold_turn_indexed() {
        let config = TavernConfig::default().with_gold_schedule(GoldSchedule::TurnIndexed);
        assert_eq!(config.gold_for_turn(1), 1);
        assert_eq!(config.gold_for_turn(3), 3);
        assert_eq!(config.gold_for_turn(12), 10);
    }

    #[test]
    fn test_partial_json() {
        let config = TavernConfig::from_json(
            r#"{ "gold_schedule": "turn_indexed", "starting_hero_health": 30 }"#,
        )
        .unwrap();
        assert_eq!(config.gold_schedule, GoldSchedule::TurnIndexed);
        assert_eq!(config.starting_hero_health, 30);
        assert_eq!(config.max_hand_size, 10);
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let config = TavernConfig {
            upgrade_costs: vec![0, 5],
            ..TavernConfig::default()
        };
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let err = TavernConfig::from_json(r#"{ "initial_num_recruits": 9 }"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidConfig(_)));
    }

    #[test]
    fn test_game_config_player_count() {
        assert!(GameConfig::new(8).validate().is_ok());
        assert_eq!(GameConfig::new(7).validate(), Err(GameError::InvalidPlayerCount(7)));
        assert_eq!(GameConfig::new(0).validate(), Err(GameError::InvalidPlayerCount(0)));
    }

    #[test]
    fn test_copies_for_tier() {
        let config = GameConfig::default();
        assert_eq!(config.copies_for_tier(1), 16);
        assert_eq!(config.copies_for_tier(6), 7);
        assert_eq!(config.copies_for_tier(0), 0);
        assert_eq!(config.copies_for_tier(9), 0);
    }

    #[test]
    fn test_game_config_json() {
        let config = GameConfig::from_json(r#"{ "player_count": 4, "seed": 7 }"#).unwrap();
        assert_eq!(config.player_count, 4);
        assert_eq!(config.seed, 7);
        assert_eq!(config.tavern, TavernConfig::default());
    }
}
