//! Battle statistics returned by a combat engine.

use serde::{Deserialize, Serialize};

/// Outcome statistics of one battle, from the friendly board's point of view.
///
/// Probabilities are fractions in `[0, 1]`. Win, tie and lose sum to one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub win_probability: f64,
    pub tie_probability: f64,
    pub lose_probability: f64,
    pub mean_score: f64,
    pub median_score: f64,
    pub mean_damage_taken: f64,
    pub mean_damage_dealt: f64,
    pub expected_hero_health: f64,
    pub expected_enemy_hero_health: f64,
    pub death_probability: f64,
    pub enemy_death_probability: f64,
}

impl Battle {
    /// The same battle seen from the enemy's side.
    ///
    /// ```
    /// use tavern_sim::combat::Battle;
    ///
    /// let battle = Battle { win_probability: 1.0, mean_score: 4.0, ..Battle::default() };
    /// let inverse = battle.invert();
    /// assert_eq!(inverse.lose_probability, 1.0);
    /// assert_eq!(inverse.mean_score, -4.0);
    /// assert_eq!(inverse.invert(), battle);
    /// ```
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            win_probability: self.lose_probability,
            tie_probability: self.tie_probability,
            lose_probability: self.win_probability,
            mean_score: -self.mean_score,
            median_score: -self.median_score,
            mean_damage_taken: self.mean_damage_dealt,
            mean_damage_dealt: self.mean_damage_taken,
            expected_hero_health: self.expected_enemy_hero_health,
            expected_enemy_hero_health: self.expected_hero_health,
            death_probability: self.enemy_death_probability,
            enemy_death_probability: self.death_probability,
        }
    }

    /// Whether the friendly side won in every trial.
    #[must_use]
    pub fn won(&self) -> bool {
        self.win_probability == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Battle {
        Battle {
            win_probability: 0.769,
            tie_probability: 0.0,
            lose_probability: 0.231,
            mean_score: 11.875,
            median_score: -16.0,
            mean_damage_taken: 1.764,
            mean_damage_dealt: 14.408,
            expected_hero_health: 29.236,
            expected_enemy_hero_health: 10.592,
            death_probability: 0.0314,
            enemy_death_probability: 0.052,
        }
    }

    #[test]
    fn test_invert_swaps_sides() {
        let inverse = sample().invert();
        assert_eq!(inverse.win_probability, 0.231);
        assert_eq!(inverse.lose_probability, 0.769);
        assert_eq!(inverse.median_score, 16.0);
        assert_eq!(inverse.mean_damage_taken, 14.408);
        assert_eq!(inverse.expected_hero_health, 10.592);
        assert_eq!(inverse.death_probability, 0.052);
    }

    #[test]
    fn test_won() {
        assert!(!sample().won());
        let sweep = Battle { win_probability: 1.0, ..sample() };
        assert!(sweep.won());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&sample()).unwrap();
        let back: Battle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
