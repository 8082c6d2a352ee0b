//! Round and game outcomes.

use serde::{Deserialize, Serialize};

use crate::combat::Battle;
use crate::core::PlayerId;

/// Final result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Exactly one hero survived.
    Winner(PlayerId),
    /// Every hero died.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// One battle fought during a round, from `friendly`'s point of view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundBattle {
    pub friendly: PlayerId,
    pub enemy: PlayerId,
    pub battle: Battle,
}

/// Summary of a resolved round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// The round that was resolved.
    pub round: u32,
    pub battles: Vec<RoundBattle>,
    /// Survivor left unpaired when an odd number of heroes were alive.
    pub bye: Option<PlayerId>,
}

impl RoundReport {
    /// Whether `player` fought this round.
    #[must_use]
    pub fn fought(&self, player: PlayerId) -> bool {
        self.battles
            .iter()
            .any(|b| b.friendly == player || b.enemy == player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
        assert!(!GameResult::Draw.is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_fought() {
        let report = RoundReport {
            round: 1,
            battles: vec![RoundBattle {
                friendly: PlayerId::new(2),
                enemy: PlayerId::new(0),
                battle: Battle::default(),
            }],
            bye: Some(PlayerId::new(1)),
        };
        assert!(report.fought(PlayerId::new(0)));
        assert!(report.fought(PlayerId::new(2)));
        assert!(!report.fought(PlayerId::new(1)));
    }
}
