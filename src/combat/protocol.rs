//! Text protocol of the command-line combat engine.
//!
//! A battle is described as a list of commands:
//!
//! ```text
//! Board
//! level 2
//! health 40
//! * 2/2 golden Alleycat
//! * 5/6 golden Coldlight Seer, taunt, divine shield
//! VS
//! level 1
//! health 38
//! * 2/3 Rockpool Hunter
//! ```
//!
//! and the engine answers with a report such as
//!
//! ```text
//! win: 76.9%, tie: 0.0%, lose: 23.1%
//! mean score: 11.875, median score: -16
//! mean damage taken: 1.764
//! your expected health afterwards: 29.236, 3.14% chance to die
//! mean damage dealt: 14.408
//! their expected health afterwards: 10.592, 5.2% chance to die
//! ```
//!
//! Percentages in the report are converted to fractions.

use std::sync::LazyLock;

use regex::Regex;

use super::battle::Battle;
use super::snapshot::BoardSnapshot;
use super::CombatSimulator;
use crate::error::{GameError, Result};

/// Commands describing one board: tier, health and one `*` line per minion.
#[must_use]
pub fn board_to_commands(board: &BoardSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("level {}", board.tavern_tier),
        format!("health {}", board.hero_health),
    ];
    lines.extend(board.minions.iter().map(|m| format!("* {}", m)));
    lines
}

/// Commands describing a full battle between two boards.
#[must_use]
pub fn battle_to_commands(friendly: &BoardSnapshot, enemy: &BoardSnapshot) -> Vec<String> {
    let mut lines = vec!["Board".to_string()];
    lines.extend(board_to_commands(friendly));
    lines.push("VS".to_string());
    lines.extend(board_to_commands(enemy));
    lines
}

/// A report pattern, compiled on first use.
type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

const NUMBER: &str = r"([-+]?\d+(?:\.\d+)?)";

static WIN: Pattern = LazyLock::new(|| Regex::new(&format!(r"\bwin: {NUMBER}%")));
static TIE: Pattern = LazyLock::new(|| Regex::new(&format!(r"\btie: {NUMBER}%")));
static LOSE: Pattern = LazyLock::new(|| Regex::new(&format!(r"\blose: {NUMBER}%")));
static MEAN_SCORE: Pattern = LazyLock::new(|| Regex::new(&format!(r"\bmean score: {NUMBER}")));
static MEDIAN_SCORE: Pattern = LazyLock::new(|| Regex::new(&format!(r"\bmedian score: {NUMBER}")));
static DAMAGE_TAKEN: Pattern =
    LazyLock::new(|| Regex::new(&format!(r"\bmean damage taken: {NUMBER}")));
static DAMAGE_DEALT: Pattern =
    LazyLock::new(|| Regex::new(&format!(r"\bmean damage dealt: {NUMBER}")));
static OUR_HEALTH: Pattern = LazyLock::new(|| {
    Regex::new(&format!(
        r"\byour expected health afterwards: {NUMBER}, {NUMBER}% chance to die"
    ))
});
static THEIR_HEALTH: Pattern = LazyLock::new(|| {
    Regex::new(&format!(
        r"\btheir expected health afterwards: {NUMBER}, {NUMBER}% chance to die"
    ))
});

/// The `N` numbers captured by `pattern` in `report`.
fn capture<const N: usize>(pattern: &Pattern, report: &str, label: &str) -> Result<[f64; N]> {
    let regex = pattern
        .as_ref()
        .map_err(|e| GameError::Report(format!("pattern for '{}': {}", label, e)))?;
    let caps = regex
        .captures(report)
        .ok_or_else(|| GameError::Report(format!("missing field '{}'", label)))?;

    let mut values = [0.0; N];
    for (i, value) in values.iter_mut().enumerate() {
        *value = caps
            .get(i + 1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| GameError::Report(format!("field '{}' has no numeric value", label)))?;
    }
    Ok(values)
}

fn percentage(pattern: &Pattern, report: &str, label: &str) -> Result<f64> {
    let [value] = capture(pattern, report, label)?;
    Ok(value / 100.0)
}

fn number(pattern: &Pattern, report: &str, label: &str) -> Result<f64> {
    let [value] = capture(pattern, report, label)?;
    Ok(value)
}

/// Expected health and death chance from `"<whose> expected health
/// afterwards: <hp>, <p>% chance to die"`.
fn health_and_death(pattern: &Pattern, report: &str, label: &str) -> Result<(f64, f64)> {
    let [health, death] = capture(pattern, report, label)?;
    Ok((health, death / 100.0))
}

impl Battle {
    /// Parse the engine's textual report.
    ///
    /// ```
    /// use tavern_sim::combat::Battle;
    ///
    /// let report = "win: 100%, tie: 0%, lose: 0%\n\
    ///               mean score: 3, median score: 3\n\
    ///               mean damage taken: 0\n\
    ///               your expected health afterwards: 40, 0% chance to die\n\
    ///               mean damage dealt: 3\n\
    ///               their expected health afterwards: 37, 0% chance to die";
    /// let battle = Battle::parse_report(report).unwrap();
    /// assert!(battle.won());
    /// assert_eq!(battle.expected_enemy_hero_health, 37.0);
    /// ```
    pub fn parse_report(report: &str) -> Result<Self> {
        let (expected_hero_health, death_probability) =
            health_and_death(&OUR_HEALTH, report, "your expected health")?;
        let (expected_enemy_hero_health, enemy_death_probability) =
            health_and_death(&THEIR_HEALTH, report, "their expected health")?;

        Ok(Self {
            win_probability: percentage(&WIN, report, "win")?,
            tie_probability: percentage(&TIE, report, "tie")?,
            lose_probability: percentage(&LOSE, report, "lose")?,
            mean_score: number(&MEAN_SCORE, report, "mean score")?,
            median_score: number(&MEDIAN_SCORE, report, "median score")?,
            mean_damage_taken: number(&DAMAGE_TAKEN, report, "mean damage taken")?,
            mean_damage_dealt: number(&DAMAGE_DEALT, report, "mean damage dealt")?,
            expected_hero_health,
            expected_enemy_hero_health,
            death_probability,
            enemy_death_probability,
        })
    }
}

/// Adapter for engines that speak the text protocol.
///
/// The wrapped function receives the battle commands and the trial count and
/// returns the engine's raw report, e.g. by piping to a subprocess.
pub struct TextProtocolEngine<F> {
    run: F,
}

impl<F> TextProtocolEngine<F>
where
    F: FnMut(&[String], u32) -> Result<String>,
{
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F> CombatSimulator for TextProtocolEngine<F>
where
    F: FnMut(&[String], u32) -> Result<String>,
{
    fn simulate(
        &mut self,
        friendly: &BoardSnapshot,
        enemy: &BoardSnapshot,
        trials: u32,
    ) -> Result<Battle> {
        let commands = battle_to_commands(friendly, enemy);
        let report = (self.run)(&commands, trials)?;
        Battle::parse_report(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::MinionSnapshot;

    const REPORT: &str = "\
--------------------------------
win: 76.9%, tie: 0.0%, lose: 23.1%
mean score: 11.875, median score: -16
percentiles: -12 -10 -3 16 16 16 16 20 20 20 20
mean damage taken: 1.764
your expected health afterwards: 29.236, 3.14% chance to die
mean damage dealt: 14.408
their expected health afterwards: 10.592, 5.2% chance to die
--------------------------------";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_report() {
        let battle = Battle::parse_report(REPORT).unwrap();
        assert!(approx(battle.win_probability, 0.769));
        assert!(approx(battle.tie_probability, 0.0));
        assert!(approx(battle.lose_probability, 0.231));
        assert!(approx(battle.mean_score, 11.875));
        assert!(approx(battle.median_score, -16.0));
        assert!(approx(battle.mean_damage_taken, 1.764));
        assert!(approx(battle.mean_damage_dealt, 14.408));
        assert!(approx(battle.expected_hero_health, 29.236));
        assert!(approx(battle.expected_enemy_hero_health, 10.592));
        assert!(approx(battle.death_probability, 0.0314));
        assert!(approx(battle.enemy_death_probability, 0.052));
    }

    #[test]
    fn test_parse_whole_numbers_and_negative_health() {
        let report = "win: 0%, tie: 0%, lose: 100%\n\
                      mean score: -9, median score: -9\n\
                      mean damage taken: 9\n\
                      your expected health afterwards: -2.5, 100% chance to die\n\
                      mean damage dealt: 0\n\
                      their expected health afterwards: 12, 0% chance to die";
        let battle = Battle::parse_report(report).unwrap();
        assert!(approx(battle.lose_probability, 1.0));
        assert!(approx(battle.median_score, -9.0));
        assert!(approx(battle.expected_hero_health, -2.5));
        assert!(approx(battle.death_probability, 1.0));
        assert!(approx(battle.expected_enemy_hero_health, 12.0));
    }

    #[test]
    fn test_percentage_sign_required() {
        let broken = REPORT.replace("win: 76.9%", "win: 76.9");
        assert!(matches!(Battle::parse_report(&broken), Err(GameError::Report(_))));
    }

    #[test]
    fn test_missing_field() {
        let truncated = REPORT.replace("mean damage dealt: 14.408", "");
        let err = Battle::parse_report(&truncated).unwrap_err();
        assert!(matches!(err, GameError::Report(_)));
    }

    #[test]
    fn test_missing_death_chance() {
        let broken = REPORT.replace("3.14% chance to die", "unknown");
        assert!(Battle::parse_report(&broken).is_err());
    }

    #[test]
    fn test_commands() {
        let friendly = BoardSnapshot {
            tavern_tier: 2,
            hero_health: 40,
            minions: vec![MinionSnapshot {
                name: "Alleycat".into(),
                attack: 2,
                health: 2,
                is_golden: true,
                taunt: false,
                divine_shield: false,
                poisonous: false,
                windfury: false,
                reborn: false,
            }],
        };
        let enemy = BoardSnapshot {
            tavern_tier: 1,
            hero_health: 38,
            minions: Vec::new(),
        };

        assert_eq!(
            battle_to_commands(&friendly, &enemy),
            vec!["Board", "level 2", "health 40", "* 2/2 golden Alleycat", "VS", "level 1", "health 38"]
        );
    }

    #[test]
    fn test_text_engine_adapter() {
        let mut seen = Vec::new();
        let mut engine = TextProtocolEngine::new(|commands: &[String], trials| {
            seen.push((commands.len(), trials));
            Ok(REPORT.to_string())
        });
        let board = BoardSnapshot {
            tavern_tier: 1,
            hero_health: 40,
            minions: Vec::new(),
        };

        let battle = engine.simulate(&board, &board, 1000).unwrap();
        assert!(approx(battle.win_probability, 0.769));
        drop(engine);
        assert_eq!(seen, vec![(6, 1000)]);
    }
}
