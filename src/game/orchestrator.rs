//! Turn locking and elimination rounds for N players.

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use super::report::{GameResult, RoundBattle, RoundReport};
use crate::cards::{starter_hooks, starter_registry, CardRegistry};
use crate::combat::CombatSimulator;
use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap};
use crate::error::{GameError, Result};
use crate::moves::{Action, Move, MoveEncoding};
use crate::pool::{MinionPool, SharedPool};
use crate::tavern::{HookRegistry, TavernBoard};

/// A full game: one tavern per player over a shared pool.
///
/// At most one player is in a turn at any time. A round is resolved by
/// `next_round` once every player has completed a turn; survivors are then
/// shuffled, paired and sent to the combat engine.
///
/// ```
/// use tavern_sim::combat::{Battle, BoardSnapshot};
/// use tavern_sim::core::{GameConfig, PlayerId};
/// use tavern_sim::error::Result;
/// use tavern_sim::game::BattlegroundsGame;
///
/// let tie = |_: &BoardSnapshot, _: &BoardSnapshot, _: u32| -> Result<Battle> {
///     Ok(Battle { tie_probability: 1.0, expected_hero_health: 40.0,
///                 expected_enemy_hero_health: 40.0, ..Battle::default() })
/// };
/// let mut game = BattlegroundsGame::with_starter_set(GameConfig::new(2), tie).unwrap();
///
/// for player in PlayerId::all(2) {
///     game.with_turn(player, |board| {
///         board.buy_minion(0);
///     }).unwrap();
/// }
/// let report = game.next_round().unwrap().unwrap();
/// assert_eq!(report.battles.len(), 1);
/// assert_eq!(game.round_number(), 2);
/// ```
pub struct BattlegroundsGame<C> {
    config: GameConfig,
    boards: PlayerMap<TavernBoard>,
    pool: SharedPool,
    combat: C,
    rng: GameRng,
    active_player: Option<PlayerId>,
    turn_completion: PlayerMap<bool>,
    round_number: u32,
    encoding: MoveEncoding,
}

impl<C: CombatSimulator> BattlegroundsGame<C> {
    /// Create a game over `catalog` with no card effects.
    pub fn new(config: GameConfig, catalog: CardRegistry, combat: C) -> Result<Self> {
        Self::with_hooks(config, catalog, HookRegistry::new(), combat)
    }

    /// Create a game over the built-in card set and its effects.
    pub fn with_starter_set(config: GameConfig, combat: C) -> Result<Self> {
        Self::with_hooks(config, starter_registry(), starter_hooks(), combat)
    }

    /// Create a game over `catalog` with the given card effects.
    ///
    /// Errors if the player count is zero or odd, or the tavern rules are
    /// inconsistent.
    pub fn with_hooks(
        config: GameConfig,
        catalog: CardRegistry,
        hooks: HookRegistry,
        combat: C,
    ) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::new(config.seed);
        let pool = MinionPool::from_catalog(
            Rc::new(catalog),
            &config.pool_copies_per_tier,
            rng.fork(),
        )
        .into_shared();
        let tavern = Rc::new(config.tavern.clone());
        let hooks = Rc::new(hooks);

        let boards = PlayerMap::new(config.player_count, |_| {
            TavernBoard::new(
                Rc::clone(&tavern),
                Rc::clone(&pool),
                Rc::clone(&hooks),
                rng.fork(),
            )
        });

        log::debug!(
            "New game: {} players, {} minions in pool, seed {}",
            config.player_count,
            pool.borrow().len(),
            config.seed
        );

        Ok(Self {
            turn_completion: PlayerMap::with_value(config.player_count, false),
            encoding: MoveEncoding::from_config(&config.tavern),
            round_number: 1,
            active_player: None,
            config,
            boards,
            pool,
            combat,
            rng,
        })
    }

    fn check_player(&self, player: PlayerId) -> Result<()> {
        if self.boards.contains(player) {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player.index()))
        }
    }

    // === Turns ===

    /// Start `player`'s turn and advance their board to the next turn.
    ///
    /// Errors if another turn is in progress or the player already completed
    /// a turn this round.
    pub fn start_turn_for_player(&mut self, player: PlayerId) -> Result<()> {
        self.check_player(player)?;
        if let Some(active) = self.active_player {
            return Err(GameError::TurnInProgress(active));
        }
        if self.turn_completion[player] {
            return Err(GameError::TurnAlreadyCompleted(player));
        }

        self.active_player = Some(player);
        self.boards[player].next_turn();
        log::debug!("{} started turn (round {})", player, self.round_number);
        Ok(())
    }

    /// End the active turn. Returns the player whose turn ended.
    pub fn end_turn(&mut self) -> Result<PlayerId> {
        let player = self.active_player.take().ok_or(GameError::NoTurnInProgress)?;
        self.turn_completion[player] = true;
        log::debug!("{} ended turn", player);
        Ok(player)
    }

    /// Start `player`'s turn and return a guard that ends it when dropped.
    ///
    /// The guard dereferences to the player's board.
    pub fn turn_for_player(&mut self, player: PlayerId) -> Result<TurnGuard<'_, C>> {
        self.start_turn_for_player(player)?;
        Ok(TurnGuard { game: self, player })
    }

    /// Run `f` on `player`'s board inside a turn.
    pub fn with_turn<R>(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut TavernBoard) -> R,
    ) -> Result<R> {
        let mut turn = self.turn_for_player(player)?;
        Ok(f(&mut turn))
    }

    /// Apply a move for the active player.
    ///
    /// `EndTurn` ends the turn. Other moves return whether the board accepted
    /// them.
    pub fn apply_move(&mut self, mv: Move) -> Result<bool> {
        let player = self.active_player.ok_or(GameError::NoTurnInProgress)?;
        if mv.action == Action::EndTurn {
            self.end_turn()?;
            return Ok(true);
        }
        Ok(self.boards[player].apply_move(&mv))
    }

    /// Decode and apply a move id for the active player.
    pub fn apply_move_id(&mut self, id: usize) -> Result<bool> {
        let mv = self.encoding.from_id(id)?;
        self.apply_move(mv)
    }

    /// Legal-move mask over the encoding for the active player.
    pub fn legal_mask(&self) -> Result<Vec<bool>> {
        let board = self.active_board().ok_or(GameError::NoTurnInProgress)?;
        Ok(self.encoding.legal_mask(&board.valid_moves()))
    }

    // === Rounds ===

    /// Resolve the round's battles and start the next round.
    ///
    /// Errors if any player has not completed their turn. Returns `None`
    /// without doing anything once the game is decided. Surviving heroes are
    /// shuffled and paired in order; with an odd number of survivors the last
    /// one gets a bye. Every pairing is simulated before any board changes,
    /// so an engine failure leaves the game as it was.
    pub fn next_round(&mut self) -> Result<Option<RoundReport>> {
        if let Some((player, _)) = self.turn_completion.iter().find(|(_, done)| !**done) {
            return Err(GameError::RoundIncomplete(player));
        }

        let mut alive = self.alive_players();
        if alive.len() <= 1 {
            return Ok(None);
        }
        let mut rng = self.rng.clone();
        rng.shuffle(&mut alive);

        let mut battles = Vec::with_capacity(alive.len() / 2);
        for pair in alive.chunks_exact(2) {
            let (friendly, enemy) = (pair[0], pair[1]);
            let battle = self.combat.simulate(
                &self.boards[friendly].snapshot(),
                &self.boards[enemy].snapshot(),
                self.config.combat_trials,
            )?;
            log::debug!(
                "{} vs {}: win {:.2}, tie {:.2}, lose {:.2}",
                friendly,
                enemy,
                battle.win_probability,
                battle.tie_probability,
                battle.lose_probability
            );
            battles.push(RoundBattle {
                friendly,
                enemy,
                battle,
            });
        }

        self.rng = rng;
        for fight in &battles {
            let (a, b) = self.boards.pair_mut(fight.friendly, fight.enemy);
            a.record_battle(&fight.battle);
            b.record_battle(&fight.battle.invert());
        }
        let bye = alive.chunks_exact(2).remainder().first().copied();
        if let Some(player) = bye {
            log::debug!("{} has a bye", player);
        }

        let report = RoundReport {
            round: self.round_number,
            battles,
            bye,
        };
        self.turn_completion.fill(false);
        self.round_number += 1;

        log::info!(
            "Round {} resolved: {} battles, {} heroes alive",
            report.round,
            report.battles.len(),
            self.alive_players().len()
        );
        Ok(Some(report))
    }

    // === Status ===

    /// True when exactly one hero is alive.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.alive_players().len() == 1
    }

    /// The outcome once at most one hero is alive.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.alive_players().as_slice() {
            [] => Some(GameResult::Draw),
            [winner] => Some(GameResult::Winner(*winner)),
            _ => None,
        }
    }

    #[must_use]
    pub fn alive_players(&self) -> Vec<PlayerId> {
        self.boards
            .iter()
            .filter(|(_, board)| !board.is_dead())
            .map(|(player, _)| player)
            .collect()
    }

    #[must_use]
    pub fn has_completed_turn(&self, player: PlayerId) -> bool {
        self.boards.contains(player) && self.turn_completion[player]
    }

    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }

    #[must_use]
    pub fn active_board(&self) -> Option<&TavernBoard> {
        self.active_player.map(|p| &self.boards[p])
    }

    pub fn active_board_mut(&mut self) -> Option<&mut TavernBoard> {
        self.active_player.map(|p| &mut self.boards[p])
    }

    // === Accessors ===

    /// `player`'s board, or `None` for a seat not in this game.
    #[must_use]
    pub fn board(&self, player: PlayerId) -> Option<&TavernBoard> {
        self.boards.contains(player).then(|| &self.boards[player])
    }

    #[must_use]
    pub fn boards(&self) -> &PlayerMap<TavernBoard> {
        &self.boards
    }

    #[must_use]
    pub fn pool(&self) -> &SharedPool {
        &self.pool
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn encoding(&self) -> &MoveEncoding {
        &self.encoding
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    pub fn combat_mut(&mut self) -> &mut C {
        &mut self.combat
    }
}

/// A player's turn, ended when the guard is dropped.
pub struct TurnGuard<'a, C: CombatSimulator> {
    game: &'a mut BattlegroundsGame<C>,
    player: PlayerId,
}

impl<C: CombatSimulator> TurnGuard<'_, C> {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// End the turn now instead of at drop.
    pub fn finish(self) {}
}

impl<C: CombatSimulator> Deref for TurnGuard<'_, C> {
    type Target = TavernBoard;

    fn deref(&self) -> &TavernBoard {
        &self.game.boards[self.player]
    }
}

impl<C: CombatSimulator> DerefMut for TurnGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut TavernBoard {
        &mut self.game.boards[self.player]
    }
}

impl<C: CombatSimulator> Drop for TurnGuard<'_, C> {
    fn drop(&mut self) {
        if self.game.active_player == Some(self.player) {
            self.game.turn_completion[self.player] = true;
            self.game.active_player = None;
            log::debug!("{} ended turn", self.player);
        }
    }
}
