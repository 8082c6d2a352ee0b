//! One player's tavern: the recruit-phase economy state machine.
//!
//! A `TavernBoard` owns a player's gold, tavern tier, hero health, the
//! fixed-capacity hand, board and recruit slots, the freeze state and the
//! temporary cost overrides. Recruits are drawn from and returned to the
//! game's shared pool.
//!
//! ## Failure model
//!
//! Player actions (`buy_minion`, `upgrade_tavern`, ...) return `bool`. A
//! `false` means the action was illegal and nothing changed.
//!
//! ## Hooks
//!
//! Card effects run through the `HookRegistry` the board was built with.
//! Broadcasts iterate over a snapshot of the occupied slots taken before
//! the first handler runs, so handlers may freely add or remove minions.

use std::rc::Rc;

use super::cost::CostOverride;
use super::hooks::{HookContext, HookRegistry, MinionEvent, SlotRef};
use crate::cards::{Minion, MinionFilter};
use crate::combat::{Battle, BoardSnapshot, CombatSimulator};
use crate::core::{EntityId, GameRng, TavernConfig};
use crate::error::Result;
use crate::moves::{Action, Move};
use crate::pool::SharedPool;

pub struct TavernBoard {
    config: Rc<TavernConfig>,
    pool: SharedPool,
    hooks: Rc<HookRegistry>,
    rng: GameRng,

    turn_number: u32,
    hero_health: i32,
    tavern_tier: u8,
    gold: u32,

    hand: Vec<Option<Minion>>,
    board: Vec<Option<Minion>>,
    recruits: Vec<Option<Minion>>,
    num_recruits: usize,

    is_frozen: bool,
    times_frozen: u32,

    refresh_cost: CostOverride,
    upgrade_discount: CostOverride,

    battle_history: Vec<Battle>,
}

impl TavernBoard {
    /// Create a board at turn 0 with no gold and empty slots.
    ///
    /// Call `next_turn` to start the first turn.
    #[must_use]
    pub fn new(
        config: Rc<TavernConfig>,
        pool: SharedPool,
        hooks: Rc<HookRegistry>,
        rng: GameRng,
    ) -> Self {
        Self {
            turn_number: 0,
            hero_health: config.starting_hero_health,
            tavern_tier: config.starting_tier,
            gold: 0,
            hand: vec![None; config.max_hand_size],
            board: vec![None; config.max_board_size],
            recruits: vec![None; config.max_recruit_size],
            num_recruits: config.initial_num_recruits,
            is_frozen: false,
            times_frozen: 0,
            refresh_cost: CostOverride::Default,
            upgrade_discount: CostOverride::Default,
            battle_history: Vec::new(),
            config,
            pool,
            hooks,
            rng,
        }
    }

    /// Board with the default rules and no card hooks.
    #[must_use]
    pub fn with_defaults(pool: SharedPool, seed: u64) -> Self {
        Self::new(
            Rc::new(TavernConfig::default()),
            pool,
            Rc::new(HookRegistry::new()),
            GameRng::new(seed),
        )
    }

    // === Turn lifecycle ===

    /// Advance to the next turn.
    ///
    /// Fires end-of-turn hooks (except before the first turn), grants the
    /// turn's gold, rerolls recruits unless frozen, thaws the tavern and
    /// fires new-turn hooks.
    pub fn next_turn(&mut self) {
        if self.turn_number > 0 {
            self.broadcast(MinionEvent::EndTurn, None);
        }

        self.turn_number += 1;
        self.gold = self.config.gold_for_turn(self.turn_number);
        self.reroll_recruits();
        self.is_frozen = false;
        self.times_frozen = 0;

        log::trace!(
            "Turn {} started: {} gold, tier {}",
            self.turn_number,
            self.gold,
            self.tavern_tier
        );
        self.broadcast(MinionEvent::NewTurn, None);
    }

    /// Return current recruits to the pool and draw a new selection, free of
    /// charge. Does nothing when frozen.
    fn reroll_recruits(&mut self) -> bool {
        if self.is_frozen {
            return false;
        }

        let returned: Vec<Minion> = self.recruits.iter_mut().filter_map(Option::take).collect();
        let amount = self.num_recruits.min(self.recruits.len());
        let drawn = {
            let mut pool = self.pool.borrow_mut();
            pool.insert(returned);
            pool.get_random(amount, self.tavern_tier)
        };
        for (slot, minion) in self.recruits.iter_mut().zip(drawn) {
            *slot = Some(minion);
        }
        true
    }

    /// Pay to reroll the recruits.
    ///
    /// Fails when frozen or when the player cannot afford the refresh cost.
    /// A successful refresh counts toward a temporary refresh cost.
    pub fn refresh_recruits(&mut self) -> bool {
        let cost = self.refresh_cost();
        if self.is_frozen || self.gold < cost {
            return false;
        }

        self.reroll_recruits();
        self.gold -= cost;
        if self.refresh_cost.step() {
            log::trace!("Refresh cost reverted to {}", self.config.refresh_cost);
        }
        true
    }

    /// Override the refresh cost for the next `times` refreshes, or
    /// permanently when `times` is `None`.
    pub fn set_refresh_cost(&mut self, amount: u32, times: Option<u32>) {
        self.refresh_cost = CostOverride::new(amount, times);
    }

    #[must_use]
    pub fn refresh_cost(&self) -> u32 {
        self.refresh_cost.value(self.config.refresh_cost)
    }

    // === Tavern tier ===

    /// Current upgrade cost, or `None` at the maximum tier.
    #[must_use]
    pub fn upgrade_cost(&self, apply_discount: bool) -> Option<u32> {
        let discount = if apply_discount {
            self.tavern_upgrade_discount()
        } else {
            0
        };
        self.config
            .upgrade_cost_from(self.tavern_tier)
            .map(|cost| cost.saturating_sub(discount))
    }

    /// Upgrade the tavern one tier.
    ///
    /// Fails at the maximum tier or when the player cannot afford it. Every
    /// successful upgrade counts toward a temporary discount, whether or not
    /// the discount was applied.
    pub fn upgrade_tavern(&mut self, apply_discount: bool) -> bool {
        let Some(cost) = self.upgrade_cost(apply_discount) else {
            return false;
        };
        if self.gold < cost {
            return false;
        }

        self.gold -= cost;
        self.num_recruits = (self.num_recruits
            + self.config.recruits_gained_from(self.tavern_tier))
        .min(self.config.max_recruit_size);
        self.tavern_tier += 1;
        self.upgrade_discount.step();

        log::trace!("Tavern upgraded to tier {} for {} gold", self.tavern_tier, cost);
        true
    }

    /// Discount the next `times` upgrades by `amount`, or every upgrade when
    /// `times` is `None`.
    pub fn set_tavern_upgrade_discount(&mut self, amount: u32, times: Option<u32>) {
        self.upgrade_discount = CostOverride::new(amount, times);
    }

    #[must_use]
    pub fn tavern_upgrade_discount(&self) -> u32 {
        self.upgrade_discount.value(0)
    }

    // === Freeze ===

    /// Keep the current recruits for the next turn.
    ///
    /// Fails if already frozen or if the per-turn freeze limit is reached.
    pub fn freeze(&mut self) -> bool {
        let past_limit = self
            .config
            .max_freeze_times
            .is_some_and(|max| self.times_frozen >= max);
        if self.is_frozen || past_limit {
            return false;
        }

        self.times_frozen += 1;
        self.is_frozen = true;
        true
    }

    /// Fails if not frozen.
    pub fn unfreeze(&mut self) -> bool {
        if !self.is_frozen {
            return false;
        }
        self.is_frozen = false;
        true
    }

    // === Hero and gold ===

    pub fn attack_hero(&mut self, damage: i32) {
        self.hero_health -= damage;
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hero_health <= 0
    }

    /// Add gold, capped at the maximum.
    pub fn give_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount).min(self.config.max_gold);
    }

    // === Minion transfers ===

    /// Buy the recruit at `index` into the first open hand slot.
    ///
    /// Fails if the slot is empty or out of range, the player cannot afford
    /// the price, or the hand is full.
    pub fn buy_minion(&mut self, index: usize) -> bool {
        let price = self.config.buy_price;
        if !matches!(self.recruits.get(index), Some(Some(_))) || self.gold < price {
            return false;
        }
        let Some(slot) = first_open(&self.hand) else {
            return false;
        };
        let Some(minion) = self.recruits[index].take() else {
            return false;
        };

        self.gold -= price;
        log::trace!("Bought {} into hand slot {}", minion, slot);
        self.hand[slot] = Some(minion.clone());
        self.fire(MinionEvent::Bought, &minion, SlotRef::Hand(slot), None);
        true
    }

    /// Put a minion in the hand at `index`, or the first open slot.
    ///
    /// With `clone`, an unbuffed copy with a new identity is placed instead.
    /// Fails if the slot is out of range or occupied, or the hand is full;
    /// the caller keeps `minion` either way.
    pub fn add_minion_to_hand(&mut self, minion: &Minion, index: Option<usize>, clone: bool) -> bool {
        let slot = match index {
            Some(i) if matches!(self.hand.get(i), Some(None)) => i,
            Some(_) => return false,
            None => match first_open(&self.hand) {
                Some(i) => i,
                None => return false,
            },
        };

        let minion = if clone {
            self.pool.borrow_mut().copy_of(minion)
        } else {
            minion.clone()
        };
        self.hand[slot] = Some(minion);
        true
    }

    /// Sell the board minion at `index` back to the pool.
    pub fn sell_minion(&mut self, index: usize) -> bool {
        let Some(minion) = self.board.get_mut(index).and_then(Option::take) else {
            return false;
        };

        log::trace!("Sold {} from board slot {}", minion, index);
        self.pool.borrow_mut().insert_one(minion.clone());
        self.give_gold(self.config.sell_price);
        self.fire(MinionEvent::Sold, &minion, SlotRef::Detached, None);
        true
    }

    /// Play the hand minion at `hand_index` onto the board.
    ///
    /// `board_index` picks the board slot; when it is `None`, out of range
    /// or occupied the first open slot is used. Fails if the hand slot is
    /// empty or the board is full.
    pub fn play_minion(&mut self, hand_index: usize, board_index: Option<usize>) -> bool {
        if !matches!(self.hand.get(hand_index), Some(Some(_))) {
            return false;
        }
        let Some(slot) = self.resolve_board_slot(board_index) else {
            return false;
        };
        let Some(minion) = self.hand[hand_index].take() else {
            return false;
        };

        log::trace!("Played {} into board slot {}", minion, slot);
        self.board[slot] = Some(minion.clone());
        self.fire(MinionEvent::Played, &minion, SlotRef::Board(slot), None);
        self.broadcast(MinionEvent::AnyPlayed, Some(&minion));
        true
    }

    /// Place a minion on the board, e.g. a token created by a card effect.
    ///
    /// Slot resolution follows `play_minion`. With `clone`, an unbuffed copy
    /// with a new identity is placed. With `fire_hooks`, the summoned hook
    /// and the any-summoned broadcast run. Fails if the board is full.
    pub fn summon_minion(
        &mut self,
        minion: &Minion,
        index: Option<usize>,
        clone: bool,
        fire_hooks: bool,
    ) -> bool {
        let Some(slot) = self.resolve_board_slot(index) else {
            return false;
        };

        let minion = if clone {
            self.pool.borrow_mut().copy_of(minion)
        } else {
            minion.clone()
        };
        log::trace!("Summoned {} into board slot {}", minion, slot);
        self.board[slot] = Some(minion.clone());
        if fire_hooks {
            self.fire(MinionEvent::Summoned, &minion, SlotRef::Board(slot), None);
            self.broadcast(MinionEvent::AnySummoned, Some(&minion));
        }
        true
    }

    /// Detach the board minion at `index` without returning it to the pool.
    pub fn remove_minion_from_board(&mut self, index: usize) -> Option<Minion> {
        self.board.get_mut(index).and_then(Option::take)
    }

    /// Create a minion from the pool's catalog without drawing it.
    pub fn create_minion(&self, filter: &MinionFilter) -> Option<Minion> {
        self.pool.borrow_mut().create(filter)
    }

    fn resolve_board_slot(&self, index: Option<usize>) -> Option<usize> {
        match index {
            Some(i) if matches!(self.board.get(i), Some(None)) => Some(i),
            _ => first_open(&self.board),
        }
    }

    // === Board queries ===

    /// Board indices of occupied slots matching `filter`, skipping `ignore`.
    #[must_use]
    pub fn board_indices(&self, filter: &MinionFilter, ignore: &[EntityId]) -> Vec<usize> {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|m| (i, m)))
            .filter(|(_, m)| !ignore.contains(&m.id) && filter.matches(m))
            .map(|(i, _)| i)
            .collect()
    }

    /// Matching board minions in board order.
    ///
    /// Without `clone` the returned values keep their identity; with `clone`
    /// they are unbuffed copies with new identities.
    pub fn minions_on_board(
        &self,
        filter: &MinionFilter,
        ignore: &[EntityId],
        clone: bool,
    ) -> Vec<Minion> {
        let indices = self.board_indices(filter, ignore);
        self.collect_board(&indices, clone)
    }

    /// Up to `n` distinct matching board minions chosen uniformly at random.
    pub fn random_minions_on_board(
        &mut self,
        n: usize,
        filter: &MinionFilter,
        ignore: &[EntityId],
        clone: bool,
    ) -> Vec<Minion> {
        let indices = self.board_indices(filter, ignore);
        let picked: Vec<usize> = self
            .rng
            .sample_indices(indices.len(), n)
            .into_iter()
            .map(|i| indices[i])
            .collect();
        self.collect_board(&picked, clone)
    }

    pub fn random_minion_on_board(
        &mut self,
        filter: &MinionFilter,
        ignore: &[EntityId],
        clone: bool,
    ) -> Option<Minion> {
        self.random_minions_on_board(1, filter, ignore, clone).pop()
    }

    /// Board index of the minion with identity `id`.
    #[must_use]
    pub fn index_of_minion_on_board(&self, id: EntityId) -> Option<usize> {
        self.board
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|m| m.id == id))
    }

    fn collect_board(&self, indices: &[usize], clone: bool) -> Vec<Minion> {
        let minions = indices.iter().filter_map(|&i| self.board[i].as_ref());
        if clone {
            let mut pool = self.pool.borrow_mut();
            minions.map(|m| pool.copy_of(m)).collect()
        } else {
            minions.cloned().collect()
        }
    }

    #[must_use]
    pub fn minion_at(&self, slot: SlotRef) -> Option<&Minion> {
        match slot {
            SlotRef::Hand(i) => self.hand.get(i)?.as_ref(),
            SlotRef::Board(i) => self.board.get(i)?.as_ref(),
            SlotRef::Detached => None,
        }
    }

    pub fn minion_at_mut(&mut self, slot: SlotRef) -> Option<&mut Minion> {
        match slot {
            SlotRef::Hand(i) => self.hand.get_mut(i)?.as_mut(),
            SlotRef::Board(i) => self.board.get_mut(i)?.as_mut(),
            SlotRef::Detached => None,
        }
    }

    // === Hook dispatch ===

    fn fire(&mut self, event: MinionEvent, minion: &Minion, slot: SlotRef, trigger: Option<&Minion>) {
        let handlers = self.hooks.handlers(&minion.name, event);
        if handlers.is_empty() {
            return;
        }

        let ctx = HookContext {
            event,
            minion: minion.clone(),
            slot,
            trigger: trigger.cloned(),
        };
        for handler in handlers {
            handler(self, &ctx);
        }
    }

    /// Fire `event` on every occupied hand slot, then every occupied board
    /// slot, except the trigger itself.
    fn broadcast(&mut self, event: MinionEvent, trigger: Option<&Minion>) {
        let skip = trigger.map(|m| m.id);
        let targets: Vec<(SlotRef, Minion)> = self
            .hand
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|m| (SlotRef::Hand(i), m)))
            .chain(
                self.board
                    .iter()
                    .enumerate()
                    .filter_map(|(i, s)| s.as_ref().map(|m| (SlotRef::Board(i), m))),
            )
            .filter(|(_, m)| Some(m.id) != skip && self.hooks.has_handlers(&m.name, event))
            .map(|(slot, m)| (slot, m.clone()))
            .collect();

        for (slot, minion) in targets {
            // An earlier handler may have moved or removed this target.
            if self.minion_at(slot).is_some_and(|m| m.id == minion.id) {
                self.fire(event, &minion, slot, trigger);
            }
        }
    }

    // === Combat ===

    /// Fight `enemy` through `combat`.
    ///
    /// The result is recorded on this board and its inverse on the enemy's.
    /// Neither board changes if the engine fails.
    pub fn battle(
        &mut self,
        enemy: &mut TavernBoard,
        combat: &mut impl CombatSimulator,
        trials: u32,
    ) -> Result<Battle> {
        let battle = combat.simulate(&self.snapshot(), &enemy.snapshot(), trials)?;
        self.record_battle(&battle);
        enemy.record_battle(&battle.invert());
        Ok(battle)
    }

    /// Apply a battle seen from this board's side: hero health becomes the
    /// expected health truncated toward zero and the battle joins the history.
    pub fn record_battle(&mut self, battle: &Battle) {
        self.hero_health = battle.expected_hero_health as i32;
        self.battle_history.push(*battle);
    }

    /// Whether the most recent battle was won outright.
    #[must_use]
    pub fn won_previous(&self) -> bool {
        self.battle_history.last().is_some_and(Battle::won)
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.tavern_tier, self.hero_health, &self.board)
    }

    // === Moves ===

    /// Moves available this turn, in the order: end turn, freeze, upgrade,
    /// refresh, buys, sells, plays.
    ///
    /// End turn and freeze are always listed. Upgrade and refresh are listed
    /// when affordable, buys for each occupied recruit slot when the price is
    /// affordable, sells for each occupied board slot and plays for each
    /// occupied hand slot.
    #[must_use]
    pub fn valid_moves(&self) -> Vec<Move> {
        let mut moves = vec![Move::simple(Action::EndTurn), Move::simple(Action::Freeze)];

        if self.upgrade_cost(true).is_some_and(|cost| self.gold >= cost) {
            moves.push(Move::simple(Action::Upgrade));
        }
        if self.gold >= self.refresh_cost() {
            moves.push(Move::simple(Action::Refresh));
        }
        if self.gold >= self.config.buy_price {
            moves.extend(occupied(&self.recruits).map(|i| Move::indexed(Action::Buy, i)));
        }
        moves.extend(occupied(&self.board).map(|i| Move::indexed(Action::Sell, i)));
        moves.extend(occupied(&self.hand).map(|i| Move::indexed(Action::Play, i)));
        moves
    }

    /// Apply a move. Returns whether it succeeded.
    ///
    /// `EndTurn` has no effect on the board itself and always succeeds;
    /// ending the turn is the orchestrator's job.
    pub fn apply_move(&mut self, mv: &Move) -> bool {
        match (mv.action, mv.index) {
            (Action::Upgrade, None) => self.upgrade_tavern(true),
            (Action::Refresh, None) => self.refresh_recruits(),
            (Action::Freeze, None) => self.freeze(),
            (Action::EndTurn, None) => true,
            (Action::Buy, Some(i)) => self.buy_minion(i),
            (Action::Sell, Some(i)) => self.sell_minion(i),
            (Action::Play, Some(i)) => self.play_minion(i, None),
            _ => false,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn hero_health(&self) -> i32 {
        self.hero_health
    }

    #[must_use]
    pub fn tavern_tier(&self) -> u8 {
        self.tavern_tier
    }

    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.is_frozen
    }

    #[must_use]
    pub fn times_frozen(&self) -> u32 {
        self.times_frozen
    }

    #[must_use]
    pub fn num_recruits(&self) -> usize {
        self.num_recruits
    }

    #[must_use]
    pub fn hand(&self) -> &[Option<Minion>] {
        &self.hand
    }

    #[must_use]
    pub fn board(&self) -> &[Option<Minion>] {
        &self.board
    }

    #[must_use]
    pub fn recruits(&self) -> &[Option<Minion>] {
        &self.recruits
    }

    #[must_use]
    pub fn battle_history(&self) -> &[Battle] {
        &self.battle_history
    }

    #[must_use]
    pub fn pool(&self) -> &SharedPool {
        &self.pool
    }

    #[must_use]
    pub fn config(&self) -> &TavernConfig {
        &self.config
    }

    /// Minions held across hand, board and recruit slots.
    #[must_use]
    pub fn count_minions(&self) -> usize {
        [&self.hand, &self.board, &self.recruits]
            .iter()
            .map(|slots| slots.iter().flatten().count())
            .sum()
    }
}

impl std::fmt::Debug for TavernBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TavernBoard")
            .field("turn_number", &self.turn_number)
            .field("hero_health", &self.hero_health)
            .field("tavern_tier", &self.tavern_tier)
            .field("gold", &self.gold)
            .field("is_frozen", &self.is_frozen)
            .field("hand", &self.hand)
            .field("board", &self.board)
            .field("recruits", &self.recruits)
            .finish_non_exhaustive()
    }
}

fn first_open(slots: &[Option<Minion>]) -> Option<usize> {
    slots.iter().position(Option::is_none)
}

fn occupied(slots: &[Option<Minion>]) -> impl Iterator<Item = usize> + '_ {
    slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_some())
        .map(|(i, _)| i)
}
