//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use tavern_sim::combat::{Battle, BoardSnapshot};
use tavern_sim::error::Result;
use tavern_sim::{starter_hooks, starter_registry, GameRng, HookRegistry, MinionPool, SharedPool, TavernBoard, TavernConfig};

pub const POOL_COPIES: [usize; 6] = [16, 15, 13, 11, 9, 7];

pub fn shared_pool(seed: u64) -> SharedPool {
    MinionPool::from_catalog(Rc::new(starter_registry()), &POOL_COPIES, GameRng::new(seed)).into_shared()
}

/// Board over the starter set without card effects.
pub fn plain_board(config: TavernConfig, seed: u64) -> TavernBoard {
    TavernBoard::new(
        Rc::new(config),
        shared_pool(seed),
        Rc::new(HookRegistry::new()),
        GameRng::new(seed.wrapping_add(1)),
    )
}

/// Board over the starter set with its card effects.
pub fn starter_board(seed: u64) -> TavernBoard {
    TavernBoard::new(
        Rc::new(TavernConfig::default()),
        shared_pool(seed),
        Rc::new(starter_hooks()),
        GameRng::new(seed.wrapping_add(1)),
    )
}

/// Minions held by a board plus those still in its pool.
pub fn total_minions(board: &TavernBoard) -> usize {
    board.count_minions() + board.pool().borrow().len()
}

/// Combat engine stub: the side with more total attack wins and deals
/// damage equal to its tavern tier plus minion count. Equal boards go to
/// the friendly side.
pub fn attack_engine(friendly: &BoardSnapshot, enemy: &BoardSnapshot, _trials: u32) -> Result<Battle> {
    let power = |b: &BoardSnapshot| b.minions.iter().map(|m| m.attack).sum::<i32>();
    let damage = |b: &BoardSnapshot| i32::from(b.tavern_tier) + b.minions.len() as i32;

    let (ours, theirs) = (power(friendly), power(enemy));
    let mut battle = Battle {
        expected_hero_health: f64::from(friendly.hero_health),
        expected_enemy_hero_health: f64::from(enemy.hero_health),
        ..Battle::default()
    };
    if ours >= theirs {
        battle.win_probability = 1.0;
        battle.mean_damage_dealt = f64::from(damage(friendly));
        battle.expected_enemy_hero_health -= battle.mean_damage_dealt;
    } else {
        battle.lose_probability = 1.0;
        battle.mean_damage_taken = f64::from(damage(enemy));
        battle.expected_hero_health -= battle.mean_damage_taken;
    }
    Ok(battle)
}

pub type Engine = fn(&BoardSnapshot, &BoardSnapshot, u32) -> Result<Battle>;
