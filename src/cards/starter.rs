//! A small built-in card set.
//!
//! `starter_registry` holds a handful of real minions per tier, their
//! tokens and some golden variants, enough to run full games without a
//! catalog file. `starter_hooks` implements the effects of a few of them.

use super::ability::{Abilities, Buff};
use super::definition::{MinionDefinition, MinionRace};
use super::filter::MinionFilter;
use super::registry::CardRegistry;
use super::definition::MinionRace::{Beast, Demon, Mechanical, Murloc, Pirate};
use crate::tavern::{HookContext, HookRegistry, MinionEvent, SlotRef, TavernBoard};

struct Entry {
    name: &'static str,
    tier: u8,
    attack: i32,
    health: i32,
    race: Option<MinionRace>,
    abilities: Abilities,
    text: &'static str,
}

const fn entry(
    name: &'static str,
    tier: u8,
    attack: i32,
    health: i32,
    race: Option<MinionRace>,
    text: &'static str,
) -> Entry {
    Entry {
        name,
        tier,
        attack,
        health,
        race,
        abilities: Abilities::NONE,
        text,
    }
}

const fn keyworded(mut e: Entry, abilities: Abilities) -> Entry {
    e.abilities = abilities;
    e
}

const DRAWABLE: &[Entry] = &[
    entry("Alleycat", 1, 1, 1, Some(Beast), "Battlecry: Summon a 1/1 Cat."),
    entry("Murloc Tidehunter", 1, 2, 1, Some(Murloc), "Battlecry: Summon a 1/1 Murloc Scout."),
    entry("Rockpool Hunter", 1, 2, 3, Some(Murloc), "Battlecry: Give a friendly Murloc +1/+1."),
    entry("Dire Wolf Alpha", 1, 2, 2, Some(Beast), "Adjacent minions have +1 Attack."),
    entry("Micro Machine", 1, 1, 2, Some(Mechanical), "At the start of each turn, gain +1 Attack."),
    keyworded(
        entry("Righteous Protector", 1, 1, 1, None, "Taunt. Divine Shield"),
        Abilities::TAUNT.union(Abilities::DIVINE_SHIELD),
    ),
    entry("Selfless Hero", 1, 2, 1, None, "Deathrattle: Give a random friendly minion Divine Shield."),
    keyworded(
        entry("Vulgar Homunculus", 1, 2, 4, Some(Demon), "Taunt. Battlecry: Deal 2 damage to your hero."),
        Abilities::TAUNT,
    ),
    entry("Wrath Weaver", 1, 1, 3, None, "After you play a Demon, deal 1 damage to your hero and gain +2/+2."),
    entry("Coldlight Seer", 2, 2, 3, Some(Murloc), "Battlecry: Give your other Murlocs +2 Health."),
    entry("Kindly Grandmother", 2, 1, 1, Some(Beast), "Deathrattle: Summon a 3/2 Big Bad Wolf."),
    entry("Scavenging Hyena", 2, 2, 2, Some(Beast), "Whenever a friendly Beast dies, gain +2/+1."),
    entry("Metaltooth Leaper", 2, 3, 3, Some(Mechanical), "Battlecry: Give your other Mechs +2 Attack."),
    entry("Freedealing Gambler", 2, 3, 3, Some(Pirate), "This minion sells for 3 Gold."),
    entry("Cobalt Guardian", 3, 6, 3, Some(Mechanical), "Whenever you summon a Mech, gain Divine Shield."),
    entry("Infested Wolf", 3, 3, 3, Some(Beast), "Deathrattle: Summon two 1/1 Spiders."),
    entry("Pack Leader", 3, 2, 3, None, "Whenever you summon a Beast, give it +2 Attack."),
    entry("Cave Hydra", 4, 2, 4, Some(Beast), "Also damages the minions next to whomever this attacks."),
    entry("Annihilan Battlemaster", 4, 3, 1, Some(Demon), "Battlecry: Gain +1 Health for each damage your hero has taken."),
    entry("Junkbot", 4, 1, 5, Some(Mechanical), "Whenever a friendly Mech dies, gain +2/+2."),
    entry("Mal'Ganis", 5, 9, 7, Some(Demon), "Your other Demons have +2/+2. Your hero is Immune."),
    keyworded(
        entry("Maexxna", 6, 2, 8, Some(Beast), "Poisonous"),
        Abilities::POISONOUS,
    ),
    keyworded(
        entry("Zapp Slywick", 6, 7, 10, None, "Windfury. This minion always attacks the enemy minion with the lowest Attack."),
        Abilities::WINDFURY,
    ),
];

const TOKENS: &[Entry] = &[
    entry("Tabbycat", 1, 1, 1, Some(Beast), ""),
    entry("Murloc Scout", 1, 1, 1, Some(Murloc), ""),
];

/// Golden stats by base name. Everything else is copied from the base card.
const GOLDEN: &[(&str, i32, i32)] = &[
    ("Alleycat", 2, 2),
    ("Tabbycat", 2, 2),
    ("Murloc Tidehunter", 4, 2),
    ("Murloc Scout", 2, 2),
    ("Coldlight Seer", 4, 6),
    ("Micro Machine", 2, 4),
    ("Wrath Weaver", 2, 6),
    ("Freedealing Gambler", 6, 6),
    ("Pack Leader", 4, 6),
];

fn define(registry: &mut CardRegistry, e: &Entry) -> MinionDefinition {
    let mut definition = MinionDefinition::new(registry.next_id(), e.name, e.tier, e.attack, e.health)
        .with_abilities(e.abilities);
    if !e.text.is_empty() {
        definition = definition.with_text(e.text);
    }
    if let Some(race) = e.race {
        definition = definition.with_race(race);
    }
    definition
}

/// The built-in card set.
///
/// ```
/// use tavern_sim::cards::starter_registry;
///
/// let registry = starter_registry();
/// let cat = registry.lookup("Alleycat", true).unwrap();
/// assert_eq!((cat.attack, cat.health), (2, 2));
/// assert!(registry.lookup("Tabbycat", false).unwrap().is_token);
/// ```
#[must_use]
pub fn starter_registry() -> CardRegistry {
    let mut registry = CardRegistry::new();

    for e in DRAWABLE {
        let definition = define(&mut registry, e);
        registry.register(definition);
    }
    for e in TOKENS {
        let definition = define(&mut registry, e).token();
        registry.register(definition);
    }
    for &(name, attack, health) in GOLDEN {
        let Some(e) = DRAWABLE.iter().chain(TOKENS).find(|e| e.name == name) else {
            continue;
        };
        let mut definition = define(&mut registry, e).golden();
        definition.attack = attack;
        definition.health = health;
        if TOKENS.iter().any(|t| t.name == name) {
            definition = definition.token();
        }
        registry.register(definition);
    }

    registry
}

/// Scale a regular effect amount for golden minions.
fn scaled(ctx: &HookContext, regular: i32, golden: i32) -> i32 {
    if ctx.minion.is_golden {
        golden
    } else {
        regular
    }
}

/// Summon a token directly to the right of the played minion.
fn summon_token(board: &mut TavernBoard, ctx: &HookContext, token: &str) {
    let SlotRef::Board(slot) = ctx.slot else {
        return;
    };
    let filter = MinionFilter::named(token).golden(ctx.minion.is_golden);
    if let Some(minion) = board.create_minion(&filter) {
        board.summon_minion(&minion, Some(slot + 1), false, true);
    }
}

fn buff_slot(board: &mut TavernBoard, slot: SlotRef, buff: Buff) {
    if let Some(minion) = board.minion_at_mut(slot) {
        minion.add_buff(buff);
    }
}

/// Effects for the starter set.
///
/// Only effects that matter during the recruit phase are implemented;
/// combat keywords are left to the combat engine.
#[must_use]
pub fn starter_hooks() -> HookRegistry {
    let mut hooks = HookRegistry::new();

    hooks
        .on("Alleycat", MinionEvent::Played, |board, ctx| {
            summon_token(board, ctx, "Tabbycat");
        })
        .on("Murloc Tidehunter", MinionEvent::Played, |board, ctx| {
            summon_token(board, ctx, "Murloc Scout");
        })
        .on("Coldlight Seer", MinionEvent::Played, |board, ctx| {
            let health = scaled(ctx, 2, 4);
            let murlocs = MinionFilter::any().with_race(Murloc);
            for index in board.board_indices(&murlocs, &[ctx.minion.id]) {
                buff_slot(board, SlotRef::Board(index), Buff::new(0, health));
            }
        })
        .on("Micro Machine", MinionEvent::NewTurn, |board, ctx| {
            if matches!(ctx.slot, SlotRef::Board(_)) {
                buff_slot(board, ctx.slot, Buff::new(scaled(ctx, 1, 2), 0));
            }
        })
        .on("Wrath Weaver", MinionEvent::AnyPlayed, |board, ctx| {
            let demon = ctx.trigger.as_ref().is_some_and(|m| m.has_race(Demon));
            if demon && matches!(ctx.slot, SlotRef::Board(_)) {
                let stats = scaled(ctx, 2, 4);
                board.attack_hero(1);
                buff_slot(board, ctx.slot, Buff::new(stats, stats));
            }
        })
        .on("Freedealing Gambler", MinionEvent::Sold, |board, ctx| {
            board.give_gold(if ctx.minion.is_golden { 5 } else { 2 });
        })
        .on("Pack Leader", MinionEvent::AnySummoned, |board, ctx| {
            if !matches!(ctx.slot, SlotRef::Board(_)) {
                return;
            }
            let Some(beast) = ctx.trigger.as_ref().filter(|m| m.has_race(Beast)) else {
                return;
            };
            if let Some(index) = board.index_of_minion_on_board(beast.id) {
                buff_slot(board, SlotRef::Board(index), Buff::new(scaled(ctx, 2, 4), 0));
            }
        });

    hooks
}
