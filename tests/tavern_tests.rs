//! Tavern board scenarios through the public API.

mod common;

use common::{plain_board, starter_board, total_minions};
use tavern_sim::{Action, GoldSchedule, Move, MinionFilter, TavernConfig};

#[test]
fn test_hero_survives_then_dies() {
    let mut board = plain_board(TavernConfig::default(), 1);
    board.attack_hero(31);
    assert!(!board.is_dead());
    assert_eq!(board.hero_health(), 9);
    board.attack_hero(20);
    assert!(board.is_dead());
}

/// A turn-3 board under the turn-indexed schedule has exactly the price of
/// one minion.
#[test]
fn test_turn_three_buy_with_exact_gold() {
    let config = TavernConfig::default().with_gold_schedule(GoldSchedule::TurnIndexed);
    let mut board = plain_board(config, 2);
    for _ in 0..3 {
        board.next_turn();
    }
    assert_eq!(board.gold(), 3);

    let recruit = board.recruits()[0].clone().unwrap();
    assert!(board.buy_minion(0));
    assert_eq!(board.gold(), 0);
    assert!(board.recruits()[0].is_none());
    assert_eq!(board.hand()[0].as_ref(), Some(&recruit));
    assert_eq!(board.hand()[0].as_ref().unwrap().id, recruit.id);
}

#[test]
fn test_default_schedule_starts_with_three_gold() {
    let mut board = plain_board(TavernConfig::default(), 3);
    let mut gold = Vec::new();
    for _ in 0..10 {
        board.next_turn();
        gold.push(board.gold());
    }
    assert_eq!(gold, vec![3, 4, 5, 6, 7, 8, 9, 10, 10, 10]);
}

#[test]
fn test_single_use_refresh_cost() {
    let mut board = plain_board(TavernConfig::default(), 4);
    board.set_refresh_cost(10, Some(1));
    board.give_gold(10);

    assert!(board.refresh_recruits());
    assert_eq!(board.gold(), 0);
    assert_eq!(board.refresh_cost(), 1);
}

#[test]
fn test_permanent_and_zero_use_overrides() {
    let mut board = plain_board(TavernConfig::default(), 5);
    board.set_refresh_cost(0, None);
    for _ in 0..5 {
        assert!(board.refresh_recruits());
    }
    assert_eq!(board.refresh_cost(), 0);

    board.set_refresh_cost(7, Some(0));
    assert_eq!(board.refresh_cost(), 1);
}

#[test]
fn test_two_use_upgrade_discount() {
    let mut board = plain_board(TavernConfig::default(), 6);
    board.set_tavern_upgrade_discount(10, Some(2));
    assert_eq!(board.gold(), 0);

    assert!(board.upgrade_tavern(true));
    assert!(board.upgrade_tavern(true));
    assert!(!board.upgrade_tavern(true));
    assert_eq!(board.tavern_tier(), 3);
}

#[test]
fn test_freeze_toggle_limit_resets_each_turn() {
    let config = TavernConfig::default().with_max_freeze_times(2);
    let mut board = plain_board(config, 7);
    board.next_turn();

    assert!(board.freeze());
    assert!(board.unfreeze());
    assert!(board.freeze());
    assert!(board.unfreeze());
    assert!(!board.freeze());
    assert_eq!(board.times_frozen(), 2);

    board.next_turn();
    assert_eq!(board.times_frozen(), 0);
    assert!(board.freeze());
}

#[test]
fn test_frozen_recruits_survive_the_turn() {
    let mut board = plain_board(TavernConfig::default(), 8);
    board.next_turn();
    let ids: Vec<_> = board.recruits().iter().flatten().map(|m| m.id).collect();
    assert!(board.freeze());
    assert!(!board.refresh_recruits());

    board.next_turn();
    let kept: Vec<_> = board.recruits().iter().flatten().map(|m| m.id).collect();
    assert_eq!(ids, kept);
    assert!(!board.is_frozen());
}

#[test]
fn test_recruits_follow_tier_and_progression() {
    let mut board = plain_board(TavernConfig::default(), 9);
    board.set_tavern_upgrade_discount(100, None);
    let mut seen = vec![board.num_recruits()];
    for _ in 0..5 {
        assert!(board.upgrade_tavern(true));
        seen.push(board.num_recruits());
    }
    assert_eq!(seen, vec![3, 4, 4, 5, 5, 6]);

    board.next_turn();
    assert_eq!(board.recruits().iter().flatten().count(), 6);
}

#[test]
fn test_minions_are_conserved() {
    let mut board = plain_board(TavernConfig::default(), 10);
    let total = total_minions(&board);

    for _ in 0..6 {
        board.next_turn();
        assert_eq!(total_minions(&board), total);
        if board.buy_minion(0) {
            assert_eq!(total_minions(&board), total);
            assert!(board.play_minion(0, None));
        }
        assert!(board.refresh_recruits() || board.gold() < board.refresh_cost());
        assert_eq!(total_minions(&board), total);
        if board.board()[0].is_some() {
            assert!(board.sell_minion(0));
        }
        board.upgrade_tavern(true);
        assert_eq!(total_minions(&board), total);
    }
}

#[test]
fn test_sold_minion_returns_unbuffed() {
    let mut board = starter_board(11);
    let seer = board
        .create_minion(&MinionFilter::named("Coldlight Seer"))
        .unwrap();
    let tidehunter = board
        .create_minion(&MinionFilter::named("Murloc Tidehunter"))
        .unwrap();
    assert!(board.add_minion_to_hand(&tidehunter, None, false));
    assert!(board.add_minion_to_hand(&seer, None, false));
    assert!(board.play_minion(0, None));
    assert!(board.play_minion(1, None));

    let buffed = board.board()[0].clone().unwrap();
    assert_eq!(buffed.current_health(), 3);
    let before = board.pool().borrow().count(&MinionFilter::named("Murloc Tidehunter"));

    assert!(board.sell_minion(0));
    let pool = board.pool().borrow();
    assert_eq!(
        pool.count(&MinionFilter::named("Murloc Tidehunter")),
        before + 1
    );
    let returned = pool.iter().find(|m| m.id == buffed.id).unwrap();
    assert!(returned.buffs().is_empty());
    assert_eq!(returned.current_health(), 1);
}

#[test]
fn test_selling_a_token_does_not_grow_the_pool() {
    let mut board = starter_board(12);
    let cat = board.create_minion(&MinionFilter::named("Alleycat")).unwrap();
    assert!(board.add_minion_to_hand(&cat, None, false));
    assert!(board.play_minion(0, None));
    assert_eq!(board.board()[1].as_ref().unwrap().name, "Tabbycat");

    let before = board.pool().borrow().len();
    assert!(board.sell_minion(1));
    assert_eq!(board.pool().borrow().len(), before);
    assert_eq!(board.gold(), 1);
}

#[test]
fn test_move_list_drives_the_board() {
    let mut board = plain_board(TavernConfig::default(), 13);
    board.next_turn();

    let moves = board.valid_moves();
    assert_eq!(moves[0], Move::simple(Action::EndTurn));
    assert_eq!(moves[1], Move::simple(Action::Freeze));
    assert!(moves.contains(&Move::indexed(Action::Buy, 0)));

    assert!(board.apply_move(&Move::indexed(Action::Buy, 0)));
    assert!(board.apply_move(&Move::indexed(Action::Play, 0)));
    assert!(board
        .valid_moves()
        .contains(&Move::indexed(Action::Sell, 0)));
    assert!(board.apply_move(&Move::indexed(Action::Sell, 0)));
    assert_eq!(board.gold(), 1);
    assert!(board.apply_move(&Move::simple(Action::Refresh)));
    assert_eq!(board.gold(), 0);
}

#[test]
fn test_rejected_transfer_leaves_minion_with_caller() {
    let mut board = plain_board(TavernConfig::default(), 14);
    for _ in 0..10 {
        let cat = board.create_minion(&MinionFilter::named("Alleycat")).unwrap();
        assert!(board.add_minion_to_hand(&cat, None, false));
    }
    for _ in 0..7 {
        let cat = board.create_minion(&MinionFilter::named("Alleycat")).unwrap();
        assert!(board.summon_minion(&cat, None, false, false));
    }
    let total = total_minions(&board);

    let drawn = board.pool().borrow_mut().get_random(1, 1).pop().unwrap();
    assert!(!board.add_minion_to_hand(&drawn, None, false));
    assert!(!board.summon_minion(&drawn, None, false, true));
    assert!(board.hand().iter().flatten().all(|m| m.id != drawn.id));
    assert!(board.board().iter().flatten().all(|m| m.id != drawn.id));

    assert!(board.pool().borrow_mut().insert_one(drawn));
    assert_eq!(total_minions(&board), total);
}
