// tests/stats_tests.rs
//
// Статистика раздачи:
//  D) раздача закончилась на префлопе: банк не растёт, борда и шоудауна нет;
//  плюс join flop, WTSD (в том числе прочеканный ривер), банк по улицам,
//  открытые карты и выигрыш.

use std::collections::BTreeSet;

use poker_tracker::domain::{parse_cards, Chips, Street};
use poker_tracker::engine::{Action, ActionKind, BlindType, Hand, RawStat};

// -----------------------------
// ВСПОМОГАТЕЛЬНЫЕ КОНСТРУКТОРЫ
// -----------------------------

fn start(id: &str) -> Action {
    Action::table(ActionKind::Start {
        hand_id: id.to_string(),
        dealer: None,
    })
}

fn small(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Blind { blind: BlindType::Small, amount: Chips(amount) })
}

fn big(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Blind { blind: BlindType::Big, amount: Chips(amount) })
}

fn bet(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Bet { amount: Chips(amount) })
}

fn raise(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Raise { amount: Chips(amount) })
}

fn call(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Call { amount: Chips(amount) })
}

fn check(p: &str) -> Action {
    Action::by(p, ActionKind::Check)
}

fn fold(p: &str) -> Action {
    Action::by(p, ActionKind::Fold)
}

fn show(p: &str, cards: &str) -> Action {
    Action::by(p, ActionKind::Show { cards: parse_cards(cards).unwrap() })
}

fn collect(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Collect { amount: Chips(amount) })
}

fn street(street: Street, cards: &str) -> Action {
    Action::table(ActionKind::StreetCard {
        street,
        cards: parse_cards(cards).unwrap(),
    })
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Рейз C на префлопе, баррели на всех улицах, B доходит до вскрытия.
fn showdown_hand() -> Vec<Action> {
    vec![
        start("S1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        fold("A"),
        call("B", 6),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("B"),
        bet("C", 8),
        call("B", 8),
        street(Street::Turn, "2s"),
        check("B"),
        bet("C", 20),
        call("B", 20),
        street(Street::River, "9h"),
        check("B"),
        bet("C", 50),
        call("B", 50),
        show("C", "As, Ac"),
        show("B", "Kh, Ks"),
        collect("C", 169),
    ]
}

// -----------------------------
// ТЕСТЫ
// -----------------------------

#[test]
fn hand_ending_preflop_keeps_pot_flat() {
    let hand = Hand::from_actions(&[
        start("P1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        fold("A"),
        fold("B"),
        collect("C", 9),
    ])
    .unwrap();

    assert_eq!(hand.stats.preflop_pot, Chips(9));
    assert_eq!(hand.stats.flop_pot, hand.stats.preflop_pot);
    assert_eq!(hand.stats.turn_pot, hand.stats.preflop_pot);
    assert_eq!(hand.stats.final_pot, hand.stats.preflop_pot);
    assert!(hand.stats.wtsd.is_empty());
    assert!(hand.stats.join_flop.is_empty());
    assert!(hand.board.is_empty());
    assert_eq!(hand.winners(), vec!["C"]);
    // PFR без флопа – возможности c-bet не было.
    assert_eq!(hand.stats.sheet("C").unwrap().preflop_lead, 0);
}

#[test]
fn pots_accumulate_by_street() {
    let hand = Hand::from_actions(&showdown_hand()).unwrap();

    assert_eq!(hand.stats.preflop_pot, Chips(13));
    assert_eq!(hand.stats.flop_pot, Chips(29));
    assert_eq!(hand.stats.turn_pot, Chips(69));
    assert_eq!(hand.stats.final_pot, Chips(169));
    assert!(hand.stats.preflop_pot <= hand.stats.flop_pot);
}

#[test]
fn join_flop_and_showdown_players() {
    let hand = Hand::from_actions(&showdown_hand()).unwrap();

    assert_eq!(hand.stats.join_flop, names(&["B", "C"]));
    assert_eq!(hand.stats.wtsd, names(&["B", "C"]));
    assert_eq!(hand.stats.vpip, names(&["B", "C"]));

    let a = hand.stats.sheet("A").unwrap();
    assert_eq!(a.hands, 1);
    assert_eq!(a.vpip, 0);
    assert_eq!(a.join_flop, 0);

    let c = hand.stats.sheet("C").unwrap();
    assert_eq!(c.preflop_lead, 1);
    assert_eq!(c.join_flop, 1);
    assert_eq!(c.wtsd, 1);
    assert_eq!(hand.stats.players_with(RawStat::TripleBarrel), names(&["C"]));
    assert_eq!(hand.stats.players_with(RawStat::CallTriple), names(&["B"]));
}

#[test]
fn revealed_cards_and_collected_amounts() {
    let hand = Hand::from_actions(&showdown_hand()).unwrap();

    assert_eq!(hand.revealed.len(), 2);
    assert_eq!(hand.revealed["B"], parse_cards("Kh, Ks").unwrap());
    assert_eq!(hand.collected["C"], Chips(169));
    assert_eq!(hand.winners(), vec!["C"]);
    assert_eq!(hand.board.cards().len(), 5);
}

#[test]
fn fold_on_river_leaves_no_showdown() {
    let mut actions = showdown_hand();
    // B вместо колла на ривере сбрасывает.
    actions.truncate(17);
    actions.push(fold("B"));
    actions.push(collect("C", 119));

    let hand = Hand::from_actions(&actions).unwrap();

    assert!(hand.stats.wtsd.is_empty());
    assert_eq!(hand.stats.join_flop, names(&["B", "C"]));
    assert_eq!(hand.stats.final_pot, Chips(119));
}

#[test]
fn checked_down_river_counts_as_showdown() {
    let hand = Hand::from_actions(&[
        start("W1"),
        small("A", 1),
        big("B", 2),
        call("A", 2),
        check("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        check("B"),
        street(Street::Turn, "2s"),
        check("A"),
        check("B"),
        street(Street::River, "9h"),
        check("A"),
        check("B"),
        show("A", "Qh, Qs"),
        collect("A", 4),
    ])
    .unwrap();

    assert_eq!(hand.stats.wtsd, names(&["A", "B"]));
    assert_eq!(hand.stats.join_flop, names(&["A", "B"]));
    assert_eq!(hand.stats.vpip, names(&["A"]));
    assert_eq!(hand.stats.final_pot, Chips(4));
    assert_eq!(hand.leads.preflop, None);
    assert_eq!(hand.stats.sheet("B").unwrap().preflop_lead, 0);
}
