// tests/classifier_tests.rs
//
// Классификатор действий:
//  A) PFR / Call / фолд против PFR;
//  B) фолд на чек-рейз против c-bet не считается фолдом на c-bet;
//  C) колл вместо чек-рейза на тёрне;
//  плюс эскалация 3-Bet … 5-Bet+, донк против обычного бета, цепочка
//  c-bet -> 2-barrel -> 3-barrel, идемпотентность и нарушение инварианта;
//  ответы на 3-Bet / 4-Bet / чек-рейз / баррели, рейз против продолжения,
//  донк и чек-рейз на поздних улицах, анте.

use std::collections::BTreeSet;

use poker_tracker::domain::{parse_cards, Chips, Street};
use poker_tracker::engine::{
    classify, Action, ActionKind, ActionTag, BlindType, DecisionPoint, Hand, Ledger, RawStat,
    ReplayError,
};

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

fn ante(p: &str, amount: u64) -> Action {
    Action::by(p, ActionKind::Ante { amount: Chips(amount) })
}

fn show(p: &str, cards: &str) -> Action {
    Action::by(p, ActionKind::Show { cards: parse_cards(cards).unwrap() })
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

fn street(street: Street, cards: &str) -> Action {
    Action::table(ActionKind::StreetCard {
        street,
        cards: parse_cards(cards).unwrap(),
    })
}

fn chips(values: &[u64]) -> Vec<Chips> {
    values.iter().copied().map(Chips).collect()
}

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn stat(hand: &Hand, player: &str, stat: RawStat) -> u32 {
    hand.stats.sheet(player).map(|s| s.get(stat)).unwrap_or(0)
}

// -----------------------------
// ТЕСТЫ
// -----------------------------

#[test]
fn scenario_pfr_call_and_fold_to_pfr() {
    let hand = Hand::from_actions(&[
        start("A1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        fold("B"),
    ])
    .unwrap();

    assert_eq!(hand.markers.pfr.as_deref(), Some("C"));
    assert_eq!(
        hand.labels(),
        vec![("C", ActionTag::Pfr), ("A", ActionTag::Call)]
    );
    assert_eq!(hand.stats.players_with(RawStat::FoldToPfr), names(&["B"]));
    assert_eq!(hand.stats.vpip, names(&["A", "C"]));
    assert_eq!(stat(&hand, "A", RawStat::CallPfr), 1);
    assert_eq!(stat(&hand, "C", RawStat::Pfr), 1);
    assert_eq!(hand.leads.preflop.as_deref(), Some("C"));
}

#[test]
fn fold_to_check_raise_is_not_fold_to_cbet() {
    let hand = Hand::from_actions(&[
        start("B1"),
        small("Y", 1),
        big("Z", 2),
        raise("X", 6),
        call("Y", 6),
        fold("Z"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("Y"),
        bet("X", 4),
        raise("Y", 12),
        fold("X"),
    ])
    .unwrap();

    assert_eq!(
        hand.labels_on(Street::Flop),
        vec![("X", ActionTag::CBet), ("Y", ActionTag::CheckRaise)]
    );
    assert_eq!(hand.markers.c_bet.as_deref(), Some("X"));
    assert_eq!(hand.markers.raise_against_c.as_deref(), Some("Y"));

    assert!(hand.stats.players_with(RawStat::FoldToC).is_empty());
    assert_eq!(
        hand.stats.players_with(RawStat::FoldToCheckRaise),
        names(&["X"])
    );
    assert_eq!(stat(&hand, "Y", RawStat::CheckRaise), 1);
    assert_eq!(stat(&hand, "Y", RawStat::RaiseAgainstC), 1);
    assert_eq!(stat(&hand, "Z", RawStat::FoldToPfr), 1);
}

#[test]
fn turn_call_instead_of_check_raise() {
    let hand = Hand::from_actions(&[
        start("C1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        call("B", 6),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        check("B"),
        check("C"),
        street(Street::Turn, "2s"),
        check("A"),
        check("B"),
        bet("C", 8),
        call("A", 8),
        fold("B"),
    ])
    .unwrap();

    // На флопе у C был шанс на c-bet, но ставки не было: на тёрне обычный бет.
    assert_eq!(hand.labels_on(Street::Turn), vec![("C", ActionTag::Bet), ("A", ActionTag::Call)]);
    assert_eq!(stat(&hand, "A", RawStat::CallWithoutCheckraise), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallWithoutCheckraise), 0);
    // Против обычного бета фолд ни к чему не относится.
    assert_eq!(stat(&hand, "B", RawStat::FoldToDouble), 0);
}

#[test]
fn preflop_escalation_up_to_five_bet_plus() {
    let hand = Hand::from_actions(&[
        start("E1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        raise("A", 18),
        raise("B", 54),
        raise("C", 150),
        raise("A", 400),
        fold("B"),
        call("C", 400),
    ])
    .unwrap();

    assert_eq!(
        hand.labels(),
        vec![
            ("C", ActionTag::Pfr),
            ("A", ActionTag::ThreeBet),
            ("B", ActionTag::FourBet),
            ("C", ActionTag::FiveBet),
            ("A", ActionTag::FiveBetPlus),
            ("C", ActionTag::Call),
        ]
    );
    assert_eq!(hand.markers.pfr.as_deref(), Some("C"));
    assert_eq!(hand.markers.three_bet.as_deref(), Some("A"));
    assert_eq!(hand.markers.four_bet.as_deref(), Some("B"));
    assert_eq!(hand.markers.five_bet.as_deref(), Some("C"));
    assert_eq!(hand.leads.preflop.as_deref(), Some("A"));

    // Фолд и колл против 5-Bet+ не учитываются.
    assert_eq!(stat(&hand, "B", RawStat::FoldToFourBet), 0);
    assert_eq!(stat(&hand, "C", RawStat::CallFourBet), 0);
    assert_eq!(stat(&hand, "A", RawStat::ThreeBet), 1);
    assert_eq!(stat(&hand, "B", RawStat::FourBet), 1);
    assert_eq!(stat(&hand, "C", RawStat::FiveBet), 1);
    assert_eq!(stat(&hand, "A", RawStat::Pfr), 0);
}

#[test]
fn donk_then_raise_by_preflop_aggressor() {
    let hand = Hand::from_actions(&[
        start("D1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        call("B", 6),
        street(Street::Flop, "Ah, Kd, 7c"),
        bet("A", 10),
        fold("B"),
        raise("C", 30),
        call("A", 30),
    ])
    .unwrap();

    assert_eq!(
        hand.labels_on(Street::Flop),
        vec![
            ("A", ActionTag::Donk),
            ("C", ActionTag::Raise),
            ("A", ActionTag::Call),
        ]
    );
    assert_eq!(hand.markers.c_bet, None);
    assert_eq!(hand.markers.raise_against_c, None);
    // A уже вложился на флопе – это не колл вместо чек-рейза.
    assert_eq!(stat(&hand, "A", RawStat::CallWithoutCheckraise), 0);
    assert_eq!(hand.leads.flop.as_deref(), Some("C"));
}

#[test]
fn bet_without_preflop_aggressor_is_plain_bet() {
    let hand = Hand::from_actions(&[
        start("D2"),
        small("A", 1),
        big("B", 2),
        call("C", 2),
        call("A", 2),
        check("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        bet("B", 4),
        fold("C"),
        fold("A"),
    ])
    .unwrap();

    assert_eq!(hand.markers.pfr, None);
    assert_eq!(hand.leads.preflop, None);
    assert_eq!(
        hand.labels(),
        vec![
            ("C", ActionTag::Call),
            ("A", ActionTag::Call),
            ("B", ActionTag::Bet),
        ]
    );
}

#[test]
fn continuation_chain_across_streets() {
    let hand = Hand::from_actions(&[
        start("K1"),
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
        fold("B"),
    ])
    .unwrap();

    assert_eq!(hand.markers.c_bet.as_deref(), Some("C"));
    assert_eq!(hand.markers.double_barrel.as_deref(), Some("C"));
    assert_eq!(hand.markers.triple_barrel.as_deref(), Some("C"));

    assert_eq!(stat(&hand, "B", RawStat::CallPfr), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallC), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallDouble), 1);
    assert_eq!(stat(&hand, "B", RawStat::FoldToTriple), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallWithoutCheckraise), 2);
    assert_eq!(stat(&hand, "A", RawStat::FoldToPfr), 1);

    let c = hand.stats.sheet("C").unwrap();
    assert_eq!(c.attack, [1, 1, 1, 1]);
    assert_eq!(c.preflop_lead, 1);
    let b = hand.stats.sheet("B").unwrap();
    assert_eq!(b.defend, [1, 1, 1, 0]);
}

#[test]
fn classification_is_idempotent() {
    let hand = Hand::from_actions(&[
        start("I1"),
        small("Y", 1),
        big("Z", 2),
        raise("X", 6),
        call("Y", 6),
        fold("Z"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("Y"),
        bet("X", 4),
        raise("Y", 12),
        fold("X"),
    ])
    .unwrap();

    let stored: Vec<_> = hand.ledger.points().iter().map(|p| p.label).collect();
    let first = classify(&hand.ledger).unwrap();
    let second = classify(&hand.ledger).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.labels, stored);
    // У точки 0 и терминальной метки нет.
    assert_eq!(stored.first(), Some(&None));
    assert_eq!(stored.last(), Some(&None));
}

#[test]
fn two_changes_in_one_point_violate_invariant() {
    let ledger = Ledger::new(
        2,
        Chips(2),
        vec![
            DecisionPoint::new(Street::Preflop, chips(&[1, 2])),
            DecisionPoint::new(Street::Preflop, chips(&[6, 6])),
            DecisionPoint::new(Street::End, Vec::new()),
        ],
    );

    assert_eq!(
        classify(&ledger).unwrap_err(),
        ReplayError::InvariantViolation { point: 1, changed: 2 }
    );
}

#[test]
fn unchanged_point_violates_invariant() {
    let ledger = Ledger::new(
        2,
        Chips(2),
        vec![
            DecisionPoint::new(Street::Preflop, chips(&[1, 2])),
            DecisionPoint::new(Street::Preflop, chips(&[2, 2])),
            DecisionPoint::new(Street::Preflop, chips(&[2, 2])),
            DecisionPoint::new(Street::End, Vec::new()),
        ],
    );

    assert_eq!(
        classify(&ledger).unwrap_err(),
        ReplayError::InvariantViolation { point: 2, changed: 0 }
    );
}

#[test]
fn tag_names_match_tracker_notation() {
    assert_eq!(ActionTag::ThreeBet.to_string(), "3-Bet");
    assert_eq!(ActionTag::FiveBetPlus.to_string(), "5-Bet+");
    assert_eq!(ActionTag::CheckRaise.to_string(), "Check-Raise");
    assert_eq!(ActionTag::continuation(Street::Turn), Some(ActionTag::DoubleBarrel));
    assert_eq!(ActionTag::continuation(Street::Preflop), None);
    assert!(!ActionTag::Call.is_aggressive());
}

#[test]
fn call_after_raise_over_cbet_still_counts_as_call_c() {
    let hand = Hand::from_actions(&[
        start("F1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("D", 6),
        call("A", 6),
        fold("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        bet("C", 5),
        raise("D", 15),
        call("A", 15),
        fold("C"),
    ])
    .unwrap();

    assert_eq!(
        hand.labels_on(Street::Flop),
        vec![
            ("C", ActionTag::CBet),
            ("D", ActionTag::Raise),
            ("A", ActionTag::Call),
        ]
    );
    assert_eq!(hand.markers.raise_against_c.as_deref(), Some("D"));
    assert_eq!(stat(&hand, "A", RawStat::CallC), 1);
    assert_eq!(stat(&hand, "A", RawStat::CallWithoutCheckraise), 1);
    // Автор c-bet не фолдит «на c-bet».
    assert_eq!(stat(&hand, "C", RawStat::FoldToC), 0);
    assert_eq!(stat(&hand, "D", RawStat::RaiseAgainstC), 1);
}

#[test]
fn folds_and_call_against_three_bet() {
    let hand = Hand::from_actions(&[
        start("G1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        raise("D", 18),
        fold("A"),
        fold("B"),
        call("C", 18),
    ])
    .unwrap();

    assert_eq!(hand.markers.three_bet.as_deref(), Some("D"));
    assert_eq!(
        hand.stats.players_with(RawStat::FoldToThreeBet),
        names(&["A", "B"])
    );
    assert!(hand.stats.players_with(RawStat::FoldToPfr).is_empty());
    assert_eq!(stat(&hand, "C", RawStat::CallThreeBet), 1);
    assert_eq!(stat(&hand, "D", RawStat::ThreeBet), 1);
}

#[test]
fn folds_and_call_against_four_bet() {
    let hand = Hand::from_actions(&[
        start("G2"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        raise("D", 18),
        raise("A", 54),
        fold("B"),
        fold("C"),
        call("D", 54),
    ])
    .unwrap();

    assert_eq!(hand.markers.four_bet.as_deref(), Some("A"));
    assert_eq!(
        hand.stats.players_with(RawStat::FoldToFourBet),
        names(&["B", "C"])
    );
    assert_eq!(stat(&hand, "D", RawStat::CallFourBet), 1);
    assert_eq!(stat(&hand, "A", RawStat::FourBet), 1);
    assert_eq!(stat(&hand, "C", RawStat::FoldToThreeBet), 0);
}

#[test]
fn call_against_flop_check_raise() {
    let hand = Hand::from_actions(&[
        start("H1"),
        small("Y", 1),
        big("Z", 2),
        raise("X", 6),
        call("Y", 6),
        fold("Z"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("Y"),
        bet("X", 4),
        raise("Y", 12),
        call("X", 12),
    ])
    .unwrap();

    assert_eq!(stat(&hand, "X", RawStat::CallCheckRaise), 1);
    assert_eq!(stat(&hand, "X", RawStat::CallC), 0);
    assert_eq!(stat(&hand, "Y", RawStat::CheckRaise), 1);
}

#[test]
fn turn_check_raise_against_double_barrel() {
    let hand = Hand::from_actions(&[
        start("H2"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        fold("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        bet("C", 8),
        call("A", 8),
        street(Street::Turn, "2s"),
        check("A"),
        bet("C", 20),
        raise("A", 60),
        fold("C"),
    ])
    .unwrap();

    assert_eq!(
        hand.labels_on(Street::Turn),
        vec![("C", ActionTag::DoubleBarrel), ("A", ActionTag::CheckRaise)]
    );
    assert_eq!(hand.markers.raise_against_double.as_deref(), Some("A"));
    assert_eq!(stat(&hand, "A", RawStat::RaiseAgainstDouble), 1);
    assert_eq!(stat(&hand, "A", RawStat::CheckRaise), 1);
    assert_eq!(stat(&hand, "C", RawStat::FoldToCheckRaise), 1);
    assert_eq!(stat(&hand, "C", RawStat::FoldToDouble), 0);
}

#[test]
fn fold_and_call_against_double_barrel() {
    let hand = Hand::from_actions(&[
        start("H3"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        call("B", 6),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        check("B"),
        bet("C", 10),
        call("A", 10),
        call("B", 10),
        street(Street::Turn, "2s"),
        check("A"),
        check("B"),
        bet("C", 25),
        fold("A"),
        call("B", 25),
    ])
    .unwrap();

    assert_eq!(hand.markers.double_barrel.as_deref(), Some("C"));
    assert_eq!(stat(&hand, "A", RawStat::FoldToDouble), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallDouble), 1);
    assert_eq!(stat(&hand, "A", RawStat::CallC), 1);
    assert_eq!(stat(&hand, "B", RawStat::CallC), 1);
}

#[test]
fn river_raise_against_triple_barrel() {
    let hand = Hand::from_actions(&[
        start("H4"),
        small("A", 1),
        big("B", 2),
        call("C", 2),
        raise("A", 8),
        fold("B"),
        call("C", 8),
        street(Street::Flop, "Ah, Kd, 7c"),
        bet("A", 10),
        call("C", 10),
        street(Street::Turn, "2s"),
        bet("A", 20),
        call("C", 20),
        street(Street::River, "9h"),
        bet("A", 40),
        raise("C", 120),
        call("A", 120),
        show("C", "Kh, Ks"),
        show("A", "As, Ac"),
    ])
    .unwrap();

    assert_eq!(
        hand.labels_on(Street::River),
        vec![
            ("A", ActionTag::TripleBarrel),
            ("C", ActionTag::Raise),
            ("A", ActionTag::Call),
        ]
    );
    assert_eq!(hand.markers.raise_against_triple.as_deref(), Some("C"));
    assert_eq!(stat(&hand, "C", RawStat::RaiseAgainstTriple), 1);
    // Колл автора 3-barrel на рейз – не колл против 3-barrel.
    assert_eq!(stat(&hand, "A", RawStat::CallTriple), 0);
    assert_eq!(stat(&hand, "C", RawStat::CallPfr), 1);
    assert_eq!(stat(&hand, "B", RawStat::FoldToPfr), 1);
    assert_eq!(hand.stats.wtsd, names(&["A", "C"]));
}

#[test]
fn river_donk_against_double_barrel() {
    let hand = Hand::from_actions(&[
        start("J1"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        fold("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        bet("C", 8),
        call("A", 8),
        street(Street::Turn, "2s"),
        check("A"),
        bet("C", 20),
        call("A", 20),
        street(Street::River, "9h"),
        bet("A", 40),
        fold("C"),
    ])
    .unwrap();

    assert_eq!(hand.labels_on(Street::River), vec![("A", ActionTag::Donk)]);
    assert_eq!(hand.markers.triple_barrel, None);
    assert_eq!(stat(&hand, "C", RawStat::FoldToTriple), 0);

    let a = hand.stats.sheet("A").unwrap();
    assert_eq!(a.attack, [0, 0, 0, 1]);
    assert_eq!(a.defend, [1, 1, 1, 0]);
}

#[test]
fn turn_donk_against_cbet() {
    let hand = Hand::from_actions(&[
        start("J2"),
        small("A", 1),
        big("B", 2),
        raise("C", 6),
        call("A", 6),
        fold("B"),
        street(Street::Flop, "Ah, Kd, 7c"),
        check("A"),
        bet("C", 8),
        call("A", 8),
        street(Street::Turn, "2s"),
        bet("A", 20),
        fold("C"),
    ])
    .unwrap();

    assert_eq!(hand.labels_on(Street::Turn), vec![("A", ActionTag::Donk)]);
    assert_eq!(hand.markers.double_barrel, None);
    assert_eq!(hand.markers.raise_against_double, None);
    assert_eq!(stat(&hand, "C", RawStat::FoldToDouble), 0);
    assert_eq!(hand.leads.turn.as_deref(), Some("A"));
}

#[test]
fn preflop_with_antes() {
    let hand = Hand::from_actions(&[
        start("N1"),
        ante("A", 1),
        ante("B", 1),
        ante("C", 1),
        small("A", 1),
        big("B", 2),
        call("C", 2),
        raise("A", 6),
        fold("B"),
        call("C", 6),
    ])
    .unwrap();

    assert_eq!(
        hand.labels(),
        vec![
            ("C", ActionTag::Call),
            ("A", ActionTag::Pfr),
            ("C", ActionTag::Call),
        ]
    );
    assert_eq!(hand.markers.pfr.as_deref(), Some("A"));
    assert_eq!(hand.stats.vpip, names(&["A", "C"]));
    assert_eq!(stat(&hand, "B", RawStat::FoldToPfr), 1);
    assert_eq!(stat(&hand, "C", RawStat::CallPfr), 1);
    assert_eq!(hand.stats.preflop_pot, Chips(17));
}
