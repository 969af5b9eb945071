//! Итоговые факты раздачи: VPIP, кто увидел флоп, кто дошёл до шоудауна,
//! банк по улицам и счётчики игроков.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Board, Chips, PlayerId, SeatIndex, Street};
use crate::engine::classifier::Classification;
use crate::engine::ledger::Ledger;
use crate::engine::sheet::{RawStat, StatSheet};

/// Статистика одной раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandStats {
    pub vpip: BTreeSet<PlayerId>,
    pub join_flop: BTreeSet<PlayerId>,
    pub wtsd: BTreeSet<PlayerId>,
    /// Банк к концу улицы, нарастающим итогом.
    pub preflop_pot: Chips,
    pub flop_pot: Chips,
    pub turn_pot: Chips,
    pub final_pot: Chips,
    /// Счётчики каждого игрока раздачи.
    pub sheets: BTreeMap<PlayerId, StatSheet>,
}

impl HandStats {
    pub fn sheet(&self, player: &str) -> Option<&StatSheet> {
        self.sheets.get(player)
    }

    /// Игроки, у которых счётчик в этой раздаче ненулевой.
    pub fn players_with(&self, stat: RawStat) -> BTreeSet<PlayerId> {
        self.sheets
            .iter()
            .filter(|(_, sheet)| sheet.get(stat) > 0)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Собрать статистику раздачи по леджеру и результату классификации.
pub fn extract(
    players: &[PlayerId],
    board: &Board,
    ledger: &Ledger,
    classification: &Classification,
) -> HandStats {
    let vpip = vpip_seats(ledger, classification);
    let join_flop = join_flop_seats(board, ledger);
    let wtsd = wtsd_seats(board, ledger);

    let preflop_pot = ledger.street_total(Street::Preflop);
    let flop_pot = preflop_pot + ledger.street_total(Street::Flop);
    let turn_pot = flop_pot + ledger.street_total(Street::Turn);
    let final_pot = turn_pot + ledger.street_total(Street::River);

    let mut sheets = BTreeMap::new();
    for (seat, name) in players.iter().enumerate() {
        let mut sheet = classification.sheets.get(seat).cloned().unwrap_or_default();
        sheet.bump(RawStat::Hands);
        if vpip.contains(&seat) {
            sheet.bump(RawStat::Vpip);
        }
        if join_flop.contains(&seat) {
            sheet.bump(RawStat::JoinFlop);
            // Возможность c-бета есть только у лидера префлопа, увидевшего флоп.
            if classification.leads.preflop == Some(seat) {
                sheet.bump(RawStat::PreflopLead);
            }
        }
        if wtsd.contains(&seat) {
            sheet.bump(RawStat::Wtsd);
        }
        sheets.insert(name.clone(), sheet);
    }

    let names = |seats: BTreeSet<SeatIndex>| -> BTreeSet<PlayerId> {
        seats
            .into_iter()
            .filter_map(|seat| players.get(seat).cloned())
            .collect()
    };

    HandStats {
        vpip: names(vpip),
        join_flop: names(join_flop),
        wtsd: names(wtsd),
        preflop_pot,
        flop_pot,
        turn_pot,
        final_pot,
        sheets,
    }
}

/// Любая метка на префлопе – добровольное вложение.
fn vpip_seats(ledger: &Ledger, classification: &Classification) -> BTreeSet<SeatIndex> {
    ledger
        .points()
        .iter()
        .zip(&classification.labels)
        .filter(|(point, _)| point.street == Street::Preflop)
        .filter_map(|(_, label)| label.as_ref().map(|l| l.actor))
        .collect()
}

/// Места, сфолдившие на указанных улицах.
fn folded_on(ledger: &Ledger, streets: &[Street]) -> BTreeSet<SeatIndex> {
    ledger
        .points()
        .iter()
        .flat_map(|p| p.folded.iter())
        .filter(|f| streets.contains(&f.street))
        .map(|f| f.seat)
        .collect()
}

/// Дошла ли раздача до улицы: карты сданы или есть точки этой улицы.
fn reached(board: &Board, ledger: &Ledger, street: Street) -> bool {
    board.is_dealt(street) || ledger.last_of(street).is_some()
}

/// Кто уравнял итоговую ставку префлопа и не сфолдил.
fn join_flop_seats(board: &Board, ledger: &Ledger) -> BTreeSet<SeatIndex> {
    if !reached(board, ledger, Street::Flop) {
        return BTreeSet::new();
    }
    let Some(last) = ledger.last_of(Street::Preflop).and_then(|i| ledger.point(i)) else {
        return BTreeSet::new();
    };
    let folded = folded_on(ledger, &[Street::Preflop]);
    let high = last.high();

    (0..ledger.seats())
        .filter(|seat| !folded.contains(seat) && last.contribution(*seat) == high)
        .collect()
}

/// Кто дошёл до конца ривера, уравняв последнюю ставку. Меньше двух – шоудауна не было.
fn wtsd_seats(board: &Board, ledger: &Ledger) -> BTreeSet<SeatIndex> {
    if !reached(board, ledger, Street::River) {
        return BTreeSet::new();
    }
    let folded = folded_on(ledger, &Street::BETTING);
    // Ривер, прочеканный до конца, точек не имеет: у всех по нулю.
    let last = ledger.last_of(Street::River).and_then(|i| ledger.point(i));
    let contribution = |seat: SeatIndex| last.map(|p| p.contribution(seat)).unwrap_or(Chips::ZERO);
    let high = last.map(|p| p.high()).unwrap_or(Chips::ZERO);

    let seats: BTreeSet<SeatIndex> = (0..ledger.seats())
        .filter(|seat| !folded.contains(seat) && contribution(*seat) == high)
        .collect();
    if seats.len() < 2 {
        return BTreeSet::new();
    }
    seats
}
