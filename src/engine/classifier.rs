//! Классификатор действий.
//!
//! Проходит точки леджера по порядку и даёт каждой (кроме точки 0 и
//! терминальной) ровно одну метку: PFR / 3-Bet / … на префлопе,
//! C-Bet / Donk / Bet / Raise / Check-Raise на постфлопе, Call иначе.
//! Чистая функция от леджера: существующие метки игнорируются.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, Street};
use crate::engine::errors::ReplayError;
use crate::engine::ledger::{DecisionPoint, FoldRecord, Ledger};
use crate::engine::sheet::{RawStat, StatSheet};

/// Семантическая метка действия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionTag {
    Pfr,
    ThreeBet,
    FourBet,
    FiveBet,
    FiveBetPlus,
    CBet,
    DoubleBarrel,
    TripleBarrel,
    Donk,
    Bet,
    Raise,
    CheckRaise,
    Call,
}

impl ActionTag {
    /// Уровни эскалации префлопа по порядку.
    const ESCALATION: [ActionTag; 4] = [
        ActionTag::Pfr,
        ActionTag::ThreeBet,
        ActionTag::FourBet,
        ActionTag::FiveBet,
    ];

    pub fn is_aggressive(self) -> bool {
        self != ActionTag::Call
    }

    /// Продолжение ставки на улице: c-bet на флопе, 2-barrel на тёрне, 3-barrel на ривере.
    pub fn continuation(street: Street) -> Option<ActionTag> {
        match street {
            Street::Flop => Some(ActionTag::CBet),
            Street::Turn => Some(ActionTag::DoubleBarrel),
            Street::River => Some(ActionTag::TripleBarrel),
            Street::Preflop | Street::End => None,
        }
    }

    /// Счётчик, который растёт у автора действия.
    fn stat(self) -> Option<RawStat> {
        match self {
            ActionTag::Pfr => Some(RawStat::Pfr),
            ActionTag::ThreeBet => Some(RawStat::ThreeBet),
            ActionTag::FourBet => Some(RawStat::FourBet),
            ActionTag::FiveBet => Some(RawStat::FiveBet),
            ActionTag::CBet => Some(RawStat::CBet),
            ActionTag::DoubleBarrel => Some(RawStat::DoubleBarrel),
            ActionTag::TripleBarrel => Some(RawStat::TripleBarrel),
            ActionTag::CheckRaise => Some(RawStat::CheckRaise),
            ActionTag::FiveBetPlus
            | ActionTag::Donk
            | ActionTag::Bet
            | ActionTag::Raise
            | ActionTag::Call => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionTag::Pfr => "PFR",
            ActionTag::ThreeBet => "3-Bet",
            ActionTag::FourBet => "4-Bet",
            ActionTag::FiveBet => "5-Bet",
            ActionTag::FiveBetPlus => "5-Bet+",
            ActionTag::CBet => "C-Bet",
            ActionTag::DoubleBarrel => "2-Barrel",
            ActionTag::TripleBarrel => "3-Barrel",
            ActionTag::Donk => "Donk",
            ActionTag::Bet => "Bet",
            ActionTag::Raise => "Raise",
            ActionTag::CheckRaise => "Check-Raise",
            ActionTag::Call => "Call",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Метка точки решения: кто и что сделал.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Label {
    pub actor: SeatIndex,
    pub tag: ActionTag,
}

/// Кто совершил ключевые агрессивные действия раздачи. Каждое поле
/// выставляется один раз и больше не перезаписывается.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggressorMarkers<P = SeatIndex> {
    pub pfr: Option<P>,
    pub three_bet: Option<P>,
    pub four_bet: Option<P>,
    pub five_bet: Option<P>,
    pub c_bet: Option<P>,
    pub double_barrel: Option<P>,
    pub triple_barrel: Option<P>,
    pub raise_against_c: Option<P>,
    pub raise_against_double: Option<P>,
    pub raise_against_triple: Option<P>,
}

impl<P> AggressorMarkers<P> {
    /// Маркер, соответствующий метке (для меток без маркера – `None`).
    pub fn slot(&self, tag: ActionTag) -> Option<&Option<P>> {
        match tag {
            ActionTag::Pfr => Some(&self.pfr),
            ActionTag::ThreeBet => Some(&self.three_bet),
            ActionTag::FourBet => Some(&self.four_bet),
            ActionTag::FiveBet => Some(&self.five_bet),
            ActionTag::CBet => Some(&self.c_bet),
            ActionTag::DoubleBarrel => Some(&self.double_barrel),
            ActionTag::TripleBarrel => Some(&self.triple_barrel),
            _ => None,
        }
    }

    fn slot_mut(&mut self, tag: ActionTag) -> Option<&mut Option<P>> {
        match tag {
            ActionTag::Pfr => Some(&mut self.pfr),
            ActionTag::ThreeBet => Some(&mut self.three_bet),
            ActionTag::FourBet => Some(&mut self.four_bet),
            ActionTag::FiveBet => Some(&mut self.five_bet),
            ActionTag::CBet => Some(&mut self.c_bet),
            ActionTag::DoubleBarrel => Some(&mut self.double_barrel),
            ActionTag::TripleBarrel => Some(&mut self.triple_barrel),
            _ => None,
        }
    }

    fn raise_against_mut(&mut self, street: Street) -> Option<&mut Option<P>> {
        match street {
            Street::Flop => Some(&mut self.raise_against_c),
            Street::Turn => Some(&mut self.raise_against_double),
            Street::River => Some(&mut self.raise_against_triple),
            Street::Preflop | Street::End => None,
        }
    }

    pub fn map<Q>(self, mut f: impl FnMut(P) -> Q) -> AggressorMarkers<Q> {
        AggressorMarkers {
            pfr: self.pfr.map(&mut f),
            three_bet: self.three_bet.map(&mut f),
            four_bet: self.four_bet.map(&mut f),
            five_bet: self.five_bet.map(&mut f),
            c_bet: self.c_bet.map(&mut f),
            double_barrel: self.double_barrel.map(&mut f),
            triple_barrel: self.triple_barrel.map(&mut f),
            raise_against_c: self.raise_against_c.map(&mut f),
            raise_against_double: self.raise_against_double.map(&mut f),
            raise_against_triple: self.raise_against_triple.map(&mut f),
        }
    }
}

/// Лидер (последний агрессор) каждой улицы на момент её окончания.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreetLeads<P = SeatIndex> {
    pub preflop: Option<P>,
    pub flop: Option<P>,
    pub turn: Option<P>,
    pub river: Option<P>,
}

impl<P> StreetLeads<P> {
    pub fn get(&self, street: Street) -> Option<&P> {
        match street {
            Street::Preflop => self.preflop.as_ref(),
            Street::Flop => self.flop.as_ref(),
            Street::Turn => self.turn.as_ref(),
            Street::River => self.river.as_ref(),
            Street::End => None,
        }
    }

    fn set(&mut self, street: Street, lead: Option<P>) {
        match street {
            Street::Preflop => self.preflop = lead,
            Street::Flop => self.flop = lead,
            Street::Turn => self.turn = lead,
            Street::River => self.river = lead,
            Street::End => {}
        }
    }

    pub fn map<Q>(self, mut f: impl FnMut(P) -> Q) -> StreetLeads<Q> {
        StreetLeads {
            preflop: self.preflop.map(&mut f),
            flop: self.flop.map(&mut f),
            turn: self.turn.map(&mut f),
            river: self.river.map(&mut f),
        }
    }
}

/// Результат классификации.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// По одной метке на точку леджера (у точки 0 и терминальной – `None`).
    pub labels: Vec<Option<Label>>,
    pub markers: AggressorMarkers,
    pub leads: StreetLeads,
    /// Счётчики по местам.
    pub sheets: Vec<StatSheet>,
}

/// Против чего коллируют или фолдят на улице.
///
/// Свежий чек-рейз перекрывает всё остальное. Иначе префлоп смотрит на
/// старший выставленный уровень эскалации, постфлоп на маркер продолжения
/// своей улицы (c-bet / 2-barrel / 3-barrel).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Facing {
    Pfr,
    ThreeBet,
    FourBet,
    FiveBet,
    CBet,
    DoubleBarrel,
    TripleBarrel,
    CheckRaise,
}

impl Facing {
    fn of(tag: ActionTag) -> Option<Facing> {
        match tag {
            ActionTag::Pfr => Some(Facing::Pfr),
            ActionTag::ThreeBet => Some(Facing::ThreeBet),
            ActionTag::FourBet => Some(Facing::FourBet),
            ActionTag::FiveBet | ActionTag::FiveBetPlus => Some(Facing::FiveBet),
            ActionTag::CBet => Some(Facing::CBet),
            ActionTag::DoubleBarrel => Some(Facing::DoubleBarrel),
            ActionTag::TripleBarrel => Some(Facing::TripleBarrel),
            ActionTag::CheckRaise => Some(Facing::CheckRaise),
            ActionTag::Donk | ActionTag::Bet | ActionTag::Raise | ActionTag::Call => None,
        }
    }

    fn call_stat(self) -> Option<RawStat> {
        match self {
            Facing::Pfr => Some(RawStat::CallPfr),
            Facing::ThreeBet => Some(RawStat::CallThreeBet),
            Facing::FourBet => Some(RawStat::CallFourBet),
            Facing::CBet => Some(RawStat::CallC),
            Facing::DoubleBarrel => Some(RawStat::CallDouble),
            Facing::TripleBarrel => Some(RawStat::CallTriple),
            Facing::CheckRaise => Some(RawStat::CallCheckRaise),
            Facing::FiveBet => None,
        }
    }

    fn fold_stat(self) -> Option<RawStat> {
        match self {
            Facing::Pfr => Some(RawStat::FoldToPfr),
            Facing::ThreeBet => Some(RawStat::FoldToThreeBet),
            Facing::FourBet => Some(RawStat::FoldToFourBet),
            Facing::CBet => Some(RawStat::FoldToC),
            Facing::DoubleBarrel => Some(RawStat::FoldToDouble),
            Facing::TripleBarrel => Some(RawStat::FoldToTriple),
            Facing::CheckRaise => Some(RawStat::FoldToCheckRaise),
            Facing::FiveBet => None,
        }
    }
}

/// Состояние текущей улицы.
struct StreetState {
    street: Street,
    /// У кого сейчас самая большая ставка (после агрессии).
    lead: Option<SeatIndex>,
    /// Сколько нужно вложить, чтобы остаться в игре.
    bet_to_reach: Chips,
    /// Автор чек-рейза, если это последняя агрессия улицы.
    check_raiser: Option<SeatIndex>,
}

impl StreetState {
    fn new(street: Street, bet_to_reach: Chips) -> Self {
        Self {
            street,
            lead: None,
            bet_to_reach,
            check_raiser: None,
        }
    }
}

/// Классифицировать все точки леджера.
pub fn classify(ledger: &Ledger) -> Result<Classification, ReplayError> {
    Classifier::new(ledger).run()
}

struct Classifier<'a> {
    ledger: &'a Ledger,
    current: StreetState,
    markers: AggressorMarkers,
    leads: StreetLeads,
    labels: Vec<Option<Label>>,
    sheets: Vec<StatSheet>,
}

impl<'a> Classifier<'a> {
    fn new(ledger: &'a Ledger) -> Self {
        Self {
            ledger,
            current: StreetState::new(Street::Preflop, ledger.opening_bet()),
            markers: AggressorMarkers::default(),
            leads: StreetLeads::default(),
            labels: vec![None; ledger.len()],
            sheets: vec![StatSheet::default(); ledger.seats()],
        }
    }

    fn run(mut self) -> Result<Classification, ReplayError> {
        let ledger = self.ledger;

        for (index, point) in ledger.points().iter().enumerate() {
            if point.is_terminal() {
                break;
            }
            if index > 0 {
                if point.street != self.current.street {
                    self.enter_street(point.street);
                }
                let label = self.label_point(index, point)?;
                log::debug!(
                    "точка {index} ({}): место {} – {}",
                    point.street,
                    label.actor,
                    label.tag
                );
                self.labels[index] = Some(label);
            }
            for fold in &point.folded {
                self.record_fold(*fold);
            }
        }
        self.leads.set(self.current.street, self.current.lead);

        Ok(Classification {
            labels: self.labels,
            markers: self.markers,
            leads: self.leads,
            sheets: self.sheets,
        })
    }

    fn enter_street(&mut self, street: Street) {
        self.leads.set(self.current.street, self.current.lead);
        self.current = StreetState::new(street, Chips::ZERO);
    }

    fn label_point(&mut self, index: usize, point: &DecisionPoint) -> Result<Label, ReplayError> {
        let baseline = self.ledger.baseline(index).unwrap_or_default();
        let before_of = |seat: SeatIndex| baseline.get(seat).copied().unwrap_or(Chips::ZERO);

        let width = self.ledger.seats().max(point.contributions.len());
        let changed: Vec<SeatIndex> = (0..width)
            .filter(|&seat| point.contribution(seat) != before_of(seat))
            .collect();
        let &[actor] = changed.as_slice() else {
            return Err(ReplayError::InvariantViolation {
                point: index,
                changed: changed.len(),
            });
        };

        let before = before_of(actor);
        let after = point.contribution(actor);
        let street = self.current.street;

        let tag = if after > self.current.bet_to_reach {
            let tag = if street == Street::Preflop {
                self.escalate()
            } else if self.current.lead.is_none() {
                self.open_street(actor)
            } else {
                self.raise_street(actor, before)
            };
            self.mark(actor, tag);
            self.current.lead = Some(actor);
            self.current.bet_to_reach = after;
            tag
        } else {
            self.call(actor, before);
            ActionTag::Call
        };

        if tag.is_aggressive() {
            self.sheet(actor, |s| s.record_attack(street));
        } else {
            self.sheet(actor, |s| s.record_defend(street));
        }

        Ok(Label { actor, tag })
    }

    /// Префлоп: первый свободный уровень PFR → 3-Bet → 4-Bet → 5-Bet, дальше 5-Bet+.
    fn escalate(&self) -> ActionTag {
        ActionTag::ESCALATION
            .into_iter()
            .find(|tag| matches!(self.markers.slot(*tag), Some(None)))
            .unwrap_or(ActionTag::FiveBetPlus)
    }

    /// Агрессор прошлой улицы, от которого считаются продолжение и донк.
    fn previous_aggressor(&self) -> Option<SeatIndex> {
        match self.current.street {
            Street::Flop => self.leads.preflop,
            Street::Turn => self.markers.c_bet,
            Street::River => self.markers.double_barrel,
            Street::Preflop | Street::End => None,
        }
    }

    /// Первая агрессия на постфлоп-улице.
    fn open_street(&self, actor: SeatIndex) -> ActionTag {
        let previous = self.previous_aggressor();
        match ActionTag::continuation(self.current.street) {
            Some(continuation) if previous == Some(actor) => continuation,
            _ => match previous {
                Some(aggressor) if actor < aggressor => ActionTag::Donk,
                _ => ActionTag::Bet,
            },
        }
    }

    /// Повторная агрессия на постфлоп-улице.
    fn raise_street(&mut self, actor: SeatIndex, before: Chips) -> ActionTag {
        let street = self.current.street;
        let checked_first = self.current.lead.is_some_and(|lead| actor < lead) && before.is_zero();

        let continued = ActionTag::continuation(street)
            .and_then(|tag| self.markers.slot(tag))
            .is_some_and(Option::is_some);
        if continued {
            if let Some(slot) = self.markers.raise_against_mut(street) {
                if slot.is_none() {
                    *slot = Some(actor);
                    if let Some(stat) = RawStat::raise_against(street) {
                        self.sheet(actor, |s| s.bump(stat));
                    }
                }
            }
        }

        if checked_first {
            ActionTag::CheckRaise
        } else {
            ActionTag::Raise
        }
    }

    /// Выставить маркер (если он ещё пуст) и счётчик автора.
    fn mark(&mut self, actor: SeatIndex, tag: ActionTag) {
        if let Some(slot) = self.markers.slot_mut(tag) {
            if slot.is_none() {
                *slot = Some(actor);
            }
        }
        if let Some(stat) = tag.stat() {
            self.sheet(actor, |s| s.bump(stat));
        }
        self.current.check_raiser = (tag == ActionTag::CheckRaise).then_some(actor);
    }

    /// Текущая агрессия улицы и её автор.
    fn facing(&self) -> Option<(Facing, SeatIndex)> {
        if let Some(raiser) = self.current.check_raiser {
            return Some((Facing::CheckRaise, raiser));
        }
        let holder = |tag: ActionTag| {
            self.markers
                .slot(tag)
                .copied()
                .flatten()
                .map(|seat| (tag, seat))
        };
        let (tag, seat) = match self.current.street {
            Street::Preflop => ActionTag::ESCALATION.into_iter().rev().find_map(holder)?,
            street => holder(ActionTag::continuation(street)?)?,
        };
        Some((Facing::of(tag)?, seat))
    }

    /// Счётчик ответа места на текущую агрессию. Свою же агрессию не считаем.
    fn response(&self, seat: SeatIndex, stat: fn(Facing) -> Option<RawStat>) -> Option<RawStat> {
        let (facing, aggressor) = self.facing()?;
        if aggressor == seat {
            return None;
        }
        stat(facing)
    }

    fn call(&mut self, actor: SeatIndex, before: Chips) {
        if let Some(stat) = self.response(actor, Facing::call_stat) {
            self.sheet(actor, |s| s.bump(stat));
        }
        // Мог сделать чек-рейз, но только заколлировал.
        let could_check_raise = self.current.street.is_postflop()
            && before.is_zero()
            && self.current.lead.is_some_and(|lead| actor < lead);
        if could_check_raise {
            self.sheet(actor, |s| s.bump(RawStat::CallWithoutCheckraise));
        }
    }

    fn record_fold(&mut self, fold: FoldRecord) {
        // Фолд на улице, где ещё не было ставок, ни к чему не относим.
        if fold.street != self.current.street {
            return;
        }
        if let Some(stat) = self.response(fold.seat, Facing::fold_stat) {
            self.sheet(fold.seat, |s| s.bump(stat));
        }
    }

    fn sheet(&mut self, seat: SeatIndex, f: impl FnOnce(&mut StatSheet)) {
        if let Some(sheet) = self.sheets.get_mut(seat) {
            f(sheet);
        }
    }
}
