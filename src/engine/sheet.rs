//! Счётчики статистики игрока.
//!
//! `StatSheet` – явная структура со всеми сырыми счётчиками, `RawStat` –
//! их идентификаторы. Доступ по идентификатору идёт через `match`, без
//! строковых ключей.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Street;

/// Идентификатор сырого (скалярного) счётчика.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RawStat {
    Hands,
    Vpip,
    Pfr,
    ThreeBet,
    FourBet,
    FiveBet,
    PreflopLead,
    CBet,
    DoubleBarrel,
    TripleBarrel,
    CallPfr,
    CallThreeBet,
    CallFourBet,
    CallC,
    CallDouble,
    CallTriple,
    CallCheckRaise,
    FoldToPfr,
    FoldToThreeBet,
    FoldToFourBet,
    FoldToC,
    FoldToDouble,
    FoldToTriple,
    FoldToCheckRaise,
    RaiseAgainstC,
    RaiseAgainstDouble,
    RaiseAgainstTriple,
    CheckRaise,
    CallWithoutCheckraise,
    JoinFlop,
    Wtsd,
}

impl RawStat {
    pub const ALL: [RawStat; 31] = [
        RawStat::Hands,
        RawStat::Vpip,
        RawStat::Pfr,
        RawStat::ThreeBet,
        RawStat::FourBet,
        RawStat::FiveBet,
        RawStat::PreflopLead,
        RawStat::CBet,
        RawStat::DoubleBarrel,
        RawStat::TripleBarrel,
        RawStat::CallPfr,
        RawStat::CallThreeBet,
        RawStat::CallFourBet,
        RawStat::CallC,
        RawStat::CallDouble,
        RawStat::CallTriple,
        RawStat::CallCheckRaise,
        RawStat::FoldToPfr,
        RawStat::FoldToThreeBet,
        RawStat::FoldToFourBet,
        RawStat::FoldToC,
        RawStat::FoldToDouble,
        RawStat::FoldToTriple,
        RawStat::FoldToCheckRaise,
        RawStat::RaiseAgainstC,
        RawStat::RaiseAgainstDouble,
        RawStat::RaiseAgainstTriple,
        RawStat::CheckRaise,
        RawStat::CallWithoutCheckraise,
        RawStat::JoinFlop,
        RawStat::Wtsd,
    ];

    /// Рейз против продолжения ставки на улице (c-bet / 2-barrel / 3-barrel).
    pub fn raise_against(street: Street) -> Option<RawStat> {
        match street {
            Street::Flop => Some(RawStat::RaiseAgainstC),
            Street::Turn => Some(RawStat::RaiseAgainstDouble),
            Street::River => Some(RawStat::RaiseAgainstTriple),
            Street::Preflop | Street::End => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RawStat::Hands => "hands",
            RawStat::Vpip => "vpip",
            RawStat::Pfr => "pfr",
            RawStat::ThreeBet => "three_bet",
            RawStat::FourBet => "four_bet",
            RawStat::FiveBet => "five_bet",
            RawStat::PreflopLead => "preflop_lead",
            RawStat::CBet => "c_bet",
            RawStat::DoubleBarrel => "double_barrel",
            RawStat::TripleBarrel => "triple_barrel",
            RawStat::CallPfr => "call_pfr",
            RawStat::CallThreeBet => "call_three_bet",
            RawStat::CallFourBet => "call_four_bet",
            RawStat::CallC => "call_c",
            RawStat::CallDouble => "call_double",
            RawStat::CallTriple => "call_triple",
            RawStat::CallCheckRaise => "call_check_raise",
            RawStat::FoldToPfr => "fold_to_pfr",
            RawStat::FoldToThreeBet => "fold_to_three_bet",
            RawStat::FoldToFourBet => "fold_to_four_bet",
            RawStat::FoldToC => "fold_to_c",
            RawStat::FoldToDouble => "fold_to_double",
            RawStat::FoldToTriple => "fold_to_triple",
            RawStat::FoldToCheckRaise => "fold_to_check_raise",
            RawStat::RaiseAgainstC => "raise_against_c",
            RawStat::RaiseAgainstDouble => "raise_against_double",
            RawStat::RaiseAgainstTriple => "raise_against_triple",
            RawStat::CheckRaise => "check_raise",
            RawStat::CallWithoutCheckraise => "call_without_checkraise",
            RawStat::JoinFlop => "join_flop",
            RawStat::Wtsd => "wtsd",
        }
    }
}

impl fmt::Display for RawStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Сырые счётчики одного игрока: за одну раздачу или накопленные за сессию.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatSheet {
    pub hands: u32,
    pub vpip: u32,
    pub pfr: u32,
    pub three_bet: u32,
    pub four_bet: u32,
    pub five_bet: u32,
    pub preflop_lead: u32,
    pub c_bet: u32,
    pub double_barrel: u32,
    pub triple_barrel: u32,
    pub call_pfr: u32,
    pub call_three_bet: u32,
    pub call_four_bet: u32,
    pub call_c: u32,
    pub call_double: u32,
    pub call_triple: u32,
    pub call_check_raise: u32,
    pub fold_to_pfr: u32,
    pub fold_to_three_bet: u32,
    pub fold_to_four_bet: u32,
    pub fold_to_c: u32,
    pub fold_to_double: u32,
    pub fold_to_triple: u32,
    pub fold_to_check_raise: u32,
    pub raise_against_c: u32,
    pub raise_against_double: u32,
    pub raise_against_triple: u32,
    pub check_raise: u32,
    pub call_without_checkraise: u32,
    pub join_flop: u32,
    pub wtsd: u32,
    /// Агрессивные действия по улицам (preflop, flop, turn, river).
    pub attack: [u32; 4],
    /// Коллы по улицам.
    pub defend: [u32; 4],
}

impl StatSheet {
    pub fn get(&self, stat: RawStat) -> u32 {
        match stat {
            RawStat::Hands => self.hands,
            RawStat::Vpip => self.vpip,
            RawStat::Pfr => self.pfr,
            RawStat::ThreeBet => self.three_bet,
            RawStat::FourBet => self.four_bet,
            RawStat::FiveBet => self.five_bet,
            RawStat::PreflopLead => self.preflop_lead,
            RawStat::CBet => self.c_bet,
            RawStat::DoubleBarrel => self.double_barrel,
            RawStat::TripleBarrel => self.triple_barrel,
            RawStat::CallPfr => self.call_pfr,
            RawStat::CallThreeBet => self.call_three_bet,
            RawStat::CallFourBet => self.call_four_bet,
            RawStat::CallC => self.call_c,
            RawStat::CallDouble => self.call_double,
            RawStat::CallTriple => self.call_triple,
            RawStat::CallCheckRaise => self.call_check_raise,
            RawStat::FoldToPfr => self.fold_to_pfr,
            RawStat::FoldToThreeBet => self.fold_to_three_bet,
            RawStat::FoldToFourBet => self.fold_to_four_bet,
            RawStat::FoldToC => self.fold_to_c,
            RawStat::FoldToDouble => self.fold_to_double,
            RawStat::FoldToTriple => self.fold_to_triple,
            RawStat::FoldToCheckRaise => self.fold_to_check_raise,
            RawStat::RaiseAgainstC => self.raise_against_c,
            RawStat::RaiseAgainstDouble => self.raise_against_double,
            RawStat::RaiseAgainstTriple => self.raise_against_triple,
            RawStat::CheckRaise => self.check_raise,
            RawStat::CallWithoutCheckraise => self.call_without_checkraise,
            RawStat::JoinFlop => self.join_flop,
            RawStat::Wtsd => self.wtsd,
        }
    }

    fn counter_mut(&mut self, stat: RawStat) -> &mut u32 {
        match stat {
            RawStat::Hands => &mut self.hands,
            RawStat::Vpip => &mut self.vpip,
            RawStat::Pfr => &mut self.pfr,
            RawStat::ThreeBet => &mut self.three_bet,
            RawStat::FourBet => &mut self.four_bet,
            RawStat::FiveBet => &mut self.five_bet,
            RawStat::PreflopLead => &mut self.preflop_lead,
            RawStat::CBet => &mut self.c_bet,
            RawStat::DoubleBarrel => &mut self.double_barrel,
            RawStat::TripleBarrel => &mut self.triple_barrel,
            RawStat::CallPfr => &mut self.call_pfr,
            RawStat::CallThreeBet => &mut self.call_three_bet,
            RawStat::CallFourBet => &mut self.call_four_bet,
            RawStat::CallC => &mut self.call_c,
            RawStat::CallDouble => &mut self.call_double,
            RawStat::CallTriple => &mut self.call_triple,
            RawStat::CallCheckRaise => &mut self.call_check_raise,
            RawStat::FoldToPfr => &mut self.fold_to_pfr,
            RawStat::FoldToThreeBet => &mut self.fold_to_three_bet,
            RawStat::FoldToFourBet => &mut self.fold_to_four_bet,
            RawStat::FoldToC => &mut self.fold_to_c,
            RawStat::FoldToDouble => &mut self.fold_to_double,
            RawStat::FoldToTriple => &mut self.fold_to_triple,
            RawStat::FoldToCheckRaise => &mut self.fold_to_check_raise,
            RawStat::RaiseAgainstC => &mut self.raise_against_c,
            RawStat::RaiseAgainstDouble => &mut self.raise_against_double,
            RawStat::RaiseAgainstTriple => &mut self.raise_against_triple,
            RawStat::CheckRaise => &mut self.check_raise,
            RawStat::CallWithoutCheckraise => &mut self.call_without_checkraise,
            RawStat::JoinFlop => &mut self.join_flop,
            RawStat::Wtsd => &mut self.wtsd,
        }
    }

    pub fn bump(&mut self, stat: RawStat) {
        *self.counter_mut(stat) += 1;
    }

    pub fn record_attack(&mut self, street: Street) {
        if let Some(i) = street.index() {
            self.attack[i] += 1;
        }
    }

    pub fn record_defend(&mut self, street: Street) {
        if let Some(i) = street.index() {
            self.defend[i] += 1;
        }
    }

    pub fn total_attack(&self) -> u32 {
        self.attack.iter().sum()
    }

    pub fn total_defend(&self) -> u32 {
        self.defend.iter().sum()
    }

    /// Прибавить чужие счётчики (накопление по сессии).
    pub fn absorb(&mut self, other: &StatSheet) {
        for stat in RawStat::ALL {
            *self.counter_mut(stat) += other.get(stat);
        }
        for i in 0..4 {
            self.attack[i] += other.attack[i];
            self.defend[i] += other.defend[i];
        }
    }
}
