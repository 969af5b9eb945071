use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::engine::sheet::StatSheet;

/// Итоговый показатель профиля игрока (доля или коэффициент).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileStat {
    Vpip,
    Pfr,
    Af,
    Wtsd,
    ThreeBet,
    FourBet,
    FiveBet,
    CBet,
    DoubleBarrel,
    TripleBarrel,
    FoldToPfr,
    FoldToThreeBet,
    FoldToFourBet,
    FoldToC,
    FoldToDouble,
    FoldToTriple,
    CheckRaise,
}

impl ProfileStat {
    pub const ALL: [ProfileStat; 17] = [
        ProfileStat::Vpip,
        ProfileStat::Pfr,
        ProfileStat::Af,
        ProfileStat::Wtsd,
        ProfileStat::ThreeBet,
        ProfileStat::FourBet,
        ProfileStat::FiveBet,
        ProfileStat::CBet,
        ProfileStat::DoubleBarrel,
        ProfileStat::TripleBarrel,
        ProfileStat::FoldToPfr,
        ProfileStat::FoldToThreeBet,
        ProfileStat::FoldToFourBet,
        ProfileStat::FoldToC,
        ProfileStat::FoldToDouble,
        ProfileStat::FoldToTriple,
        ProfileStat::CheckRaise,
    ];

    /// Короткое имя, как в трекерах.
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileStat::Vpip => "VPIP",
            ProfileStat::Pfr => "PFR",
            ProfileStat::Af => "AF",
            ProfileStat::Wtsd => "WTSD",
            ProfileStat::ThreeBet => "3-Bet",
            ProfileStat::FourBet => "4-Bet",
            ProfileStat::FiveBet => "5-Bet",
            ProfileStat::CBet => "C-Bet",
            ProfileStat::DoubleBarrel => "2Ba",
            ProfileStat::TripleBarrel => "3Ba",
            ProfileStat::FoldToPfr => "F-PFR",
            ProfileStat::FoldToThreeBet => "F-3B",
            ProfileStat::FoldToFourBet => "F-4B",
            ProfileStat::FoldToC => "F-CB",
            ProfileStat::FoldToDouble => "F-2Ba",
            ProfileStat::FoldToTriple => "F-3Ba",
            ProfileStat::CheckRaise => "Trap",
        }
    }
}

impl fmt::Display for ProfileStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Накопленный профиль игрока за сессию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: PlayerId,
    pub totals: StatSheet,
}

impl PlayerProfile {
    pub fn new(name: impl Into<PlayerId>) -> Self {
        Self {
            name: name.into(),
            totals: StatSheet::default(),
        }
    }

    /// Добавить счётчики одной раздачи.
    pub fn record(&mut self, sheet: &StatSheet) {
        self.totals.absorb(sheet);
    }

    pub fn hands(&self) -> u32 {
        self.totals.hands
    }

    /// Значение показателя; `None`, если знаменатель нулевой.
    pub fn ratio(&self, stat: ProfileStat) -> Option<f64> {
        let t = &self.totals;
        match stat {
            ProfileStat::Vpip => divide(t.vpip, t.hands),
            ProfileStat::Pfr => divide(t.pfr, t.hands),
            ProfileStat::Af => divide(t.total_attack(), t.total_defend()),
            ProfileStat::Wtsd => divide(t.wtsd, t.join_flop),
            ProfileStat::ThreeBet => divide(t.three_bet, t.call_pfr + t.fold_to_pfr + t.three_bet),
            ProfileStat::FourBet => divide(
                t.four_bet,
                t.call_three_bet + t.fold_to_three_bet + t.four_bet,
            ),
            ProfileStat::FiveBet => divide(
                t.five_bet,
                t.call_four_bet + t.fold_to_four_bet + t.five_bet,
            ),
            ProfileStat::CBet => divide(t.c_bet, t.preflop_lead),
            ProfileStat::DoubleBarrel => divide(t.double_barrel, t.c_bet),
            ProfileStat::TripleBarrel => divide(t.triple_barrel, t.double_barrel),
            ProfileStat::FoldToPfr => divide(t.fold_to_pfr, t.three_bet + t.call_pfr + t.fold_to_pfr),
            ProfileStat::FoldToThreeBet => divide(
                t.fold_to_three_bet,
                t.four_bet + t.call_three_bet + t.fold_to_three_bet,
            ),
            ProfileStat::FoldToFourBet => divide(
                t.fold_to_four_bet,
                t.five_bet + t.call_four_bet + t.fold_to_four_bet,
            ),
            ProfileStat::FoldToC => divide(t.fold_to_c, t.raise_against_c + t.call_c + t.fold_to_c),
            ProfileStat::FoldToDouble => divide(
                t.fold_to_double,
                t.raise_against_double + t.call_double + t.fold_to_double,
            ),
            ProfileStat::FoldToTriple => divide(
                t.fold_to_triple,
                t.raise_against_triple + t.call_triple + t.fold_to_triple,
            ),
            ProfileStat::CheckRaise => divide(t.check_raise, t.check_raise + t.call_without_checkraise),
        }
    }

    /// Все показатели профиля по коротким именам (для JSON-вывода).
    pub fn report(&self) -> BTreeMap<&'static str, Option<f64>> {
        ProfileStat::ALL
            .into_iter()
            .map(|stat| (stat.as_str(), self.ratio(stat)))
            .collect()
    }
}

fn divide(num: u32, den: u32) -> Option<f64> {
    if den == 0 {
        None
    } else {
        Some(f64::from(num) / f64::from(den))
    }
}
