use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Улица раздачи.
///
/// `End` – служебная «улица» терминальной точки леджера, сюда не попадает
/// ни одно действие из лога.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    End,
}

impl Street {
    /// Четыре настоящие улицы по порядку.
    pub const BETTING: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Следующая улица (после ривера – `End`).
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::End => Street::End,
        }
    }

    /// Индекс улицы для массивов вида `[u32; 4]`. У `End` индекса нет.
    pub fn index(self) -> Option<usize> {
        match self {
            Street::Preflop => Some(0),
            Street::Flop => Some(1),
            Street::Turn => Some(2),
            Street::River => Some(3),
            Street::End => None,
        }
    }

    pub fn is_postflop(self) -> bool {
        matches!(self, Street::Flop | Street::Turn | Street::River)
    }

    /// Сколько общих карт открывается на этой улице.
    pub fn board_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::End => 0,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::End => "end",
        };
        f.write_str(name)
    }
}

/// Карты одной улицы: основная раскладка и «кроличья» (rabbit hunt),
/// показанная уже после конца раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Runout {
    pub primary: Vec<Card>,
    pub rabbit: Vec<Card>,
}

impl Runout {
    pub fn is_dealt(&self) -> bool {
        !self.primary.is_empty()
    }
}

/// Общие карты раздачи по улицам.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Board {
    pub flop: Runout,
    pub turn: Runout,
    pub river: Runout,
}

impl Board {
    pub fn runout(&self, street: Street) -> Option<&Runout> {
        match street {
            Street::Flop => Some(&self.flop),
            Street::Turn => Some(&self.turn),
            Street::River => Some(&self.river),
            Street::Preflop | Street::End => None,
        }
    }

    pub fn runout_mut(&mut self, street: Street) -> Option<&mut Runout> {
        match street {
            Street::Flop => Some(&mut self.flop),
            Street::Turn => Some(&mut self.turn),
            Street::River => Some(&mut self.river),
            Street::Preflop | Street::End => None,
        }
    }

    /// Была ли улица реально сдана (без учёта rabbit hunt).
    pub fn is_dealt(&self, street: Street) -> bool {
        self.runout(street).map(Runout::is_dealt).unwrap_or(false)
    }

    /// Основные карты борда по порядку.
    pub fn cards(&self) -> Vec<Card> {
        [&self.flop, &self.turn, &self.river]
            .into_iter()
            .flat_map(|r| r.primary.iter().copied())
            .collect()
    }

    /// Борд пуст – раздача закончилась на префлопе.
    pub fn is_empty(&self) -> bool {
        !self.flop.is_dealt() && !self.turn.is_dealt() && !self.river.is_dealt()
    }
}
