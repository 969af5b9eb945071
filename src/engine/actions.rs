use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, HandId, PlayerId, Street};

/// Какой блайнд поставлен.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BlindType {
    Small,
    Big,
}

/// Тип события лога внутри раздачи.
///
/// Суммы у `Bet`/`Raise`/`Call` – как в логе: итоговая ставка игрока на улице
/// («raises to 6»), а не прирост.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Маркер начала раздачи.
    Start {
        hand_id: HandId,
        #[serde(default)]
        dealer: Option<PlayerId>,
    },
    /// «Player stacks»: стеки всех сданных игроков на начало раздачи.
    StackCount {
        stacks: BTreeMap<PlayerId, Chips>,
    },
    Blind {
        blind: BlindType,
        amount: Chips,
    },
    Ante {
        amount: Chips,
    },
    Bet {
        amount: Chips,
    },
    Raise {
        amount: Chips,
    },
    Call {
        amount: Chips,
    },
    Check,
    Fold,
    /// Открытие общих карт улицы.
    StreetCard {
        street: Street,
        cards: Vec<Card>,
    },
    /// «Undealt cards» – карты, которые пришли бы после конца раздачи.
    RabbitHunt {
        cards: Vec<Card>,
    },
    Show {
        cards: Vec<Card>,
    },
    Collect {
        amount: Chips,
    },
}

impl ActionKind {
    /// Действия, по первому появлению в которых строится порядок игроков.
    pub fn is_committing(&self) -> bool {
        matches!(
            self,
            ActionKind::Blind { .. }
                | ActionKind::Fold
                | ActionKind::Call { .. }
                | ActionKind::Bet { .. }
                | ActionKind::Raise { .. }
        )
    }

    /// Добровольное вложение фишек (создаёт точку решения в леджере).
    pub fn is_wager(&self) -> bool {
        matches!(
            self,
            ActionKind::Call { .. } | ActionKind::Bet { .. } | ActionKind::Raise { .. }
        )
    }
}

/// Одно событие раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    /// Кто действует (у карт борда и маркера старта – никто).
    #[serde(default)]
    pub actor: Option<PlayerId>,
    /// Улица, проставляется сборщиком раздачи.
    #[serde(default)]
    pub street: Street,
}

impl Action {
    /// Событие без игрока (старт, карты борда, rabbit hunt).
    pub fn table(kind: ActionKind) -> Self {
        Self {
            kind,
            actor: None,
            street: Street::Preflop,
        }
    }

    /// Событие конкретного игрока.
    pub fn by(actor: impl Into<PlayerId>, kind: ActionKind) -> Self {
        Self {
            kind,
            actor: Some(actor.into()),
            street: Street::Preflop,
        }
    }
}
