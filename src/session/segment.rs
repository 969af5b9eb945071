use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::actions::{Action, ActionKind};
use crate::infra::AliasResolver;

/// Служебное событие стола, в раздачу не попадает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdminEvent {
    /// Игрок сел за стол.
    Joined { player: PlayerId, stack: Chips },
    /// Докупка / изменение стека.
    StackAdded { player: PlayerId, amount: Chips },
    TableClosed,
}

impl AdminEvent {
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            AdminEvent::Joined { player, .. } | AdminEvent::StackAdded { player, .. } => Some(player),
            AdminEvent::TableClosed => None,
        }
    }

    pub(crate) fn resolve<R: AliasResolver + ?Sized>(mut self, resolver: &R) -> Self {
        match &mut self {
            AdminEvent::Joined { player, .. } | AdminEvent::StackAdded { player, .. } => {
                *player = resolver.resolve_alias(player);
            }
            AdminEvent::TableClosed => {}
        }
        self
    }
}

/// Событие лога сессии в том виде, в каком его отдаёт парсер.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    Action(Action),
    Admin(AdminEvent),
}

/// Поток сессии, нарезанный на раздачи.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segments {
    /// Действия каждой раздачи, первым идёт `Start`.
    pub hands: Vec<Vec<Action>>,
    pub admin: Vec<AdminEvent>,
    /// Сколько действий пришло до первого `Start` (отброшены).
    pub orphaned: usize,
}

/// Нарезать поток по маркерам `Start`; служебные события – в отдельный канал.
pub fn segment<I>(events: I) -> Segments
where
    I: IntoIterator<Item = LogEvent>,
{
    let mut segments = Segments::default();
    let mut current: Option<Vec<Action>> = None;

    for event in events {
        match event {
            LogEvent::Admin(admin) => segments.admin.push(admin),
            LogEvent::Action(action) => {
                if matches!(action.kind, ActionKind::Start { .. }) {
                    if let Some(done) = current.replace(vec![action]) {
                        segments.hands.push(done);
                    }
                } else if let Some(hand) = current.as_mut() {
                    hand.push(action);
                } else {
                    segments.orphaned += 1;
                }
            }
        }
    }
    if let Some(done) = current {
        segments.hands.push(done);
    }

    if segments.orphaned > 0 {
        log::debug!("отброшено действий до первой раздачи: {}", segments.orphaned);
    }
    segments
}
