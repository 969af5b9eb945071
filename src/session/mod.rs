//! Сессия стола: нарезка лога на раздачи, восстановление каждой раздачи и
//! накопление профилей игроков.
//!
//! Раздачи независимы, поэтому собираются параллельно (`rayon`). Битая
//! раздача не ломает остальные: она логируется и пропускается (или, в
//! строгом режиме, прерывает сессию).

pub mod config;
pub mod profile;
pub mod segment;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{HandId, PlayerId};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::errors::ReplayError;
use crate::engine::hand::Hand;
use crate::infra::{resolve_actions, AliasResolver};

pub use config::{ConfigError, SessionConfig};
pub use profile::{PlayerProfile, ProfileStat};
pub use segment::{segment, AdminEvent, LogEvent, Segments};

/// Раздача, которую не удалось восстановить.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandFailure {
    pub hand_id: Option<HandId>,
    pub error: String,
    /// Сырые действия раздачи для разбора.
    pub actions: Vec<Action>,
}

/// Восстановленная сессия.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub hands: Vec<Hand>,
    pub failures: Vec<HandFailure>,
    pub admin: Vec<AdminEvent>,
    pub profiles: BTreeMap<PlayerId, PlayerProfile>,
}

impl Session {
    /// Восстановить сессию из потока событий.
    pub fn replay<I, R>(events: I, resolver: &R, config: &SessionConfig) -> Result<Self, ReplayError>
    where
        I: IntoIterator<Item = LogEvent>,
        R: AliasResolver + ?Sized,
    {
        let Segments {
            hands: mut raw_hands,
            admin,
            ..
        } = segment(events);

        for actions in raw_hands.iter_mut() {
            resolve_actions(actions, resolver);
        }
        let admin: Vec<AdminEvent> = admin.into_iter().map(|e| e.resolve(resolver)).collect();

        let results: Vec<Result<Hand, ReplayError>> = raw_hands
            .par_iter()
            .map(|actions| Hand::from_actions(actions))
            .collect();

        let mut hands = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (actions, result) in raw_hands.into_iter().zip(results) {
            match result {
                Ok(hand) => hands.push(hand),
                Err(error) => {
                    let hand_id = hand_id_of(&actions);
                    if config.strict {
                        log::error!("раздача {hand_id:?}: {error}");
                        return Err(error);
                    }
                    log::warn!("раздача {hand_id:?} пропущена: {error}; действия: {actions:?}");
                    failures.push(HandFailure {
                        hand_id,
                        error: error.to_string(),
                        actions,
                    });
                }
            }
        }

        let mut session = Session {
            hands,
            failures,
            admin,
            profiles: BTreeMap::new(),
        };
        session.rebuild_profiles();

        log::info!(
            "сессия: раздач {}, пропущено {}, игроков {}",
            session.hands.len(),
            session.failures.len(),
            session.profiles.len()
        );
        Ok(session)
    }

    /// Пересчитать профили с нуля: состав – из посадок за стол и из раздач.
    pub fn rebuild_profiles(&mut self) {
        let mut profiles: BTreeMap<PlayerId, PlayerProfile> = BTreeMap::new();

        for player in self.admin.iter().filter_map(AdminEvent::player) {
            profiles
                .entry(player.clone())
                .or_insert_with(|| PlayerProfile::new(player.clone()));
        }
        for hand in &self.hands {
            for (name, sheet) in &hand.stats.sheets {
                profiles
                    .entry(name.clone())
                    .or_insert_with(|| PlayerProfile::new(name.clone()))
                    .record(sheet);
            }
        }

        self.profiles = profiles;
    }

    pub fn hand(&self, id: &str) -> Option<&Hand> {
        self.hands.iter().find(|h| h.id == id)
    }

    pub fn profile(&self, player: &str) -> Option<&PlayerProfile> {
        self.profiles.get(player)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

fn hand_id_of(actions: &[Action]) -> Option<HandId> {
    actions.first().and_then(|a| match &a.kind {
        ActionKind::Start { hand_id, .. } => Some(hand_id.clone()),
        _ => None,
    })
}
