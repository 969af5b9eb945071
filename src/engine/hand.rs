use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Board, Card, Chips, HandId, PlayerId, SeatIndex, Street};
use crate::engine::actions::{Action, ActionKind};
use crate::engine::assembler::assemble;
use crate::engine::classifier::{classify, ActionTag, AggressorMarkers, StreetLeads};
use crate::engine::errors::ReplayError;
use crate::engine::ledger::{build_ledger, Ledger};
use crate::engine::stats::{extract, HandStats};

/// Восстановленная раздача. Строится один раз из полного списка действий
/// и дальше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub id: HandId,
    pub dealer: Option<PlayerId>,
    /// Порядок рассадки (первое появление во вкладывающем действии).
    pub players: Vec<PlayerId>,
    pub ante: Chips,
    pub sb: Chips,
    pub bb: Chips,
    pub board: Board,
    /// Стеки на начало раздачи (пусто, если лог их не содержал).
    pub starting_stacks: BTreeMap<PlayerId, Chips>,
    /// Леджер с метками классификатора.
    pub ledger: Ledger,
    pub markers: AggressorMarkers<PlayerId>,
    pub leads: StreetLeads<PlayerId>,
    /// Открытые на шоудауне карты.
    pub revealed: BTreeMap<PlayerId, Vec<Card>>,
    /// Кто сколько забрал из банка.
    pub collected: BTreeMap<PlayerId, Chips>,
    pub stats: HandStats,
}

impl Hand {
    /// Сборка → леджер → классификация → статистика.
    pub fn from_actions(actions: &[Action]) -> Result<Self, ReplayError> {
        let assembled = assemble(actions)?;
        let ledger = build_ledger(&assembled)?;
        let classification = classify(&ledger)?;
        let stats = extract(&assembled.players, &assembled.board, &ledger, &classification);

        let players = assembled.players;
        let name = |seat: SeatIndex| players[seat].clone();
        let markers = classification.markers.map(name);
        let leads = classification.leads.map(name);
        let ledger = ledger.with_labels(&classification.labels);

        let mut revealed = BTreeMap::new();
        let mut collected: BTreeMap<PlayerId, Chips> = BTreeMap::new();
        for action in &assembled.actions {
            let Some(actor) = &action.actor else {
                continue;
            };
            match &action.kind {
                ActionKind::Show { cards } => {
                    revealed.insert(actor.clone(), cards.clone());
                }
                ActionKind::Collect { amount } => {
                    *collected.entry(actor.clone()).or_default() += *amount;
                }
                _ => {}
            }
        }

        log::debug!(
            "раздача {} восстановлена: PFR={:?}, банк {}",
            assembled.id,
            markers.pfr,
            stats.final_pot
        );

        Ok(Self {
            id: assembled.id,
            dealer: assembled.dealer,
            players,
            ante: assembled.ante,
            sb: assembled.sb,
            bb: assembled.bb,
            board: assembled.board,
            starting_stacks: assembled.starting_stacks,
            ledger,
            markers,
            leads,
            revealed,
            collected,
            stats,
        })
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&str> {
        self.players.get(seat).map(String::as_str)
    }

    pub fn seat_of(&self, player: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p == player)
    }

    /// Все метки раздачи по порядку: (игрок, метка).
    pub fn labels(&self) -> Vec<(&str, ActionTag)> {
        self.labels_where(|_| true)
    }

    /// Метки одной улицы.
    pub fn labels_on(&self, street: Street) -> Vec<(&str, ActionTag)> {
        self.labels_where(|s| s == street)
    }

    fn labels_where(&self, keep: impl Fn(Street) -> bool) -> Vec<(&str, ActionTag)> {
        self.ledger
            .points()
            .iter()
            .filter(|p| keep(p.street))
            .filter_map(|p| p.label)
            .filter_map(|l| self.player(l.actor).map(|name| (name, l.tag)))
            .collect()
    }

    /// Забравшие банк.
    pub fn winners(&self) -> Vec<&str> {
        self.collected.keys().map(String::as_str).collect()
    }
}
