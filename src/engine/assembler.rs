//! Сборка раздачи из плоского списка действий.
//!
//! На выходе – порядок игроков (по первому появлению в «вкладывающем»
//! действии, а не по раздаче карт), размеры блайндов/анте, борд и действия
//! с проставленной улицей.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Board, Card, Chips, HandId, PlayerId, SeatIndex, Street};
use crate::engine::actions::{Action, ActionKind, BlindType};
use crate::engine::errors::ReplayError;

/// Проверенная раздача, готовая к построению леджера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssembledHand {
    pub id: HandId,
    pub dealer: Option<PlayerId>,
    /// Порядок рассадки: индекс в этом списке и есть `SeatIndex`.
    pub players: Vec<PlayerId>,
    pub ante: Chips,
    pub sb: Chips,
    pub bb: Chips,
    pub board: Board,
    /// Стеки на начало раздачи; пусто, если в логе их не было.
    pub starting_stacks: BTreeMap<PlayerId, Chips>,
    /// Все действия раздачи (начиная со `Start`) с улицей.
    pub actions: Vec<Action>,
}

impl AssembledHand {
    pub fn seat_of(&self, player: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p == player)
    }

    /// Место игрока или `UnknownPlayer`.
    pub fn require_seat(&self, actor: Option<&PlayerId>) -> Result<SeatIndex, ReplayError> {
        let actor = actor.ok_or_else(|| ReplayError::malformed("действие без игрока"))?;
        self.seat_of(actor)
            .ok_or_else(|| ReplayError::UnknownPlayer(actor.clone()))
    }
}

/// Собрать одну раздачу. Первое действие обязано быть `Start`.
pub fn assemble(actions: &[Action]) -> Result<AssembledHand, ReplayError> {
    let (first, rest) = actions
        .split_first()
        .ok_or_else(|| ReplayError::malformed("пустой список действий"))?;

    let (id, dealer) = match &first.kind {
        ActionKind::Start { hand_id, dealer } => (hand_id.clone(), dealer.clone()),
        other => {
            return Err(ReplayError::malformed(format!(
                "раздача должна начинаться с Start, а не с {other:?}"
            )))
        }
    };

    let mut players: Vec<PlayerId> = Vec::new();
    let mut ante_payers: Vec<PlayerId> = Vec::new();
    let mut ante: Option<Chips> = None;
    let mut sb: Option<Chips> = None;
    let mut bb: Option<Chips> = None;
    let mut board = Board::default();
    let mut starting_stacks: Option<BTreeMap<PlayerId, Chips>> = None;
    let mut street = Street::Preflop;
    // Началась ли добровольная торговля: после неё блайнды/анте запрещены.
    let mut voluntary = false;

    let mut annotated = Vec::with_capacity(actions.len());
    annotated.push(Action {
        street,
        ..first.clone()
    });

    for action in rest {
        match &action.kind {
            ActionKind::Start { hand_id, .. } => {
                return Err(ReplayError::malformed(format!(
                    "маркер Start {hand_id} внутри раздачи {id}"
                )));
            }
            ActionKind::StreetCard { street: next, cards } => {
                if *next != street.next() || *next == Street::End {
                    return Err(ReplayError::malformed(format!(
                        "улица {next} пришла после {street}"
                    )));
                }
                if cards.len() != next.board_cards() {
                    return Err(ReplayError::malformed(format!(
                        "на улице {next} ожидалось карт: {}, пришло {}",
                        next.board_cards(),
                        cards.len()
                    )));
                }
                if let Some(runout) = board.runout_mut(*next) {
                    runout.primary = cards.clone();
                }
                street = *next;
            }
            ActionKind::RabbitHunt { cards } => deal_rabbit(&mut board, cards)?,
            ActionKind::StackCount { stacks } => {
                if starting_stacks.is_some() {
                    return Err(ReplayError::malformed(format!("стеки в раздаче {id} пришли дважды")));
                }
                starting_stacks = Some(stacks.clone());
            }
            ActionKind::Blind { blind, amount } => {
                if voluntary || street != Street::Preflop {
                    return Err(ReplayError::malformed("блайнд поставлен после начала торговли"));
                }
                let slot = match blind {
                    BlindType::Small => &mut sb,
                    BlindType::Big => &mut bb,
                };
                if slot.is_some() {
                    return Err(ReplayError::malformed(format!("блайнд {blind:?} поставлен дважды")));
                }
                *slot = Some(*amount);
            }
            ActionKind::Ante { amount } => {
                if voluntary || street != Street::Preflop {
                    return Err(ReplayError::malformed("анте поставлено после начала торговли"));
                }
                let payer = action
                    .actor
                    .as_ref()
                    .ok_or_else(|| ReplayError::malformed("анте без игрока"))?;
                ante.get_or_insert(*amount);
                ante_payers.push(payer.clone());
            }
            ActionKind::Bet { .. } | ActionKind::Raise { .. } | ActionKind::Call { .. } | ActionKind::Fold => {
                voluntary = true;
            }
            ActionKind::Check | ActionKind::Show { .. } | ActionKind::Collect { .. } => {}
        }

        if action.kind.is_committing() {
            let actor = action.actor.as_ref().ok_or_else(|| {
                ReplayError::malformed(format!("действие {:?} без игрока", action.kind))
            })?;
            if !players.contains(actor) {
                players.push(actor.clone());
            }
        } else if let Some(actor) = &action.actor {
            // Анте платят до блайндов, их проверяем в конце.
            let deferred = matches!(action.kind, ActionKind::Ante { .. });
            if !deferred && !players.contains(actor) {
                return Err(ReplayError::UnknownPlayer(actor.clone()));
            }
        }

        annotated.push(Action {
            street,
            ..action.clone()
        });
    }

    if let Some(stranger) = ante_payers.into_iter().find(|p| !players.contains(p)) {
        return Err(ReplayError::UnknownPlayer(stranger));
    }

    // Все, кто действовал, должны быть в списке стеков.
    let starting_stacks = starting_stacks.unwrap_or_default();
    if !starting_stacks.is_empty() {
        if let Some(stranger) = players.iter().find(|p| !starting_stacks.contains_key(*p)) {
            return Err(ReplayError::UnknownPlayer(stranger.clone()));
        }
    }

    let bb = bb.ok_or_else(|| ReplayError::malformed(format!("в раздаче {id} нет большого блайнда")))?;

    log::debug!("раздача {id}: игроков {}, действий {}", players.len(), annotated.len());

    Ok(AssembledHand {
        id,
        dealer,
        players,
        ante: ante.unwrap_or(Chips::ZERO),
        sb: sb.unwrap_or(Chips::ZERO),
        bb,
        board,
        starting_stacks,
        actions: annotated,
    })
}

/// Разложить карты rabbit hunt по несданным улицам: 3 / 1 / 1.
fn deal_rabbit(board: &mut Board, cards: &[Card]) -> Result<(), ReplayError> {
    let mut rest = cards;

    for street in [Street::Flop, Street::Turn, Street::River] {
        let Some(runout) = board.runout_mut(street) else {
            continue;
        };
        if runout.is_dealt() || !runout.rabbit.is_empty() || rest.is_empty() {
            continue;
        }
        let need = street.board_cards();
        if rest.len() < need {
            return Err(ReplayError::malformed(format!(
                "rabbit hunt: на улицу {street} не хватает карт"
            )));
        }
        let (head, tail) = rest.split_at(need);
        runout.rabbit = head.to_vec();
        rest = tail;
    }

    if !rest.is_empty() {
        return Err(ReplayError::malformed("rabbit hunt: лишние карты после ривера"));
    }
    Ok(())
}
