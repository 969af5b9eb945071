//! Леджер ставок: упорядоченная арена точек решения.
//!
//! Каждая точка – снимок суммарных вложений игроков на *текущей* улице после
//! очередного Bet/Raise/Call. Фолды новых точек не создают, они цепляются к
//! последней точке. Точка 0 – синтетическая (после блайндов и анте),
//! последняя – синтетическая `End`.

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, Street};
use crate::engine::actions::ActionKind;
use crate::engine::assembler::AssembledHand;
use crate::engine::classifier::Label;
use crate::engine::errors::ReplayError;

/// Явный фолд: кто и на какой улице.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoldRecord {
    pub seat: SeatIndex,
    pub street: Street,
}

/// Точка решения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionPoint {
    pub street: Street,
    /// Вложение каждого места на текущей улице (индекс = `SeatIndex`).
    /// У терминальной точки вектор пуст.
    pub contributions: Vec<Chips>,
    /// Кто сфолдил между этой и следующей точкой.
    pub folded: Vec<FoldRecord>,
    /// Проставляется классификатором.
    pub label: Option<Label>,
}

impl DecisionPoint {
    pub fn new(street: Street, contributions: Vec<Chips>) -> Self {
        Self {
            street,
            contributions,
            folded: Vec::new(),
            label: None,
        }
    }

    pub fn contribution(&self, seat: SeatIndex) -> Chips {
        self.contributions.get(seat).copied().unwrap_or(Chips::ZERO)
    }

    /// Самая большая ставка на улице в этой точке.
    pub fn high(&self) -> Chips {
        self.contributions.iter().copied().max().unwrap_or(Chips::ZERO)
    }

    pub fn total(&self) -> Chips {
        self.contributions.iter().sum()
    }

    pub fn is_terminal(&self) -> bool {
        self.street == Street::End
    }
}

/// Леджер раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    seats: usize,
    /// Ставка, до которой надо дотянуться на префлопе: `bb + ante`.
    opening_bet: Chips,
    points: Vec<DecisionPoint>,
}

impl Ledger {
    /// Леджер из готовых точек. Структуру не проверяет – это делает классификатор.
    pub fn new(seats: usize, opening_bet: Chips, points: Vec<DecisionPoint>) -> Self {
        Self {
            seats,
            opening_bet,
            points,
        }
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    pub fn opening_bet(&self) -> Chips {
        self.opening_bet
    }

    pub fn points(&self) -> &[DecisionPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&DecisionPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Индекс последней точки улицы.
    pub fn last_of(&self, street: Street) -> Option<usize> {
        self.points.iter().rposition(|p| p.street == street)
    }

    /// Итог улицы: сумма вложений в её последней точке (0, если точек не было).
    pub fn street_total(&self, street: Street) -> Chips {
        self.last_of(street)
            .map(|i| self.points[i].total())
            .unwrap_or(Chips::ZERO)
    }

    /// Вложения перед точкой `index` на её улице: предыдущая точка той же
    /// улицы или нули, если точка открывает улицу.
    pub fn baseline(&self, index: usize) -> Option<Vec<Chips>> {
        let point = self.points.get(index)?;
        let prev = self.points.get(index.checked_sub(1)?)?;
        if prev.street == point.street {
            Some(prev.contributions.clone())
        } else {
            Some(vec![Chips::ZERO; self.seats])
        }
    }

    /// Копия леджера с метками классификатора.
    pub fn with_labels(mut self, labels: &[Option<Label>]) -> Self {
        for (point, label) in self.points.iter_mut().zip(labels) {
            point.label = *label;
        }
        self
    }
}

/// Построить леджер по собранной раздаче.
pub fn build_ledger(hand: &AssembledHand) -> Result<Ledger, ReplayError> {
    let seats = hand.players.len();

    // Точка 0: блайнд + анте у блайндов, только анте у остальных.
    let mut blinds = vec![Chips::ZERO; seats];
    let mut ante_paid = vec![false; seats];
    for action in &hand.actions {
        match &action.kind {
            ActionKind::Blind { amount, .. } => {
                let seat = hand.require_seat(action.actor.as_ref())?;
                blinds[seat] += *amount;
            }
            ActionKind::Ante { .. } => {
                let seat = hand.require_seat(action.actor.as_ref())?;
                ante_paid[seat] = true;
            }
            _ => {}
        }
    }
    let opening: Vec<Chips> = blinds
        .iter()
        .zip(&ante_paid)
        .map(|(&blind, &paid)| {
            if !blind.is_zero() {
                blind + hand.ante
            } else if paid {
                hand.ante
            } else {
                Chips::ZERO
            }
        })
        .collect();

    let mut points = vec![DecisionPoint::new(Street::Preflop, opening)];
    let mut folded = vec![false; seats];

    for action in &hand.actions {
        match &action.kind {
            ActionKind::Fold => {
                let seat = hand.require_seat(action.actor.as_ref())?;
                if folded[seat] {
                    return Err(ReplayError::malformed(format!(
                        "игрок {} сфолдил повторно",
                        hand.players[seat]
                    )));
                }
                folded[seat] = true;
                if let Some(current) = points.last_mut() {
                    current.folded.push(FoldRecord {
                        seat,
                        street: action.street,
                    });
                }
            }
            ActionKind::Bet { amount } | ActionKind::Raise { amount } | ActionKind::Call { amount } => {
                let seat = hand.require_seat(action.actor.as_ref())?;
                if folded[seat] {
                    return Err(ReplayError::malformed(format!(
                        "игрок {} действует после фолда",
                        hand.players[seat]
                    )));
                }

                let mut contributions = match points.last() {
                    Some(prev) if prev.street == action.street => prev.contributions.clone(),
                    _ => vec![Chips::ZERO; seats],
                };
                let before = contributions[seat];
                let after = match action.kind {
                    // Колл всегда уравнивает до текущей максимальной ставки улицы.
                    ActionKind::Call { .. } => contributions.iter().copied().max().unwrap_or(Chips::ZERO),
                    _ if action.street == Street::Preflop => *amount + hand.ante,
                    _ => *amount,
                };
                if after <= before {
                    return Err(ReplayError::malformed(format!(
                        "{}: ставка {after} не увеличивает вложение {before} на улице {}",
                        hand.players[seat], action.street
                    )));
                }
                contributions[seat] = after;
                points.push(DecisionPoint::new(action.street, contributions));
            }
            _ => {}
        }
    }

    points.push(DecisionPoint::new(Street::End, Vec::new()));

    log::debug!("раздача {}: точек леджера {}", hand.id, points.len());

    Ok(Ledger::new(seats, hand.bb + hand.ante, points))
}
