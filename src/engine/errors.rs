use thiserror::Error;

use crate::domain::PlayerId;

/// Ошибки восстановления раздачи.
///
/// Все три возвращаются сразу в месте обнаружения; раздача целиком
/// отбрасывается, лучшего-из-возможного восстановления нет.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// Структурная ошибка потока действий (нет Start, обрыв, порядок улиц…).
    #[error("Некорректная раздача: {0}")]
    MalformedHand(String),

    /// Между соседними точками леджера изменилась ставка не ровно у одного игрока.
    #[error("Нарушен инвариант леджера в точке {point}: изменилось ставок – {changed}")]
    InvariantViolation { point: usize, changed: usize },

    /// Действие ссылается на игрока, который ещё не сел за стол.
    #[error("Неизвестный игрок: {0:?}")]
    UnknownPlayer(PlayerId),
}

impl ReplayError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ReplayError::MalformedHand(reason.into())
    }
}
