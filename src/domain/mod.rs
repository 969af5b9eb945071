//! Доменная модель: фишки, карты, улицы и борд.

pub mod card;
pub mod chips;
pub mod hand;

/// Идентификатор игрока – строка из лога. Регистр и алиасы внутри ядра
/// не нормализуются, это задача `infra::AliasResolver`.
pub type PlayerId = String;

/// Идентификатор раздачи из маркера `Start`.
pub type HandId = String;

/// Индекс игрока в порядке рассадки раздачи (`Hand::players`).
pub type SeatIndex = usize;

pub use card::*;
pub use chips::*;
pub use hand::*;
