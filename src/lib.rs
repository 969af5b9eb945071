//! Восстановление покерных раздач из лога стола и сбор статистики игроков.
//!
//! Слои:
//!   - `domain` – карты, фишки, улицы, борд;
//!   - `engine` – одна раздача: сборка, леджер ставок, классификатор, статистика;
//!   - `infra` – приведение алиасов игроков к каноническим именам;
//!   - `session` – поток событий стола целиком, профили игроков.

pub mod domain;
pub mod engine;
pub mod infra;
pub mod session;

pub use engine::{Hand, ReplayError};
pub use session::{PlayerProfile, Session, SessionConfig};
