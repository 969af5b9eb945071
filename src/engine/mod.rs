//! Восстановление раздачи: сборка, леджер ставок, классификация, статистика.
//!
//! Высокоуровневый объект: `Hand`
//! Этапы (строго по порядку, каждый читает только результат предыдущего):
//!   - `assemble` – порядок игроков, улицы, борд;
//!   - `build_ledger` – точки решения со ставками по улицам;
//!   - `classify` – метки PFR / 3-Bet / C-Bet / Donk / Check-Raise / Call;
//!   - `extract` – VPIP, join flop, WTSD, банк, счётчики игроков.

pub mod actions;
pub mod assembler;
pub mod classifier;
pub mod errors;
pub mod hand;
pub mod ledger;
pub mod sheet;
pub mod stats;

pub use actions::{Action, ActionKind, BlindType};
pub use assembler::{assemble, AssembledHand};
pub use classifier::{classify, ActionTag, AggressorMarkers, Classification, Label, StreetLeads};
pub use errors::ReplayError;
pub use hand::Hand;
pub use ledger::{build_ledger, DecisionPoint, FoldRecord, Ledger};
pub use sheet::{RawStat, StatSheet};
pub use stats::{extract, HandStats};
