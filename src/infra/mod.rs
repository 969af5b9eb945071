//! Инфраструктура вокруг ядра: приведение имён игроков (алиасы).

pub mod alias;

pub use alias::*;
