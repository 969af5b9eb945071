use std::collections::HashMap;

use crate::domain::PlayerId;
use crate::engine::actions::{Action, ActionKind};

/// Приведение имени из лога к каноническому игроку.
///
/// Ядро имена не нормализует: резолвер передаёт вызывающий код, и он
/// обязан быть чистой функцией (никаких интерактивных вопросов).
pub trait AliasResolver {
    fn resolve_alias(&self, raw: &str) -> PlayerId;
}

/// Любая функция `&str -> PlayerId` – тоже резолвер.
impl<F> AliasResolver for F
where
    F: Fn(&str) -> PlayerId,
{
    fn resolve_alias(&self, raw: &str) -> PlayerId {
        self(raw)
    }
}

/// Имя как есть.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityResolver;

impl AliasResolver for IdentityResolver {
    fn resolve_alias(&self, raw: &str) -> PlayerId {
        raw.to_string()
    }
}

/// Таблица алиасов.
///
/// Имя в логе PokerNow имеет вид `"nick @ deviceId"`: если полного имени в
/// таблице нет, ищем по нику, а без совпадения отдаём сам ник.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    aliases: HashMap<String, PlayerId>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<PlayerId>) {
        self.aliases.insert(alias.into(), canonical.into());
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<A, C> FromIterator<(A, C)> for AliasTable
where
    A: Into<String>,
    C: Into<PlayerId>,
{
    fn from_iter<T: IntoIterator<Item = (A, C)>>(iter: T) -> Self {
        let mut table = AliasTable::new();
        for (alias, canonical) in iter {
            table.insert(alias, canonical);
        }
        table
    }
}

impl AliasResolver for AliasTable {
    fn resolve_alias(&self, raw: &str) -> PlayerId {
        if let Some(canonical) = self.aliases.get(raw) {
            return canonical.clone();
        }
        let nick = raw.split(" @ ").next().unwrap_or(raw);
        if nick != raw {
            log::debug!("алиас {raw:?}: полного имени нет в таблице, берём ник {nick:?}");
        }
        self.aliases
            .get(nick)
            .cloned()
            .unwrap_or_else(|| nick.to_string())
    }
}

/// Переписать игроков в действиях раздачи (дилера в `Start` и ключи стеков)
/// через резолвер.
pub fn resolve_actions<R: AliasResolver + ?Sized>(actions: &mut [Action], resolver: &R) {
    for action in actions.iter_mut() {
        if let Some(actor) = action.actor.as_mut() {
            *actor = resolver.resolve_alias(actor);
        }
        if let ActionKind::Start {
            dealer: Some(dealer),
            ..
        } = &mut action.kind
        {
            *dealer = resolver.resolve_alias(dealer);
        }
        if let ActionKind::StackCount { stacks } = &mut action.kind {
            *stacks = std::mem::take(stacks)
                .into_iter()
                .map(|(player, stack)| (resolver.resolve_alias(&player), stack))
                .collect();
        }
    }
}
