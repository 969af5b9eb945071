// src/bin/poker_replay_cli.rs

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use poker_tracker::domain::Street;
use poker_tracker::engine::Hand;
use poker_tracker::session::{LogEvent, Session, SessionConfig};
use serde_json::json;

#[derive(Parser)]
#[command(name = "poker_replay_cli")]
#[command(about = "Реплей сессии: леджер ставок, метки действий и профили игроков")]
struct Cli {
    /// JSON-файл с массивом событий сессии.
    events: PathBuf,
    /// JSON-конфиг (strict, aliases).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Прерваться на первой битой раздаче.
    #[arg(long)]
    strict: bool,
    /// Вывести леджер одной раздачи.
    #[arg(long)]
    hand: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // 1. Конфиг и алиасы
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("конфиг {}", path.display()))?,
        None => SessionConfig::default(),
    };
    config.strict |= cli.strict;
    let aliases = config.alias_table();

    // 2. События
    let raw = fs::read_to_string(&cli.events)
        .with_context(|| format!("не удалось прочитать {}", cli.events.display()))?;
    let events: Vec<LogEvent> = serde_json::from_str(&raw).context("некорректный JSON событий")?;

    // 3. Реплей
    let session = Session::replay(events, &aliases, &config)?;

    if let Some(id) = &cli.hand {
        let hand = session
            .hand(id)
            .with_context(|| format!("раздача {id} не найдена"))?;
        print_ledger(hand);
        return Ok(());
    }

    // 4. Профили и пропущенные раздачи
    let profiles: serde_json::Map<String, serde_json::Value> = session
        .profiles
        .values()
        .map(|p| {
            let value = json!({
                "hands": p.hands(),
                "stats": p.report(),
                "totals": p.totals,
            });
            (p.name.clone(), value)
        })
        .collect();
    let failures: Vec<_> = session
        .failures
        .iter()
        .map(|f| json!({ "hand_id": f.hand_id, "error": f.error }))
        .collect();

    let report = json!({
        "hands": session.len(),
        "profiles": profiles,
        "failures": failures,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_ledger(hand: &Hand) {
    println!("Раздача {} (дилер: {:?})", hand.id, hand.dealer);
    println!("Игроки: {}", hand.players.join(", "));
    println!("Блайнды: {}/{}, анте {}", hand.sb, hand.bb, hand.ante);
    if !hand.starting_stacks.is_empty() {
        let stacks: Vec<String> = hand
            .starting_stacks
            .iter()
            .map(|(player, stack)| format!("{player} ({stack})"))
            .collect();
        println!("Стеки: {}", stacks.join(", "));
    }

    for (index, point) in hand.ledger.points().iter().enumerate() {
        if point.street == Street::End {
            println!("[{index:>3}] конец раздачи");
            continue;
        }
        let stakes: Vec<String> = point.contributions.iter().map(ToString::to_string).collect();
        let label = point
            .label
            .map(|l| format!("{} – {}", hand.player(l.actor).unwrap_or("?"), l.tag))
            .unwrap_or_else(|| "-".to_string());
        println!("[{index:>3}] {:<8} [{}] {label}", point.street, stakes.join(", "));
        for fold in &point.folded {
            println!("       фолд: {}", hand.player(fold.seat).unwrap_or("?"));
        }
    }

    println!(
        "Банк: префлоп {}, флоп {}, тёрн {}, итог {}",
        hand.stats.preflop_pot, hand.stats.flop_pot, hand.stats.turn_pot, hand.stats.final_pot
    );
    println!("VPIP: {:?}", hand.stats.vpip);
    println!("Флоп: {:?}", hand.stats.join_flop);
    println!("Шоудаун: {:?}", hand.stats.wtsd);
}
