//! Interactive table interpreter.
//!
//! Reads one command per line from stdin, runs it against the session and
//! prints the outcome as plain text. Domain errors are printed and the
//! loop continues; only I/O failures on the terminal end the program.
//!
//! `RUST_LOG=debug` shows every transition and record write.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use log::warn;

use mtg_table::stats::TypeCategory;
use mtg_table::{CardData, CardView, Command, Outcome, Session, TableConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = TableConfig::from_env();
    let data_dir = config.data_dir().display().to_string();
    let mut session = Session::open(config)
        .with_context(|| format!("opening table data in {}", data_dir))?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        prompt("> ")?;
        let Some(line) = lines.next() else { break };
        let line = line.context("reading command")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!("rejected {:?}: {}", line, e);
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Clear {
            prompt("Are you sure you want to clear all players and mappings? (y/n): ")?;
            let answer = lines.next().transpose().context("reading confirmation")?;
            if answer.as_deref().map(str::trim) != Some("y") {
                continue;
            }
        }

        match session.execute(&command) {
            Ok(Outcome::Exit) => break,
            Ok(outcome) => render(&outcome),
            Err(e) => {
                warn!("{:?} failed: {}", command, e);
                println!("{}", e);
            }
        }
    }
    Ok(())
}

fn prompt(text: &str) -> Result<()> {
    print!("{}", text);
    io::stdout().flush().context("writing prompt")
}

fn render(outcome: &Outcome) {
    match outcome {
        Outcome::Loaded(summary) => println!(
            "Loaded {} cards for {} ({} in hand, {} in library)",
            summary.cards, summary.player, summary.hand, summary.library
        ),
        Outcome::PlayerSelected(player) => println!("Player: {}", player),
        Outcome::Players(players) => {
            for player in players {
                println!("{}", player);
            }
        }
        Outcome::Moved(applied) => println!("{}", applied),
        Outcome::Zone { zone, cards } => {
            println!("{} ({})", zone, cards.len());
            for card in cards {
                println!("{}", card_line(card));
            }
        }
        Outcome::ZoneCounts(counts) => {
            for (zone, n) in counts {
                println!("{:<10} {}", zone.to_string(), n);
            }
        }
        Outcome::History(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                println!("{:>4}  {}", i + 1, entry);
            }
        }
        Outcome::Replayed { entries, matches } => println!(
            "Replayed {} moves: {}",
            entries,
            if *matches { "matches stored zones" } else { "DIVERGES from stored zones" }
        ),
        Outcome::Stats(report) => {
            for card in &report.cards {
                println!(
                    "{:>3} {:>5.1}%  {:>4} {} {}  {}",
                    card.count,
                    card.percent,
                    card.cmc,
                    card.type_initial.unwrap_or('-'),
                    card.mana_cost,
                    card.name
                );
            }
            println!();
            let header: String = TypeCategory::ALL.iter().map(|c| format!("{:>3}", c.initial())).collect();
            println!("CMC{}  Total", header);
            for row in &report.curve {
                let counts: String = TypeCategory::ALL
                    .iter()
                    .map(|&c| format!("{:>3}", row.count(c)))
                    .collect();
                println!("{:>3}{}  {:>5}  {:>5.1}%", row.cmc, counts, row.total, row.percent);
            }
            println!();
            for color in &report.colors {
                println!("{} {:>3} {:>5.1}%", color.symbol, color.count, color.percent);
            }
        }
        Outcome::Names(names) => {
            for name in names {
                println!("{}", name);
            }
            println!("Total: {}", names.len());
        }
        Outcome::Identities(ids) => {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            println!("{}", ids.join(","));
        }
        Outcome::Mappings(pairs) => {
            for (id, name) in pairs {
                println!("{} : {}", id, name);
            }
        }
        Outcome::Snapshots(names) => {
            for name in names {
                println!("{}", name);
            }
        }
        Outcome::Cleared => println!("Cleared all players and mappings"),
        Outcome::Saved { name, cards } => println!("Saved {} mappings as {}", cards, name),
        Outcome::MapLoaded { name, cards } => println!("Loaded {} mappings from {}", cards, name),
        Outcome::Colors => {
            println!("W - white");
            println!("U - blue");
            println!("B - black");
            println!("G - green");
            println!("R - red");
        }
        Outcome::Card(card) => println!("{}", card_block(card)),
        Outcome::Attributes(attrs) => {
            for (key, value) in attrs {
                println!("{} : {}", key, value);
            }
        }
        Outcome::Identity(view) => match &view.data {
            Some(card) => println!("{}", card_block(card)),
            None => println!("{}", card_line(view)),
        },
        Outcome::Bound(id, name) => println!("{} : {}", id, name),
        Outcome::Exit => {}
    }
}

fn card_line(view: &CardView) -> String {
    match &view.data {
        Some(card) => format!("{:>5}  {}  {}", view.identity, card.name, card.mana_cost_text()),
        None => format!("{:>5}  {}", view.identity, view.name),
    }
}

fn card_block(card: &CardData) -> String {
    let mut out = String::from("---------------------\n");
    out.push_str(&format!("{} ({})", card.name, card.color_identity.join(",")));
    if let Some(cost) = &card.mana_cost {
        out.push_str(&format!(" {}", cost));
    }
    out.push('\n');
    out.push_str(&card.types.join(","));
    if !card.subtypes.is_empty() {
        out.push_str(&format!(" - {}", card.subtypes.join(",")));
    }
    if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
        out.push_str(&format!(" - {}/{}", power, toughness));
    }
    if let Some(loyalty) = &card.loyalty {
        out.push_str(&format!(" - {}", loyalty));
    }
    out.push_str("\n\n");
    out.push_str(card.text.as_deref().unwrap_or(""));
    out.push_str("\n---------------------");
    out
}
