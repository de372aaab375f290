//! Interpreter commands.
//!
//! `Command::parse` turns one input line into a typed command. Zone moves
//! parse into a `Transition`, whose canonical text is what the move
//! history records.
//!
//! ```
//! use mtg_table::core::Command;
//! use mtg_table::zones::{Transition, Zone};
//!
//! assert_eq!(Command::parse("SHUFFLE library").unwrap(), Some(Command::Move(Transition::Shuffle(Zone::Library))));
//! assert_eq!(Command::parse("   ").unwrap(), None);
//! ```

use serde_json::Value;
use smallvec::SmallVec;

use super::error::{Result, TableError};
use super::identity::CardIdentity;
use super::player::PlayerKey;
use crate::zones::{Transition, Zone};

/// Attribute filters, `(attribute, value)`; all must match.
pub type Filters = SmallVec<[(String, String); 2]>;

/// One parsed interpreter command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `LOAD <deck>`: load a deck for the player named after it.
    Load(String),
    /// `PLAYER <id>`: switch the current player.
    Player(PlayerKey),
    /// `PLAYERS`
    Players,
    /// `DRAW`, `PLAY`, `PUT`, `SHUFFLE`
    Move(Transition),
    /// `SHOW <zone>`
    Show(Zone),
    /// `ZONES`: card count of every zone.
    Zones,
    /// `HISTORY`
    History,
    /// `REPLAY`: rebuild from history and compare.
    Replay,
    /// `STATS <deck>`
    Stats(String),
    /// `ALL`: every reference card name.
    All,
    /// `MAPPED`: every minted identity.
    Mapped,
    /// `LIST`: every `id : name` mapping.
    List,
    /// `LIST SAVED`: snapshot names.
    ListSaved,
    /// `CLEAR`: full reset.
    Clear,
    /// `SAVE <name>`
    Save(String),
    /// `LOADMAP <name>`
    LoadMap(String),
    /// `COLORS`: the color legend.
    Colors,
    /// `FILTER k=v ...` or `{"k": "v", ...}`
    Filter(Filters),
    /// `FULL <name>`: every attribute of a card.
    Full(String),
    /// `CARD <name>` or bare text.
    Card(String),
    /// `<id>`: look up a minted identity.
    Resolve(CardIdentity),
    /// `<id> <name>`: bind an identity by hand.
    Bind(CardIdentity, String),
    /// `exit`
    Exit,
}

impl Command {
    /// Parse one line. Blank lines are `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let verb = head.to_ascii_uppercase();
        let arg = |what: &str| -> Result<String> {
            if rest.is_empty() {
                Err(TableError::ParseCommand(format!("{} needs a {}", verb, what)))
            } else {
                Ok(rest.to_string())
            }
        };

        let command = match (verb.as_str(), rest.is_empty()) {
            ("EXIT", true) => Command::Exit,
            ("ALL", true) => Command::All,
            ("MAPPED", true) => Command::Mapped,
            ("LIST", true) => Command::List,
            ("LIST", false) if rest.eq_ignore_ascii_case("SAVED") => Command::ListSaved,
            ("CLEAR", true) => Command::Clear,
            ("COLORS", true) => Command::Colors,
            ("PLAYERS", true) => Command::Players,
            ("ZONES", true) => Command::Zones,
            ("HISTORY", true) => Command::History,
            ("REPLAY", true) => Command::Replay,
            ("DRAW", _) | ("PLAY", _) | ("PUT", _) | ("SHUFFLE", _) => Command::Move(line.parse()?),
            ("SHOW", _) => Command::Show(arg("zone")?.parse()?),
            ("LOAD", _) => Command::Load(arg("deck name")?),
            ("LOADMAP", _) => Command::LoadMap(arg("map name")?),
            ("SAVE", _) => Command::Save(arg("map name")?),
            ("STATS", _) => Command::Stats(arg("deck name")?),
            ("PLAYER", _) => Command::Player(PlayerKey::from_deck_name(&arg("player")?)),
            ("FULL", _) => Command::Full(arg("card name")?),
            ("CARD", _) => Command::Card(arg("card name")?),
            ("FILTER", _) => Command::Filter(parse_pairs(&arg("filter")?)?),
            _ if line.starts_with('{') => Command::Filter(parse_json_filter(line)?),
            _ => match head.parse::<u32>() {
                Ok(id) if rest.is_empty() => Command::Resolve(CardIdentity(id)),
                Ok(id) => Command::Bind(CardIdentity(id), rest.to_string()),
                Err(_) => Command::Card(line.to_string()),
            },
        };
        Ok(Some(command))
    }
}

/// `types=Creature colorIdentity=G`
fn parse_pairs(text: &str) -> Result<Filters> {
    text.split_whitespace()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| TableError::ParseCommand(format!("filter needs key=value: {}", pair)))
        })
        .collect()
}

/// `{"types": "Creature", "colorIdentity": "G"}`
fn parse_json_filter(text: &str) -> Result<Filters> {
    let object: serde_json::Map<String, Value> = serde_json::from_str(text)
        .map_err(|e| TableError::ParseCommand(format!("filter object: {}", e)))?;
    object
        .into_iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k, s)),
            Value::Number(n) => Ok((k, n.to_string())),
            Value::Bool(b) => Ok((k, b.to_string())),
            other => Err(TableError::ParseCommand(format!("filter value for {}: {}", k, other))),
        })
        .collect()
}
