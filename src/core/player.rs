use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::GameError;

/// One of the two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Moves first (✕)
    #[serde(rename = "✕")]
    First,
    /// Moves second (◯)
    #[serde(rename = "◯")]
    Second,
}

impl Symbol {
    /// Get the wire representation of the symbol
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::First => "✕",
            Symbol::Second => "◯",
        }
    }

    /// Parse a symbol as submitted by a client
    ///
    /// # Returns
    ///
    /// None if the text is neither ✕ nor ◯
    pub fn from_wire(text: &str) -> Option<Self> {
        match text {
            "✕" => Some(Symbol::First),
            "◯" => Some(Symbol::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire text for a cell or last-move slot; empty string when unset
pub fn glyph(cell: Option<Symbol>) -> &'static str {
    cell.map_or("", |symbol| symbol.as_str())
}

/// Server-issued identifier proving the right to move for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random player id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Seat assignments for the two symbols of a session
#[derive(Debug, Clone, Default)]
pub struct Seats {
    first: Option<PlayerId>,
    second: Option<PlayerId>,
}

impl Seats {
    /// Admit a new player into the next free seat
    ///
    /// Seats are filled in admission order: first mover, then second mover.
    ///
    /// # Errors
    ///
    /// Returns `SessionFull` if both seats are taken
    pub fn admit(&mut self) -> Result<(Symbol, PlayerId), GameError> {
        let player_id = PlayerId::new();
        if self.first.is_none() {
            self.first = Some(player_id);
            return Ok((Symbol::First, player_id));
        }
        if self.second.is_none() {
            self.second = Some(player_id);
            return Ok((Symbol::Second, player_id));
        }
        Err(GameError::SessionFull)
    }

    /// Player registered for a symbol, if any
    pub fn holder(&self, symbol: Symbol) -> Option<PlayerId> {
        match symbol {
            Symbol::First => self.first,
            Symbol::Second => self.second,
        }
    }

    /// Number of occupied seats
    pub fn occupied(&self) -> usize {
        usize::from(self.first.is_some()) + usize::from(self.second.is_some())
    }

    pub fn is_full(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_wire_format() {
        assert_eq!(Symbol::from_wire("✕"), Some(Symbol::First));
        assert_eq!(Symbol::from_wire("◯"), Some(Symbol::Second));
        assert_eq!(Symbol::from_wire("X"), None);
        assert_eq!(Symbol::from_wire(""), None);
        assert_eq!(serde_json::to_string(&Symbol::Second).unwrap(), "\"◯\"");
    }

    #[test]
    fn test_glyph() {
        assert_eq!(glyph(None), "");
        assert_eq!(glyph(Some(Symbol::First)), "✕");
    }

    #[test]
    fn test_seats_fill_in_order() {
        let mut seats = Seats::default();
        assert_eq!(seats.occupied(), 0);

        let (first, p1) = seats.admit().unwrap();
        let (second, p2) = seats.admit().unwrap();

        assert_eq!(first, Symbol::First);
        assert_eq!(second, Symbol::Second);
        assert_ne!(p1, p2);
        assert_eq!(seats.holder(Symbol::First), Some(p1));
        assert_eq!(seats.holder(Symbol::Second), Some(p2));
        assert!(seats.is_full());
    }

    #[test]
    fn test_third_admission_fails() {
        let mut seats = Seats::default();
        seats.admit().unwrap();
        seats.admit().unwrap();

        assert_eq!(seats.admit(), Err(GameError::SessionFull));
        assert_eq!(seats.occupied(), 2);
    }

    #[test]
    fn test_player_id_parse() {
        let id = PlayerId::new();
        assert_eq!(id.to_string().parse::<PlayerId>().unwrap(), id);
        assert!("not-a-uuid".parse::<PlayerId>().is_err());
    }
}
