use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{GameError, LiveUpdates, PlayerId, Snapshot, Symbol};

/// Unique identifier of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Game variants served by this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Plain 3x3 tic-tac-toe
    #[serde(rename = "ttt")]
    Grid,
    /// Nine tic-tac-toe boards played as one
    #[serde(rename = "uttt")]
    Meta,
}

impl Variant {
    /// Get the URL name of the variant
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Grid => "ttt",
            Variant::Meta => "uttt",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ttt" => Ok(Variant::Grid),
            "uttt" => Ok(Variant::Meta),
            _ => Err(GameError::BadRequest("gameType is invalid".to_string())),
        }
    }
}

/// Outcome of a board (or of a whole meta game)
///
/// Only ever moves from `Playing` to one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Playing,
    Tied,
    #[serde(rename = "X_VICTORY")]
    FirstMoverWon,
    #[serde(rename = "O_VICTORY")]
    SecondMoverWon,
}

impl Status {
    /// Victory status for a symbol
    pub fn won_by(symbol: Symbol) -> Self {
        match symbol {
            Symbol::First => Status::FirstMoverWon,
            Symbol::Second => Status::SecondMoverWon,
        }
    }

    /// Symbol that won, if this is a victory
    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Status::FirstMoverWon => Some(Symbol::First),
            Status::SecondMoverWon => Some(Symbol::Second),
            Status::Playing | Status::Tied => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        *self == Status::Playing
    }
}

/// Contract shared by every game variant
///
/// Implementations serialize `add_player` and `apply_move` per session and
/// publish a snapshot after every accepted move.
pub trait Session: Send + Sync + 'static {
    /// Move submitted by clients of this variant
    type Move: DeserializeOwned + fmt::Debug + Send;

    const VARIANT: Variant;

    /// Create an empty session with the given id
    fn create(id: SessionId) -> Self;

    fn id(&self) -> SessionId;

    fn created_at(&self) -> OffsetDateTime;

    /// Admit the next player
    ///
    /// # Errors
    ///
    /// Returns `SessionFull` when both symbols are taken
    fn add_player(&self) -> Result<PlayerId, GameError>;

    /// Whether every required player is present
    fn can_start(&self) -> bool;

    /// Validate and apply a move, publishing the new state on success
    ///
    /// # Errors
    ///
    /// Returns `InvalidMove` on any rule violation; state is left unchanged
    fn apply_move(&self, mv: Self::Move) -> Result<(), GameError>;

    /// Attach a live subscriber
    fn subscribe(&self) -> LiveUpdates;

    /// Most recently published snapshot
    fn latest(&self) -> Snapshot;

    /// Top-level status of the session
    fn status(&self) -> Status;

    fn player_count(&self) -> usize;
}
