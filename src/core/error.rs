use thiserror::Error;

use super::Symbol;

/// Reason a move was rejected
///
/// Each rule violation maps to exactly one variant so callers can tell
/// failures apart without parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("game is not ready to start")]
    NotReady,
    #[error("tile is not between 0 and 8")]
    TileOutOfRange,
    #[error("symbol is not ✕ or ◯")]
    UnknownSymbol,
    #[error("tile {0} is already occupied")]
    TileOccupied(usize),
    #[error("{0} made a move last turn")]
    SameSymbolTwice(Symbol),
    #[error("game is already over")]
    GameOver,
    #[error("cannot move for other player")]
    WrongPlayer,
    #[error("board is not between 0 and 8")]
    BoardOutOfRange,
    #[error("board is not the active board ({0})")]
    InactiveBoard(usize),
    #[error("board {0} is no longer active")]
    BoardDecided(usize),
}

/// Errors surfaced by session and registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game not found")]
    SessionNotFound,
    #[error("game is already full")]
    SessionFull,
    #[error(transparent)]
    InvalidMove(#[from] InvalidMove),
    #[error("{0}")]
    BadRequest(String),
    #[error("failed to encode game state: {0}")]
    Snapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_messages() {
        assert_eq!(
            InvalidMove::TileOccupied(3).to_string(),
            "tile 3 is already occupied"
        );
        assert_eq!(
            InvalidMove::SameSymbolTwice(Symbol::First).to_string(),
            "✕ made a move last turn"
        );
        assert_eq!(
            InvalidMove::InactiveBoard(4).to_string(),
            "board is not the active board (4)"
        );
    }

    #[test]
    fn test_invalid_move_is_transparent() {
        let err: GameError = InvalidMove::GameOver.into();
        assert_eq!(err.to_string(), "game is already over");
        assert_eq!(err, GameError::InvalidMove(InvalidMove::GameOver));
    }

    #[test]
    fn test_snapshot_error_message() {
        let err = GameError::Snapshot("key must be a string".to_string());
        assert_eq!(
            err.to_string(),
            "failed to encode game state: key must be a string"
        );
    }
}
