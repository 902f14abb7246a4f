use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use super::{
    glyph, GameError, InvalidMove, LiveState, LiveUpdates, PlayerId, Seats, Session, SessionId,
    Snapshot, Status, Symbol, Variant, BOARD_CELLS,
};
use crate::services::win_conditions::line_owner;

/// Whether a grid board enforces turn order and seat ownership itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Standalone game: checks readiness, alternation and player ids
    #[default]
    Independent,
    /// Sub-board of a meta game, which performs those checks instead
    Embedded,
}

/// Move in a grid game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridMove {
    pub player_id: PlayerId,
    /// Cell index, expected 0-8
    pub tile: i64,
    /// Symbol text as submitted (✕ or ◯)
    pub symbol: String,
}

/// Wire shape of a grid board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub board: [&'static str; BOARD_CELLS],
    pub last_move: &'static str,
    pub status: Status,
}

/// Rules and state of one 3x3 board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    cells: [Option<Symbol>; BOARD_CELLS],
    last_move: Option<Symbol>,
    status: Status,
    mode: Mode,
}

impl GridBoard {
    pub fn new(mode: Mode) -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            last_move: None,
            status: Status::Playing,
            mode,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cells(&self) -> &[Option<Symbol>; BOARD_CELLS] {
        &self.cells
    }

    pub fn last_move(&self) -> Option<Symbol> {
        self.last_move
    }

    /// Embedded boards are always ready; independent ones need both seats
    pub fn can_start(&self, seats: &Seats) -> bool {
        self.mode == Mode::Embedded || seats.is_full()
    }

    /// Validate and apply a move
    ///
    /// Checks run in a fixed order and the first failure is reported.
    ///
    /// # Returns
    ///
    /// The cell index that was played
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; the board is untouched on error
    pub fn apply(&mut self, mv: &GridMove, seats: &Seats) -> Result<usize, InvalidMove> {
        let independent = self.mode == Mode::Independent;

        if !self.can_start(seats) {
            return Err(InvalidMove::NotReady);
        }
        let tile = usize::try_from(mv.tile)
            .ok()
            .filter(|tile| *tile < BOARD_CELLS)
            .ok_or(InvalidMove::TileOutOfRange)?;
        let symbol = Symbol::from_wire(&mv.symbol).ok_or(InvalidMove::UnknownSymbol)?;
        if self.cells[tile].is_some() {
            return Err(InvalidMove::TileOccupied(tile));
        }
        if independent && self.last_move == Some(symbol) {
            return Err(InvalidMove::SameSymbolTwice(symbol));
        }
        if !self.status.is_playing() {
            return Err(InvalidMove::GameOver);
        }
        if independent && seats.holder(symbol) != Some(mv.player_id) {
            return Err(InvalidMove::WrongPlayer);
        }

        self.cells[tile] = Some(symbol);
        self.last_move = Some(symbol);

        if line_owner(&self.cells, tile).is_some() {
            self.status = Status::won_by(symbol);
        } else if self.cells.iter().all(Option::is_some) {
            self.status = Status::Tied;
        }

        Ok(tile)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            board: self.cells.map(glyph),
            last_move: glyph(self.last_move),
            status: self.status,
        }
    }
}

impl Default for GridBoard {
    fn default() -> Self {
        Self::new(Mode::Independent)
    }
}

#[derive(Debug)]
struct GridTable {
    board: GridBoard,
    seats: Seats,
}

/// A standalone tic-tac-toe session
#[derive(Debug)]
pub struct GridGame {
    id: SessionId,
    created_at: OffsetDateTime,
    table: Mutex<GridTable>,
    live: LiveState,
}

impl GridGame {
    /// Create a session whose board runs in the given mode
    pub fn with_mode(id: SessionId, mode: Mode) -> Self {
        info!(game_id = %id, ?mode, "Creating grid game");
        Self {
            id,
            created_at: OffsetDateTime::now_utc(),
            table: Mutex::new(GridTable {
                board: GridBoard::new(mode),
                seats: Seats::default(),
            }),
            live: LiveState::new(),
        }
    }

    /// Current board state
    pub fn board(&self) -> GridBoard {
        self.table().board.clone()
    }

    fn table(&self) -> MutexGuard<'_, GridTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Session for GridGame {
    type Move = GridMove;

    const VARIANT: Variant = Variant::Grid;

    fn create(id: SessionId) -> Self {
        Self::with_mode(id, Mode::Independent)
    }

    fn id(&self) -> SessionId {
        self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[instrument(skip(self), fields(game_id = %self.id))]
    fn add_player(&self) -> Result<PlayerId, GameError> {
        let (symbol, player_id) = self.table().seats.admit().inspect_err(|_| {
            debug!("Grid game is full");
        })?;
        info!(%player_id, %symbol, "Player joined grid game");
        Ok(player_id)
    }

    fn can_start(&self) -> bool {
        let table = self.table();
        table.board.can_start(&table.seats)
    }

    #[instrument(skip(self), fields(game_id = %self.id))]
    fn apply_move(&self, mv: GridMove) -> Result<(), GameError> {
        let mut table = self.table();
        let GridTable { board, seats } = &mut *table;

        // Work on a copy; the move only lands once its snapshot is encoded
        let mut next = board.clone();
        let tile = next.apply(&mv, seats).inspect_err(|reason| {
            debug!(%reason, "Rejected grid move");
        })?;
        let data = serde_json::to_string(&next.snapshot()).map_err(|e| {
            warn!("Failed to encode grid snapshot: {}", e);
            GameError::Snapshot(e.to_string())
        })?;

        // Publish under the lock so snapshots follow move order
        *board = next;
        let version = self.live.publish(data);
        info!(tile, status = ?board.status(), version, "Accepted grid move");
        Ok(())
    }

    fn subscribe(&self) -> LiveUpdates {
        debug!(game_id = %self.id, "New grid game subscriber");
        self.live.subscribe()
    }

    fn latest(&self) -> Snapshot {
        self.live.latest()
    }

    fn status(&self) -> Status {
        self.table().board.status()
    }

    fn player_count(&self) -> usize {
        self.table().seats.occupied()
    }
}
