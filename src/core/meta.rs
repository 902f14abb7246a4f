use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

use super::{
    glyph, GameError, GridBoard, GridMove, GridSnapshot, InvalidMove, LiveState, LiveUpdates,
    Mode, PlayerId, Seats, Session, SessionId, Snapshot, Status, Symbol, Variant, BOARD_CELLS,
    OPENING_SUB_BOARD,
};
use crate::services::win_conditions::lines_through;

/// Move in a meta game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaMove {
    pub player_id: PlayerId,
    /// Sub-board index, expected 0-8
    pub board: i64,
    /// Cell index within the sub-board, expected 0-8
    pub tile: i64,
    pub symbol: String,
}

/// Sub-board the next move must target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBoard {
    Board(usize),
    /// Any undecided sub-board
    Any,
}

impl ActiveBoard {
    /// Index of the forced sub-board, None when unconstrained
    pub fn index(&self) -> Option<usize> {
        match self {
            ActiveBoard::Board(index) => Some(*index),
            ActiveBoard::Any => None,
        }
    }
}

/// Wire shape of a meta board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaSnapshot {
    pub boards: Vec<GridSnapshot>,
    /// null when any undecided sub-board may be played
    pub active_board: Option<usize>,
    pub last_move: &'static str,
    pub status: Status,
}

/// Rules and state of nine grid boards played as one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaBoard {
    boards: [GridBoard; BOARD_CELLS],
    active: ActiveBoard,
    last_move: Option<Symbol>,
    status: Status,
}

impl MetaBoard {
    pub fn new() -> Self {
        Self {
            boards: std::array::from_fn(|_| GridBoard::new(Mode::Embedded)),
            active: ActiveBoard::Board(OPENING_SUB_BOARD),
            last_move: None,
            status: Status::Playing,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn active(&self) -> ActiveBoard {
        self.active
    }

    pub fn last_move(&self) -> Option<Symbol> {
        self.last_move
    }

    pub fn sub_board(&self, index: usize) -> Option<&GridBoard> {
        self.boards.get(index)
    }

    /// Validate and apply a move
    ///
    /// Meta-level checks run first; cell-level checks are left to the
    /// targeted sub-board.
    ///
    /// # Errors
    ///
    /// Returns the rejection reason; nothing is changed on error
    pub fn apply(&mut self, mv: &MetaMove, seats: &Seats) -> Result<(), InvalidMove> {
        if !seats.is_full() {
            return Err(InvalidMove::NotReady);
        }
        let board = usize::try_from(mv.board)
            .ok()
            .filter(|board| *board < BOARD_CELLS)
            .ok_or(InvalidMove::BoardOutOfRange)?;
        if let ActiveBoard::Board(active) = self.active {
            if active != board {
                return Err(InvalidMove::InactiveBoard(active));
            }
        }
        let symbol = Symbol::from_wire(&mv.symbol).ok_or(InvalidMove::UnknownSymbol)?;
        if !self.boards[board].status().is_playing() {
            return Err(InvalidMove::BoardDecided(board));
        }
        if self.last_move == Some(symbol) {
            return Err(InvalidMove::SameSymbolTwice(symbol));
        }
        if !self.status.is_playing() {
            return Err(InvalidMove::GameOver);
        }
        if seats.holder(symbol) != Some(mv.player_id) {
            return Err(InvalidMove::WrongPlayer);
        }

        let cell_move = GridMove {
            player_id: mv.player_id,
            tile: mv.tile,
            symbol: mv.symbol.clone(),
        };
        let tile = self.boards[board].apply(&cell_move, seats)?;
        self.last_move = Some(symbol);

        // The cell just played picks the next sub-board
        self.active = if self.boards[tile].status().is_playing() {
            ActiveBoard::Board(tile)
        } else {
            ActiveBoard::Any
        };

        let outcomes: [Status; BOARD_CELLS] = std::array::from_fn(|i| self.boards[i].status());
        if completes_line(&outcomes, board) {
            self.status = Status::won_by(symbol);
        } else if self.boards.iter().all(|b| !b.status().is_playing()) {
            self.status = Status::Tied;
        }

        Ok(())
    }

    pub fn snapshot(&self) -> MetaSnapshot {
        MetaSnapshot {
            boards: self.boards.iter().map(GridBoard::snapshot).collect(),
            active_board: self.active.index(),
            last_move: glyph(self.last_move),
            status: self.status,
        }
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a line through `board` holds three sub-boards with the same decided status
///
/// Three tied sub-boards complete a line just like three won by one symbol.
fn completes_line(outcomes: &[Status; BOARD_CELLS], board: usize) -> bool {
    lines_through(board).any(|&[a, b, c]| {
        let status = outcomes[a];
        !status.is_playing() && outcomes[b] == status && outcomes[c] == status
    })
}

#[derive(Debug)]
struct MetaTable {
    board: MetaBoard,
    seats: Seats,
}

/// An ultimate tic-tac-toe session
#[derive(Debug)]
pub struct MetaGame {
    id: SessionId,
    created_at: OffsetDateTime,
    table: Mutex<MetaTable>,
    live: LiveState,
}

impl MetaGame {
    /// Current board state
    pub fn board(&self) -> MetaBoard {
        self.table().board.clone()
    }

    fn table(&self) -> MutexGuard<'_, MetaTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Session for MetaGame {
    type Move = MetaMove;

    const VARIANT: Variant = Variant::Meta;

    fn create(id: SessionId) -> Self {
        info!(game_id = %id, "Creating meta game");
        Self {
            id,
            created_at: OffsetDateTime::now_utc(),
            table: Mutex::new(MetaTable {
                board: MetaBoard::new(),
                seats: Seats::default(),
            }),
            live: LiveState::new(),
        }
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
            debug!("Meta game is full");
        })?;
        info!(%player_id, %symbol, "Player joined meta game");
        Ok(player_id)
    }

    fn can_start(&self) -> bool {
        self.table().seats.is_full()
    }

    #[instrument(skip(self), fields(game_id = %self.id))]
    fn apply_move(&self, mv: MetaMove) -> Result<(), GameError> {
        let mut table = self.table();
        let MetaTable { board, seats } = &mut *table;

        let mut next = board.clone();
        next.apply(&mv, seats).inspect_err(|reason| {
            debug!(%reason, "Rejected meta move");
        })?;
        let data = serde_json::to_string(&next.snapshot()).map_err(|e| {
            warn!("Failed to encode meta snapshot: {}", e);
            GameError::Snapshot(e.to_string())
        })?;

        *board = next;
        let version = self.live.publish(data);
        info!(
            board = mv.board,
            tile = mv.tile,
            active = ?board.active(),
            status = ?board.status(),
            version,
            "Accepted meta move"
        );
        Ok(())
    }

    fn subscribe(&self) -> LiveUpdates {
        debug!(game_id = %self.id, "New meta game subscriber");
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
