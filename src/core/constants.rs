/// Cells on a grid board, and sub-boards on a meta board
pub const BOARD_CELLS: usize = 9;

/// Sub-board that must receive the opening move of a meta game
pub const OPENING_SUB_BOARD: usize = 4;

/// Payload published on a session's live channel before any move is accepted
pub const PLACEHOLDER_SNAPSHOT: &str = "game has not started";
