use crate::core::{Symbol, BOARD_CELLS};

/// The eight three-in-a-row lines of a 3x3 board, by cell index
pub const WINNING_LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Lines passing through a cell
pub fn lines_through(cell: usize) -> impl Iterator<Item = &'static [usize; 3]> {
    WINNING_LINES.iter().filter(move |line| line.contains(&cell))
}

/// Check whether a completed line passes through `cell`
///
/// # Arguments
///
/// * `owners` - Claiming symbol per position (cell symbol, or the winner of a sub-board)
/// * `cell` - Position that was just played
///
/// # Returns
///
/// The symbol owning a full line through `cell`, if any
pub fn line_owner(owners: &[Option<Symbol>; BOARD_CELLS], cell: usize) -> Option<Symbol> {
    lines_through(cell).find_map(|&[a, b, c]| {
        let owner = owners[a]?;
        (owners[b] == Some(owner) && owners[c] == Some(owner)).then_some(owner)
    })
}
