//! Line-pattern detection for win and forbidden-move checks.
//!
//! Every rule in the engine asks the same question: what runs of one color
//! exist on the four lines (horizontal, vertical, two diagonals) through the
//! stone that was just placed? All checks share one scanning primitive over
//! a nine-cell window centered on the placed stone (a stone four or more
//! cells away cannot take part in any pattern the move creates). Cells past
//! the board edge are skipped: they neither extend a run nor break one,
//! matching edge-truncation rather than wraparound or walls.

use crate::board::{Board, Stone};

/// The four scan directions: horizontal, vertical, and both diagonals.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// On-board cells of the +/-4 window through `(x, y)` along one direction,
/// in scan order, with their coordinates.
fn window(board: &Board, x: usize, y: usize, (dx, dy): (isize, isize)) -> Vec<(isize, isize, Option<Stone>)> {
    let mut cells = Vec::with_capacity(9);
    for k in -4isize..=4 {
        let cx = x as isize + k * dx;
        let cy = y as isize + k * dy;
        if let Some(cell) = board.at(cx, cy) {
            cells.push((cx, cy, cell));
        }
    }
    cells
}

/// Maximal contiguous runs of `stone` within one window, as
/// `(start, len)` index pairs into the window.
fn runs(cells: &[(isize, isize, Option<Stone>)], stone: Stone) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut len = 0;
    for (i, &(_, _, cell)) in cells.iter().enumerate() {
        if cell == Some(stone) {
            if len == 0 {
                start = i;
            }
            len += 1;
        } else if len > 0 {
            out.push((start, len));
            len = 0;
        }
    }
    if len > 0 {
        out.push((start, len));
    }
    out
}

/// Does any of the four lines through `(x, y)` hold a contiguous run of
/// `stone` of at least `target` cells within the scan window?
///
/// Five-in-a-row detection uses `target == 5`; Renju overline detection
/// uses `target == 6`.
pub fn has_run(board: &Board, x: usize, y: usize, stone: Stone, target: usize) -> bool {
    DIRECTIONS.iter().any(|&dir| {
        runs(&window(board, x, y, dir), stone)
            .iter()
            .any(|&(_, len)| len >= target)
    })
}

/// Count open fours of `stone` across the four lines through `(x, y)`.
///
/// An open four is a contiguous run of exactly four stones whose two cells
/// immediately beyond each end are both on the board and empty. A run
/// flush against the edge is not open on that side, and a run of five or
/// more never counts (its flanks are stones, not empties).
pub fn open_fours(board: &Board, x: usize, y: usize, stone: Stone) -> usize {
    let mut total = 0;
    for &(dx, dy) in &DIRECTIONS {
        let cells = window(board, x, y, (dx, dy));
        for (start, len) in runs(&cells, stone) {
            if len != 4 {
                continue;
            }
            let (hx, hy, _) = cells[start];
            let (tx, ty, _) = cells[start + len - 1];
            let before = board.at(hx - dx, hy - dy);
            let after = board.at(tx + dx, ty + dy);
            if before == Some(None) && after == Some(None) {
                total += 1;
            }
        }
    }
    total
}
