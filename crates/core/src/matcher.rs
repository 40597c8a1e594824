//! Match detection.
//!
//! `find_matches` scans the queried gem's whole row left-to-right and whole
//! column bottom-to-top. Each axis scan stops at the first empty cell, and
//! accepts the first run of three or more same-kind gems it grows, which
//! is not necessarily the run containing the queried gem. That behavior is
//! part of the board's observable rules (cascade waves resolve the first
//! discovered result, later runs wait for the next wave) and is kept
//! exactly, including the early-out in [`has_matches_anywhere`].

use arrayvec::ArrayVec;

use tui_gems_types::{Cell, GemKind, MAX_BOARD_DIM};

use crate::board::Board;
use crate::gems::{GemArena, GemId};

const MAX_RUN: usize = MAX_BOARD_DIM as usize;
const MAX_MARKS: usize = 2 * MAX_BOARD_DIM as usize;

fn id_kind(board: &Board, gems: &GemArena, col: u8, row: u8) -> Option<(GemId, GemKind)> {
    board.get(col, row).map(|id| {
        let gem = gems
            .get(id)
            .expect("board cell references a released gem");
        (id, gem.kind)
    })
}

/// Grow a horizontal run rightward from `start`, while adjacent cells share
/// a kind. Returns whether the run qualifies (length >= 3).
fn grow_row_run(
    board: &Board,
    gems: &GemArena,
    row: u8,
    start: u8,
    run: &mut ArrayVec<GemId, MAX_RUN>,
) -> bool {
    let mut col = start;
    while col + 1 < board.width() {
        let Some((_, kind)) = id_kind(board, gems, col, row) else {
            break;
        };
        let Some((next, next_kind)) = id_kind(board, gems, col + 1, row) else {
            break;
        };
        if kind != next_kind {
            break;
        }
        run.push(next);
        col += 1;
    }
    run.len() >= 3
}

/// Vertical counterpart of [`grow_row_run`], growing upward.
fn grow_col_run(
    board: &Board,
    gems: &GemArena,
    col: u8,
    start: u8,
    run: &mut ArrayVec<GemId, MAX_RUN>,
) -> bool {
    let mut row = start;
    while row + 1 < board.height() {
        let Some((_, kind)) = id_kind(board, gems, col, row) else {
            break;
        };
        let Some((next, next_kind)) = id_kind(board, gems, col, row + 1) else {
            break;
        };
        if kind != next_kind {
            break;
        }
        run.push(next);
        row += 1;
    }
    run.len() >= 3
}

/// Scan the row and column through `at` for the first qualifying run per
/// axis, flag every gem in the accepted runs as matched, and report whether
/// anything was found.
pub fn find_matches(board: &Board, gems: &mut GemArena, at: Cell) -> bool {
    let mut marks: ArrayVec<GemId, MAX_MARKS> = ArrayVec::new();

    let mut run: ArrayVec<GemId, MAX_RUN> = ArrayVec::new();
    for col in 0..board.width() {
        run.clear();
        let Some((seed, _)) = id_kind(board, gems, col, at.row) else {
            break;
        };
        run.push(seed);
        if grow_row_run(board, gems, at.row, col, &mut run) {
            marks.extend(run.iter().copied());
            break;
        }
    }

    run.clear();
    for row in 0..board.height() {
        run.clear();
        let Some((seed, _)) = id_kind(board, gems, at.col, row) else {
            break;
        };
        run.push(seed);
        if grow_col_run(board, gems, at.col, row, &mut run) {
            marks.extend(run.iter().copied());
            break;
        }
    }

    for id in &marks {
        if let Some(gem) = gems.get_mut(*id) {
            gem.matched = true;
        }
    }

    !marks.is_empty()
}

/// Query every occupied cell in column-major order, returning at the first
/// cell whose [`find_matches`] finds something. Only that first result's
/// runs end up flagged; any further matches are left for the next wave.
pub fn has_matches_anywhere(board: &Board, gems: &mut GemArena) -> bool {
    for col in 0..board.width() {
        for row in 0..board.height() {
            if board.get(col, row).is_none() {
                continue;
            }
            if find_matches(board, gems, Cell::new(col, row)) {
                return true;
            }
        }
    }
    false
}

/// Pure existence check: does any row or column contain a run of three
/// anywhere? Never flags gems; this is what the deadlock probe evaluates
/// against tentative swaps.
pub fn has_any_run(board: &Board, gems: &GemArena) -> bool {
    for col in 0..board.width() {
        for row in 0..board.height() {
            let Some((_, kind)) = id_kind(board, gems, col, row) else {
                continue;
            };
            if col + 2 < board.width() {
                let right1 = id_kind(board, gems, col + 1, row);
                let right2 = id_kind(board, gems, col + 2, row);
                if matches!((right1, right2), (Some((_, a)), Some((_, b))) if a == kind && b == kind)
                {
                    return true;
                }
            }
            if row + 2 < board.height() {
                let up1 = id_kind(board, gems, col, row + 1);
                let up2 = id_kind(board, gems, col, row + 2);
                if matches!((up1, up2), (Some((_, a)), Some((_, b))) if a == kind && b == kind) {
                    return true;
                }
            }
        }
    }
    false
}

/// Would placing `kind` at `cell` complete a run of three with the pair to
/// its left or the pair below? Only those two probes apply because initial
/// population proceeds column-major ascending, so nothing exists to the
/// right or above yet.
pub fn will_match_on_spawn(board: &Board, gems: &GemArena, cell: Cell, kind: GemKind) -> bool {
    let kind_at = |col: u8, row: u8| id_kind(board, gems, col, row).map(|(_, k)| k);

    let left_pair = cell.col >= 2
        && kind_at(cell.col - 1, cell.row) == Some(kind)
        && kind_at(cell.col - 2, cell.row) == Some(kind);
    let below_pair = cell.row >= 2
        && kind_at(cell.col, cell.row - 1) == Some(kind)
        && kind_at(cell.col, cell.row - 2) == Some(kind);

    left_pair || below_pair
}
