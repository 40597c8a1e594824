//! Swap validation and resolution.
//!
//! A swipe names a gem and a direction. `begin_swap` applies the logical
//! exchange immediately (both gems trade coordinates, each remembering
//! where it came from) while the board mapping stays put until the host
//! reports each gem's arrival. The caller then evaluates the settled pair
//! and either commits the match or sends both gems back.

use tui_gems_types::{Cell, Direction};

use crate::board::Board;
use crate::gems::{GemArena, GemId};
use crate::matcher;

/// The two gems of an in-flight swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapPair {
    /// The gem the player swiped.
    pub selected: GemId,
    /// The gem it trades places with.
    pub neighbor: GemId,
}

impl SwapPair {
    pub fn ids(self) -> [GemId; 2] {
        [self.selected, self.neighbor]
    }
}

/// Validate a swipe at `at` toward `dir` and apply the logical swap.
///
/// Returns `None` for any unusable swipe: `at` outside the board, no gem
/// at `at`, the neighbor cell outside the board, or the neighbor cell
/// empty. In those cases nothing is mutated. On success both gems have
/// exchanged coordinates with their previous position recorded, and the
/// board mapping is deliberately untouched until arrival is reported.
pub fn begin_swap(
    board: &Board,
    gems: &mut GemArena,
    at: Cell,
    dir: Direction,
) -> Option<SwapPair> {
    if !board.in_bounds(at.col as i16, at.row as i16) {
        return None;
    }
    let selected = board.get(at.col, at.row)?;
    let target = at.neighbor(dir, board.width(), board.height())?;
    let neighbor = board.get(target.col, target.row)?;

    let sel = gems
        .get_mut(selected)
        .expect("swap selected a released gem");
    sel.last_col = sel.col;
    sel.last_row = sel.row;
    sel.col = target.col;
    sel.row = target.row;

    let nbr = gems
        .get_mut(neighbor)
        .expect("swap neighbor is a released gem");
    nbr.last_col = nbr.col;
    nbr.last_row = nbr.row;
    nbr.col = at.col;
    nbr.row = at.row;

    Some(SwapPair { selected, neighbor })
}

/// Evaluate a settled swap. The selected gem's row and column are scanned
/// first; the neighbor is only consulted when that finds nothing. Flags
/// every gem of the accepted runs.
pub fn evaluate(board: &Board, gems: &mut GemArena, pair: SwapPair) -> bool {
    let sel_cell = gems
        .get(pair.selected)
        .expect("evaluating a released gem")
        .cell();
    let nbr_cell = gems
        .get(pair.neighbor)
        .expect("evaluating a released gem")
        .cell();
    matcher::find_matches(board, gems, sel_cell) || matcher::find_matches(board, gems, nbr_cell)
}

/// Send both gems of a fruitless swap back where they came from. The
/// coordinates return to the recorded previous position and the board
/// mapping is restored at once; the caller still waits out the return
/// flight before accepting new input.
pub fn revert(board: &mut Board, gems: &mut GemArena, pair: SwapPair) {
    for id in pair.ids() {
        let gem = gems.get_mut(id).expect("reverting a released gem");
        gem.col = gem.last_col;
        gem.row = gem.last_row;
        let cell = gem.cell();
        board.set(cell.col, cell.row, Some(id));
    }
}

/// Re-assert the board mapping for whichever gems of a committed swap
/// survived resolution. A swap partner can be among the matched set and
/// already released; those are skipped.
pub fn finalize_survivors(board: &mut Board, gems: &GemArena, pair: SwapPair) {
    for id in pair.ids() {
        if let Some(gem) = gems.get(id) {
            board.set(gem.col, gem.row, Some(id));
        }
    }
}
