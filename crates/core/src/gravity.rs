//! Column compaction after gems are destroyed.
//!
//! `compute_falls` walks every column bottom-to-top counting gaps and
//! drops each gem's logical row by the gaps beneath it. Coordinates move
//! at computation time; the board mapping follows one gem at a time as
//! the host reports arrivals through [`settle_fall`]. A gem's vacated
//! slot may be claimed by a later-arriving gem landing there, so the
//! clear is guarded on the slot still referencing the faller.

use crate::board::Board;
use crate::gems::{GemArena, GemId};

/// One gem's pending descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fall {
    pub id: GemId,
    pub col: u8,
    pub from_row: u8,
    pub to_row: u8,
}

impl Fall {
    pub fn distance(&self) -> u8 {
        self.from_row - self.to_row
    }
}

/// Scan every column for gems with empty cells beneath them and move
/// their logical rows down by the gap count. Gems that would not move are
/// left out of the result. The board mapping is not touched here.
pub fn compute_falls(board: &Board, gems: &mut GemArena) -> Vec<Fall> {
    let mut falls = Vec::new();
    for col in 0..board.width() {
        let mut gaps = 0u8;
        for row in 0..board.height() {
            let Some(id) = board.get(col, row) else {
                gaps += 1;
                continue;
            };
            if gaps == 0 {
                continue;
            }
            let to_row = row - gaps;
            let gem = gems.get_mut(id).expect("falling gem was released");
            gem.row = to_row;
            gem.last_row = gem.row;
            gem.last_col = gem.col;
            falls.push(Fall {
                id,
                col,
                from_row: row,
                to_row,
            });
        }
    }
    falls
}

/// Apply one fall's board mapping after its arrival was reported. The old
/// slot is cleared only while it still references this gem; another
/// faller may already have landed there.
pub fn settle_fall(board: &mut Board, fall: &Fall) {
    if board.get(fall.col, fall.from_row) == Some(fall.id) {
        board.set(fall.col, fall.from_row, None);
    }
    board.set(fall.col, fall.to_row, Some(fall.id));
}
